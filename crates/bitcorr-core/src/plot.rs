//! Chart model for the three stacked panels
//!
//! Front ends render [`PlotPanel`]s as line charts. Each panel carries a
//! fixed vertical range that never depends on its data:
//!
//! | panel   | x         | y                    | y range      |
//! |---------|-----------|----------------------|--------------|
//! | signal  | time (s)  | amplitude            | `[-1, 1]`    |
//! | trigger | time (s)  | trigger bit          | `[-0.1, 1.1]`|
//! | profile | offset    | Hamming distance ×2  | `[-5, 80]`   |

use crate::types::{Bit, Sample};

/// Vertical range of the signal panel.
pub const SIGNAL_Y_RANGE: (f64, f64) = (-1.0, 1.0);
/// Vertical range of the trigger panel.
pub const TRIGGER_Y_RANGE: (f64, f64) = (-0.1, 1.1);
/// Vertical range of the profile panel.
pub const PROFILE_Y_RANGE: (f64, f64) = (-5.0, 80.0);

/// One line chart ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPanel {
    /// Stable widget id
    pub id: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<[f64; 2]>,
    pub y_range: (f64, f64),
}

impl PlotPanel {
    /// Raw signal against time.
    pub fn signal(times: &[f64], signal: &[Sample]) -> Self {
        Self {
            id: "signal",
            title: "Input signal",
            x_label: "Time (s)",
            y_label: "Amplitude",
            points: zip_points(times, signal.iter().copied()),
            y_range: SIGNAL_Y_RANGE,
        }
    }

    /// Trigger bits against time.
    pub fn trigger(times: &[f64], trigger: &[Bit]) -> Self {
        Self {
            id: "trigger",
            title: "Hysteresis trigger",
            x_label: "Time (s)",
            y_label: "Trigger",
            points: zip_points(times, trigger.iter().map(|&b| b as f64)),
            y_range: TRIGGER_Y_RANGE,
        }
    }

    /// Duplicated shift profile against offset index.
    pub fn profile(duplicated: &[u32]) -> Self {
        Self {
            id: "profile",
            title: "Shift Hamming profile",
            x_label: "Offset (samples)",
            y_label: "Differing bits",
            points: duplicated
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v as f64])
                .collect(),
            y_range: PROFILE_Y_RANGE,
        }
    }

    /// Horizontal extent of the data, `(0, 0)` when empty.
    pub fn x_extent(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first[0], last[0]),
            _ => (0.0, 0.0),
        }
    }
}

fn zip_points(xs: &[f64], ys: impl Iterator<Item = f64>) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(&x, y)| [x, y]).collect()
}
