//! # Configuration System
//!
//! YAML configuration for the synthesizer, trigger, pitch scenario and
//! logging. Every field has a default, so an empty file (or no file at all)
//! reproduces the built-in experiment.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `BITCORR_CONFIG` environment variable
//! 2. `./bitcorr.yaml` (current directory)
//! 3. `~/.config/bitcorr/config.yaml` (user config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! synth:
//!   end: 4.0
//!   step: 0.005
//!
//! trigger:
//!   low: -0.05
//!   high: 0.05
//!
//! pitch:
//!   trigger:
//!     low: -0.1
//!     high: 0.0
//!
//! logging:
//!   level: debug
//!   format: pretty
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hysteresis::{HysteresisTrigger, DEFAULT_HIGH, DEFAULT_LOW};
use crate::observe::LogConfig;
use crate::synth::{pitch_buffer_len, Harmonic, MultiTone, TimeBase};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BITCORR_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Time-base synthesizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// First sample time (s)
    pub start: f64,
    /// Exclusive end time (s)
    pub end: f64,
    /// Sample spacing (s)
    pub step: f64,
    /// Fundamental frequency (Hz)
    pub base_freq_hz: f64,
    /// Sine components
    pub harmonics: Vec<Harmonic>,
    /// Uniform noise amplitude
    pub noise_level: f64,
    /// RNG seed for the noise
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        let base = TimeBase::default();
        Self {
            start: base.start,
            end: base.end,
            step: base.step,
            base_freq_hz: 1.0,
            harmonics: MultiTone::default_harmonics(),
            noise_level: 0.0,
            seed: 42,
        }
    }
}

impl SynthConfig {
    pub fn time_base(&self) -> TimeBase {
        TimeBase::new(self.start, self.end, self.step)
    }

    pub fn tone(&self) -> MultiTone {
        MultiTone::new(self.base_freq_hz, self.harmonics.clone()).with_noise(self.noise_level)
    }
}

/// Hysteresis trip points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub low: f64,
    pub high: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
        }
    }
}

impl TriggerConfig {
    /// Trips high above zero and low below the default lower point.
    pub fn zero_crossing() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: 0.0,
        }
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if !(self.low.is_finite() && self.high.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "{section} thresholds must be finite"
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> HysteresisTrigger {
        HysteresisTrigger::new(self.low, self.high)
    }
}

/// Sampled pitch-estimation scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Samples per second
    pub sample_rate: f64,
    /// Tone fundamental (Hz)
    pub frequency: f64,
    /// Uniform noise amplitude
    pub noise_level: f64,
    /// RNG seed for the noise
    pub seed: u64,
    /// Trigger used to square the sampled tone
    pub trigger: TriggerConfig,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            frequency: 440.0,
            noise_level: 0.0,
            seed: 42,
            trigger: TriggerConfig::zero_crossing(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub synth: SynthConfig,
    pub trigger: TriggerConfig,
    pub pitch: PitchConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::load_from(&path);
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./bitcorr.yaml")];
        if let Some(dirs) = directories::ProjectDirs::from("", "", "bitcorr") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }
        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.synth
            .time_base()
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.synth.harmonics.is_empty() {
            return Err(ConfigError::Validation(
                "at least one harmonic is required".to_string(),
            ));
        }
        for (section, level) in [
            ("synth", self.synth.noise_level),
            ("pitch", self.pitch.noise_level),
        ] {
            if !(level >= 0.0 && level.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "{section} noise_level must be finite and non-negative, got {level}"
                )));
            }
        }

        self.trigger.validate("trigger")?;
        self.pitch.trigger.validate("pitch trigger")?;

        pitch_buffer_len(self.pitch.sample_rate, self.pitch.frequency)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if self.pitch.frequency * 2.0 > self.pitch.sample_rate {
            return Err(ConfigError::Validation(format!(
                "pitch frequency {} is above Nyquist for {} Hz",
                self.pitch.frequency, self.pitch.sample_rate
            )));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }
}
