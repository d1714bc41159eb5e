//! Dump a noisy low-E tone, its trigger bits and the normalized profile.
//!
//! Run with: cargo run -p bitcorr-core --example profile_dump > dump.csv
//!
//! Each of the first 512 rows is `signal, bit, distance / 512`; the remaining
//! rows are `signal, bit`. The noise seed comes from `pitch.seed` in the
//! usual config search path.

use bitcorr_core::bitstream::Bitstream;
use bitcorr_core::config::TriggerConfig;
use bitcorr_core::observe::init_logging;
use bitcorr_core::synth::MultiTone;
use bitcorr_core::AppConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLE_RATE: f64 = 20_000.0;
const FREQUENCY: f64 = 82.41;
const BUFFER_LEN: usize = 1024;
const NOISE_LEVEL: f64 = 0.1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let tone = MultiTone::new(FREQUENCY, MultiTone::default_harmonics()).with_noise(NOISE_LEVEL);
    let mut rng = StdRng::seed_from_u64(config.pitch.seed);
    let signal = tone.synthesize_sampled(BUFFER_LEN, SAMPLE_RATE, &mut rng)?;

    let bits = TriggerConfig::zero_crossing().build().process(&signal);
    let stream = Bitstream::from_bits(&bits)?;
    let profile = stream.autocorrelate()?;
    let mid = profile.len() as f64;

    for (i, &s) in signal.iter().enumerate() {
        let bit = u8::from(stream.get(i));
        match profile.values().get(i) {
            Some(&distance) => println!("{s}, {bit}, {}", distance as f64 / mid),
            None => println!("{s}, {bit}"),
        }
    }
    Ok(())
}
