// Trade signal detection on indicator output
pub mod crossover;

pub use crossover::{detect_crossovers, DetectorState};
