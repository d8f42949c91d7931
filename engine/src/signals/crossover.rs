// MACD/Signal crossover detection
use shared::models::{Crossover, CrossoverKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// Waiting for MACD to rise above the signal line.
    Armed,
    /// Waiting for MACD to fall below the signal line.
    Holding,
}

impl DetectorState {
    /// Advances one position. Comparisons are strict, so ties and NaN never
    /// transition.
    pub fn step(self, macd: f64, signal: f64) -> (DetectorState, Option<CrossoverKind>) {
        match self {
            DetectorState::Armed if macd > signal => (DetectorState::Holding, Some(CrossoverKind::Buy)),
            DetectorState::Holding if macd < signal => (DetectorState::Armed, Some(CrossoverKind::Sell)),
            state => (state, None),
        }
    }
}

/// Buy/Sell events over the common prefix of the two lines, starting in
/// `Armed`. Events alternate Buy, Sell, Buy, ... and the run may end
/// holding a position.
pub fn detect_crossovers(macd: &[f64], signal: &[f64]) -> Vec<Crossover> {
    if macd.len() != signal.len() {
        tracing::warn!(macd_len = macd.len(), signal_len = signal.len(), "MACD and signal lengths differ; using common prefix");
    }

    let mut state = DetectorState::Armed;
    let mut crossovers = Vec::new();
    for (position, (&m, &s)) in macd.iter().zip(signal).enumerate() {
        let (next, event) = state.step(m, s);
        if let Some(kind) = event {
            crossovers.push(Crossover { position, kind });
        }
        state = next;
    }
    crossovers
}
