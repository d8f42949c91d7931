// Moving Average Convergence Divergence (MACD) indicator implementation
use super::ema::compute_ema;
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorLine;

pub const DEFAULT_FAST_SPAN: usize = 12;
pub const DEFAULT_SLOW_SPAN: usize = 26;
pub const DEFAULT_SIGNAL_SPAN: usize = 9;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdOutput {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD line (fast EMA − slow EMA), its signal EMA and the histogram.
/// All lines have the input's length; short inputs give short outputs.
pub fn compute_macd(values: &[f64], fast_span: usize, slow_span: usize, signal_span: usize) -> MacdOutput {
    let ema_fast = compute_ema(values, fast_span);
    let ema_slow = compute_ema(values, slow_span);
    let macd: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(fast, slow)| fast - slow).collect();
    let signal = compute_ema(&macd, signal_span);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdOutput { ema_fast, ema_slow, macd, signal, histogram }
}

pub struct Macd {
    name: String,
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
}

impl Macd {
    pub fn new(fast_span: usize, slow_span: usize, signal_span: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast_span, slow_span, signal_span),
            fast_span,
            slow_span,
            signal_span,
        }
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "fast_span": self.fast_span,
            "slow_span": self.slow_span,
            "signal_span": self.signal_span,
        })
    }

    fn calculate(&self, values: &[f64]) -> Vec<IndicatorLine> {
        let output = compute_macd(values, self.fast_span, self.slow_span, self.signal_span);
        let parameters = self.parameters();
        [("MACD", output.macd), ("Signal", output.signal), ("Histogram", output.histogram)]
            .into_iter()
            .map(|(name, line)| IndicatorLine {
                name: name.to_string(),
                parameters: parameters.clone(),
                values: super::finite_or_none(line),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_small_spans() {
        // fast span 1 tracks the input, slow/signal span 3 use α = 0.5.
        let output = compute_macd(&[2.0, 4.0, 6.0], 1, 3, 3);
        assert_eq!(output.ema_fast, vec![2.0, 4.0, 6.0]);
        assert_eq!(output.ema_slow, vec![2.0, 3.0, 4.5]);
        assert_eq!(output.macd, vec![0.0, 1.0, 1.5]);
        assert_eq!(output.signal, vec![0.0, 0.5, 1.0]);
        assert_eq!(output.histogram, vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_macd_constant_series_is_flat() {
        let values = vec![100.0; DEFAULT_SIGNAL_SPAN + DEFAULT_FAST_SPAN + 5];
        let output = compute_macd(&values, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN, DEFAULT_SIGNAL_SPAN);
        assert!(output.macd.iter().all(|&v| v == 0.0));
        assert!(output.histogram.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_macd_rising_series_is_positive() {
        let values: Vec<f64> = (0..60).map(|i| 50.0 + i as f64).collect();
        let output = compute_macd(&values, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN, DEFAULT_SIGNAL_SPAN);
        assert!(output.macd[1..].iter().all(|&v| v > 0.0));
        assert!(output.histogram[1..].iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_macd_degenerate_lengths() {
        let empty = compute_macd(&[], 12, 26, 9);
        assert!(empty.macd.is_empty() && empty.signal.is_empty() && empty.histogram.is_empty());

        let single = compute_macd(&[5.0], 12, 26, 9);
        assert_eq!(single.macd, vec![0.0]);
        assert_eq!(single.signal, vec![0.0]);
        assert_eq!(single.histogram, vec![0.0]);
    }

    #[test]
    fn test_macd_calculator_lines() {
        let lines = Macd::new(12, 26, 9).calculate(&[1.0, 2.0, 3.0]);
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["MACD", "Signal", "Histogram"]);
        assert!(lines.iter().all(|l| l.values.len() == 3));
        assert_eq!(lines[0].parameters["slow_span"], 26);
    }
}
