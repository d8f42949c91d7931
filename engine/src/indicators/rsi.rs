// Relative Strength Index (RSI) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorLine;

pub const DEFAULT_RSI_WINDOW: usize = 14;

/// Exponentially weighted mean with normalised weights, so early values are
/// not biased toward zero: mean = Σ decayᵏ·xₜ₋ₖ / Σ decayᵏ.
#[derive(Debug, Default)]
struct WeightedMean {
    numerator: f64,
    denominator: f64,
}

impl WeightedMean {
    fn push(&mut self, value: f64, decay: f64) {
        self.numerator = value + decay * self.numerator;
        self.denominator = 1.0 + decay * self.denominator;
    }

    fn mean(&self) -> f64 {
        self.numerator / self.denominator
    }
}

/// RSI over `time_window` price changes, smoothed with α = 1 / time_window
/// (center of mass time_window − 1).
///
/// Position i is `None` until `time_window` changes have been observed, so
/// with finite input the first value sits at index `time_window`. A window
/// with gains and no losses saturates at 100; a window with neither (flat
/// prices) is `None`. Non-finite changes are skipped.
pub fn compute_rsi(values: &[f64], time_window: usize) -> Vec<Option<f64>> {
    let window = time_window.max(1);
    let decay = 1.0 - 1.0 / window as f64;
    let mut results = Vec::with_capacity(values.len());
    if values.is_empty() {
        return results;
    }
    results.push(None); // no change before the first value

    let mut gains = WeightedMean::default();
    let mut losses = WeightedMean::default();
    let mut observed = 0usize;

    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        if change.is_finite() {
            gains.push(change.max(0.0), decay);
            losses.push(change.min(0.0), decay);
            observed += 1;
        }
        if observed < window {
            results.push(None);
        } else {
            results.push(relative_strength_index(gains.mean(), losses.mean()));
        }
    }
    results
}

/// `avg_loss` is the (non-positive) mean of the negative changes.
fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }
    let rs = (avg_gain / avg_loss).abs();
    Some(100.0 - 100.0 / (1.0 + rs))
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, values: &[f64]) -> Vec<IndicatorLine> {
        vec![IndicatorLine {
            name: self.name.clone(),
            parameters: self.parameters(),
            values: compute_rsi(values, self.period),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: [f64; 21] = [
        44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03, 45.61,
        46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.25,
    ];

    fn assert_close(actual: Option<f64>, expected: f64) {
        let value = actual.expect("expected a defined RSI value");
        assert!((value - expected).abs() < 1e-6, "{} != {}", value, expected);
    }

    #[test]
    fn test_rsi_calculation() {
        let results = compute_rsi(&PRICES, 14);
        assert_eq!(results.len(), PRICES.len());
        for (i, value) in results.iter().enumerate().take(14) {
            assert_eq!(*value, None, "Expected None at index {}", i);
        }
        assert_close(results[14], 71.8024106537328);
        assert_close(results[15], 65.18659892527091);
        assert_close(results[17], 69.87561488969817);
        assert_close(results[19], 54.179295420546964);
        assert_close(results[20], 61.658967882912485);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let results = compute_rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(results, vec![None; 3]);
    }

    #[test]
    fn test_rsi_flat_series_is_undefined() {
        let results = compute_rsi(&[10.0; 14], 14);
        assert_eq!(results.len(), 14);
        assert_eq!(results[13], None);

        let longer = compute_rsi(&[10.0; 40], 14);
        assert!(longer.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_all_gains() {
        let prices: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let results = compute_rsi(&prices, 14);
        for value in &results[..14] {
            assert_eq!(*value, None);
        }
        for value in &results[14..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn test_rsi_all_losses() {
        let prices: Vec<f64> = (1..=20).map(|i| 20.0 - i as f64).collect();
        let results = compute_rsi(&prices, 14);
        for value in &results[14..] {
            assert_eq!(*value, Some(0.0));
        }
    }

    #[test]
    fn test_rsi_rising_with_pullbacks_trends_up_and_stays_bounded() {
        // Two steps up, one smaller step down.
        let mut prices = vec![100.0];
        for i in 0..120 {
            let last = *prices.last().unwrap();
            prices.push(if i % 3 == 2 { last - 0.5 } else { last + 1.0 });
        }
        let results = compute_rsi(&prices, 14);
        let defined: Vec<f64> = results.iter().flatten().copied().collect();
        assert!(!defined.is_empty());
        assert!(defined.iter().all(|v| (0.0..=100.0).contains(v)));
        assert!(*defined.last().unwrap() > 70.0);
    }

    #[test]
    fn test_rsi_skips_non_finite_changes() {
        let mut prices: Vec<f64> = (1..=6).map(|i| i as f64).collect();
        prices[2] = f64::NAN;
        // Changes 1→2, 4→5 and 5→6 are finite; the two around the NaN are skipped.
        let results = compute_rsi(&prices, 3);
        assert_eq!(results[..5], [None, None, None, None, None]);
        assert_eq!(results[5], Some(100.0));
    }

    #[test]
    fn test_rsi_calculator_line() {
        let lines = Rsi::new(14).calculate(&PRICES);
        assert_eq!(lines[0].name, "RSI(14)");
        assert_eq!(lines[0].parameters["period"], 14);
        assert_eq!(lines[0].values.len(), PRICES.len());
    }
}
