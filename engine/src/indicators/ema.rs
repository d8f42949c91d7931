// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorLine;

/// EMA seeded with the first value (no simple-average warm-up), so every
/// position is defined. Uses α = 2 / (span + 1); a span of 0 behaves as 1.
///
/// Non-finite inputs never fault: leading ones produce NaN until the first
/// finite value seeds the average, later ones carry the previous average.
pub fn compute_ema(values: &[f64], span: usize) -> Vec<f64> {
    let multiplier = 2.0 / (span.max(1) as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous_ema: Option<f64> = None;

    for &value in values {
        let ema = match previous_ema {
            None if value.is_finite() => value,
            None => {
                results.push(f64::NAN);
                continue;
            }
            Some(previous) if value.is_finite() => (value - previous) * multiplier + previous,
            Some(previous) => previous,
        };
        previous_ema = Some(ema);
        results.push(ema);
    }
    results
}

pub struct Ema {
    name: String,
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            name: format!("EMA({})", span),
            span,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "span": self.span })
    }

    fn calculate(&self, values: &[f64]) -> Vec<IndicatorLine> {
        vec![IndicatorLine {
            name: self.name.clone(),
            parameters: self.parameters(),
            values: super::finite_or_none(compute_ema(values, self.span)),
        }]
    }
}
