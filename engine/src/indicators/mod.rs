// Technical indicators module
pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::{compute_ema, Ema};
pub use macd::{compute_macd, Macd, MacdOutput};
pub use rsi::{compute_rsi, Rsi};

use serde_json::Value;
use shared::models::{IndicatorLine, PriceField, PriceSeries};

use crate::config::settings::IndicatorParams;
use crate::error::EngineError;
use crate::models::enriched::{EnrichedPoint, EnrichedSeries};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, values: &[f64]) -> Vec<IndicatorLine>;
}

pub(crate) fn finite_or_none(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(|v| v.is_finite().then_some(v)).collect()
}

fn read_period(parameters: &Value, keys: &[&str], default: usize) -> Result<usize, EngineError> {
    let period = keys
        .iter()
        .find_map(|key| parameters.get(*key))
        .map(|v| {
            v.as_u64()
                .ok_or_else(|| EngineError::IndicatorError(format!("Indicator period must be a non-negative integer, got {}", v)))
        })
        .transpose()?
        .map_or(default, |p| p as usize);
    if period == 0 {
        return Err(EngineError::IndicatorError("Indicator period cannot be 0".to_string()));
    }
    Ok(period)
}

/// Builds a calculator from a type name ("ema", "macd", "rsi") and JSON
/// parameters. Missing parameters fall back to `defaults`.
pub fn build_calculator(
    indicator_type: &str,
    parameters: &Value,
    defaults: &IndicatorParams,
) -> Result<Box<dyn IndicatorCalculator>, EngineError> {
    let calculator: Box<dyn IndicatorCalculator> = match indicator_type.trim().to_lowercase().as_str() {
        "ema" => Box::new(Ema::new(read_period(parameters, &["span", "period"], defaults.fast_span)?)),
        "macd" => Box::new(Macd::new(
            read_period(parameters, &["fast_span"], defaults.fast_span)?,
            read_period(parameters, &["slow_span"], defaults.slow_span)?,
            read_period(parameters, &["signal_span"], defaults.signal_span)?,
        )),
        "rsi" => Box::new(Rsi::new(read_period(parameters, &["period", "time_window"], defaults.rsi_window)?)),
        _ => {
            tracing::error!(indicator_type = %indicator_type, "Unknown indicator type requested");
            return Err(EngineError::IndicatorError(format!("Unknown indicator type: {}", indicator_type)));
        }
    };
    Ok(calculator)
}

/// Turns a price series into an `EnrichedSeries` with EMA, MACD and RSI
/// columns. Computation is total: degenerate input yields sentinel values.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    params: IndicatorParams,
    price_field: PriceField,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams, price_field: PriceField) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self { params, price_field })
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    pub fn enrich(&self, series: &PriceSeries) -> EnrichedSeries {
        let values = series.values(self.price_field);
        let macd = compute_macd(&values, self.params.fast_span, self.params.slow_span, self.params.signal_span);
        let rsi = compute_rsi(&values, self.params.rsi_window);

        let points = series
            .observations()
            .iter()
            .enumerate()
            .map(|(i, observation)| EnrichedPoint {
                observation: observation.clone(),
                price: values[i],
                ema_fast: macd.ema_fast[i],
                ema_slow: macd.ema_slow[i],
                macd: macd.macd[i],
                signal: macd.signal[i],
                histogram: macd.histogram[i],
                rsi: rsi[i],
                buy_marker: None,
                sell_marker: None,
            })
            .collect();

        tracing::debug!(symbol = %series.symbol(), count = series.len(), "Enriched price series");
        EnrichedSeries::new(series.symbol(), self.price_field, self.params, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use shared::models::PriceObservation;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let observations = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceObservation {
                date: start + Duration::days(i as i64),
                open: close - 1.0,
                high: close + 1.0,
                low: close - 2.0,
                close,
                adjusted_close: close,
                volume: 1_000.0,
            })
            .collect();
        PriceSeries::new("TEST", observations).unwrap()
    }

    fn engine() -> IndicatorEngine {
        IndicatorEngine::new(IndicatorParams::default(), PriceField::AdjustedClose).unwrap()
    }

    #[test]
    fn test_enrich_empty_series() {
        let enriched = engine().enrich(&PriceSeries::empty("NONE"));
        assert!(enriched.is_empty());
        assert_eq!(enriched.symbol(), "NONE");
    }

    #[test]
    fn test_enrich_aligns_columns_with_observations() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let enriched = engine().enrich(&series(&closes));
        assert_eq!(enriched.len(), 40);
        for point in enriched.points() {
            assert!(point.ema_fast.is_finite() && point.ema_slow.is_finite());
            assert!((point.macd - (point.ema_fast - point.ema_slow)).abs() < 1e-12);
            assert!((point.histogram - (point.macd - point.signal)).abs() < 1e-12);
            assert!(point.buy_marker.is_none() && point.sell_marker.is_none());
        }
        assert!(enriched.points()[..14].iter().all(|p| p.rsi.is_none()));
        assert!(enriched.points()[14].rsi.is_some());
    }

    #[test]
    fn test_enrich_constant_series() {
        let enriched = engine().enrich(&series(&[10.0; 30]));
        assert!(enriched.points().iter().all(|p| p.macd == 0.0 && p.histogram == 0.0));
        assert!(enriched.points().iter().all(|p| p.rsi.is_none()));
    }

    #[test]
    fn test_engine_rejects_zero_span() {
        let params = IndicatorParams { slow_span: 0, ..IndicatorParams::default() };
        let err = IndicatorEngine::new(params, PriceField::Close).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
        assert!(err.to_string().contains("slow_span"));
    }

    #[test]
    fn test_build_calculator_variants() {
        let defaults = IndicatorParams::default();
        let ema = build_calculator("EMA", &serde_json::json!({ "period": 5 }), &defaults).unwrap();
        assert_eq!(ema.name(), "EMA(5)");
        let macd = build_calculator("macd", &serde_json::json!({}), &defaults).unwrap();
        assert_eq!(macd.name(), "MACD(12,26,9)");
        let rsi = build_calculator("rsi", &Value::Null, &defaults).unwrap();
        assert_eq!(rsi.name(), "RSI(14)");
    }

    #[test]
    fn test_build_calculator_rejects_bad_input() {
        let defaults = IndicatorParams::default();
        let zero = build_calculator("rsi", &serde_json::json!({ "period": 0 }), &defaults);
        assert!(matches!(zero, Err(EngineError::IndicatorError(msg)) if msg.contains("cannot be 0")));
        let negative = build_calculator("ema", &serde_json::json!({ "span": -3 }), &defaults);
        assert!(negative.is_err());
        let unknown = build_calculator("bollinger", &Value::Null, &defaults);
        assert!(matches!(unknown, Err(EngineError::IndicatorError(msg)) if msg.contains("Unknown indicator type")));
    }
}
