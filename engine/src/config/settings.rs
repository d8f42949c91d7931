// Engine settings, loaded from the embedded default JSON or a file named by
// the DASHBOARD_CONFIG environment variable.
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::PriceField;

use super::symbols::{SymbolCatalog, SymbolEntry};
use crate::chart::options::ChartOptions;
use crate::error::EngineError;

pub const CONFIG_ENV_VAR: &str = "DASHBOARD_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    pub data: DataSettings,
    pub indicators: IndicatorParams,
    pub forecast: ForecastSettings,
    pub chart: ChartOptions,
    pub symbols: Vec<SymbolEntry>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            data: DataSettings::default(),
            indicators: IndicatorParams::default(),
            forecast: ForecastSettings::default(),
            chart: ChartOptions::default(),
            symbols: SymbolCatalog::default_entries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding one `<SYMBOL>.csv` per symbol.
    pub data_dir: PathBuf,
    pub start_date: NaiveDate,
    pub fetch_timeout_ms: u64,
    pub cache_enabled: bool,
    /// Cached series kept before the oldest is evicted.
    pub cache_max_entries: usize,
    pub price_field: PriceField,
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            data_dir: PathBuf::from("data"),
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            fetch_timeout_ms: 10_000,
            cache_enabled: true,
            cache_max_entries: 64,
            price_field: PriceField::AdjustedClose,
        }
    }
}

/// Indicator periods. Every value must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: usize,
    pub rsi_window: usize,
    /// Points hidden from the RSI panel after the RSI window itself.
    pub rsi_extra_warmup: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
            rsi_window: 14,
            rsi_extra_warmup: 16,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("fast_span", self.fast_span),
            ("slow_span", self.slow_span),
            ("signal_span", self.signal_span),
            ("rsi_window", self.rsi_window),
        ] {
            if value == 0 {
                return Err(EngineError::ConfigError(format!("{} must be a positive integer, got 0", name)));
            }
        }
        if self.fast_span >= self.slow_span {
            tracing::warn!(
                fast_span = self.fast_span,
                slow_span = self.slow_span,
                "fast_span is not shorter than slow_span; MACD sign will be inverted"
            );
        }
        Ok(())
    }

    /// First position drawn on the RSI panel.
    pub fn rsi_display_start(&self) -> usize {
        self.rsi_window.saturating_add(self.rsi_extra_warmup)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ForecastSettings {
    pub max_months: u32,
    pub days_per_month: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        ForecastSettings { max_months: 4, days_per_month: 30 }
    }
}

impl ForecastSettings {
    /// Converts a requested month count into a horizon in days.
    pub fn horizon_days(&self, months: u32) -> Result<u32, EngineError> {
        if months == 0 || months > self.max_months {
            return Err(EngineError::InvalidRequest(format!(
                "Forecast months must be between 1 and {}, got {}",
                self.max_months, months
            )));
        }
        months
            .checked_mul(self.days_per_month)
            .ok_or_else(|| EngineError::InvalidRequest(format!("Forecast horizon of {} months is too long", months)))
    }
}

impl EngineSettings {
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Uses the file named by `DASHBOARD_CONFIG` when set, the embedded
    /// defaults otherwise.
    pub fn load() -> Result<Self, EngineError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading settings from file");
                Self::load_from_path(path)
            }
            Err(_) => Self::load_default(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings =
            serde_json::from_str(text).map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.indicators.validate()?;
        if self.data.fetch_timeout_ms == 0 {
            return Err(EngineError::ConfigError("fetch_timeout_ms must be positive".to_string()));
        }
        if self.data.cache_max_entries == 0 {
            return Err(EngineError::ConfigError("cache_max_entries must be positive".to_string()));
        }
        if self.forecast.max_months == 0 || self.forecast.days_per_month == 0 {
            return Err(EngineError::ConfigError("forecast max_months and days_per_month must be positive".to_string()));
        }
        if self.forecast.max_months.checked_mul(self.forecast.days_per_month).is_none() {
            return Err(EngineError::ConfigError("forecast max_months * days_per_month overflows".to_string()));
        }
        self.chart.validate()?;
        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<SymbolCatalog, EngineError> {
        SymbolCatalog::new(self.symbols.clone())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.data.fetch_timeout_ms)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_matches_builtin_defaults() {
        let settings = EngineSettings::load_default().unwrap();
        assert_eq!(settings.port, 50051);
        assert_eq!(settings.indicators, IndicatorParams::default());
        assert_eq!(settings.data.start_date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(settings.data.price_field, PriceField::AdjustedClose);
        assert_eq!(settings.symbols.len(), 4);
        assert_eq!(settings.chart, ChartOptions::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EngineSettings::from_json(r#"{ "port": 6000, "indicators": { "rsi_window": 10 } }"#).unwrap();
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.indicators.rsi_window, 10);
        assert_eq!(settings.indicators.fast_span, 12);
        assert_eq!(settings.indicators.rsi_display_start(), 26);
        assert!(settings.data.cache_enabled);
    }

    #[test]
    fn test_zero_span_rejected_at_load() {
        let err = EngineSettings::from_json(r#"{ "indicators": { "signal_span": 0 } }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(ref msg) if msg.contains("signal_span")));
    }

    #[test]
    fn test_negative_span_rejected_at_load() {
        let err = EngineSettings::from_json(r#"{ "indicators": { "fast_span": -12 } }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(ref msg) if msg.contains("Invalid settings JSON")));
    }

    #[test]
    fn test_bad_start_date_rejected() {
        let err = EngineSettings::from_json(r#"{ "data": { "start_date": "2015-13-01" } }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let json = r#"{ "symbols": [
            { "display_name": "Alphabet", "code": "GOOG" },
            { "display_name": "Google", "code": "GOOG" }
        ] }"#;
        assert!(matches!(EngineSettings::from_json(json), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_forecast_horizon() {
        let forecast = ForecastSettings::default();
        assert_eq!(forecast.horizon_days(1).unwrap(), 30);
        assert_eq!(forecast.horizon_days(4).unwrap(), 120);
        assert!(matches!(forecast.horizon_days(0), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(forecast.horizon_days(5), Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn test_oversized_values_do_not_overflow() {
        let params = IndicatorParams { rsi_extra_warmup: usize::MAX, ..IndicatorParams::default() };
        assert_eq!(params.rsi_display_start(), usize::MAX);

        let json = r#"{ "forecast": { "max_months": 4294967295, "days_per_month": 30 } }"#;
        assert!(matches!(EngineSettings::from_json(json), Err(EngineError::ConfigError(ref msg)) if msg.contains("overflows")));
    }

    #[test]
    fn test_cache_capacity_setting() {
        assert_eq!(EngineSettings::load_default().unwrap().data.cache_max_entries, 64);
        let err = EngineSettings::from_json(r#"{ "data": { "cache_max_entries": 0 } }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(ref msg) if msg.contains("cache_max_entries")));
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = EngineSettings::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
