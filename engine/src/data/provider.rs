// Price data sources
use super::csv_parser::YahooCsvParser;
use crate::error::{DataFetchError, EngineError};
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::PriceSeries;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Inclusive calendar range of requested observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::InvalidRequest(format!("Range start {} is after end {}", start, end)));
        }
        Ok(DateRange { start, end })
    }

    /// From `start` through today (local date). A start in the future
    /// collapses to a single-day range.
    pub fn until_today(start: NaiveDate) -> Self {
        let today = chrono::Local::now().date_naive();
        DateRange { start: start.min(today), end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Source of daily price history. Implementations return observations in
/// ascending date order restricted to the requested range; an unknown
/// symbol may be reported as `NotFound` or as an empty series.
#[tonic::async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch(&self, symbol: &str, range: &DateRange) -> Result<PriceSeries, DataFetchError>;
}

/// Reads `<data_dir>/<symbol>.csv` files in the Yahoo Finance export format.
pub struct CsvPriceProvider {
    data_dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CsvPriceProvider { data_dir: data_dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }
}

#[tonic::async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn fetch(&self, symbol: &str, range: &DateRange) -> Result<PriceSeries, DataFetchError> {
        let path = self.path_for(symbol);
        let symbol = symbol.to_string();
        let range = *range;
        tracing::debug!(symbol = %symbol, path = %path.display(), "Reading price history");

        tokio::task::spawn_blocking(move || read_series(&path, &symbol, &range))
            .await
            .map_err(|e| DataFetchError::Unavailable(format!("CSV reader task failed: {}", e)))?
    }
}

fn read_series(path: &Path, symbol: &str, range: &DateRange) -> Result<PriceSeries, DataFetchError> {
    if !path.is_file() {
        return Err(DataFetchError::NotFound { symbol: symbol.to_string() });
    }
    let observations = YahooCsvParser::load_observations_from_csv(path)
        .map_err(|e| DataFetchError::Malformed { symbol: symbol.to_string(), reason: e.to_string() })?;
    let in_range = observations.into_iter().filter(|o| range.contains(o.date)).collect();
    Ok(PriceSeries::from_unordered(symbol, in_range))
}

/// Fixed series held in memory; unknown symbols yield an empty series.
#[derive(Default)]
pub struct InMemoryPriceProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol().to_string(), series);
        self
    }
}

#[tonic::async_trait]
impl PriceProvider for InMemoryPriceProvider {
    async fn fetch(&self, symbol: &str, range: &DateRange) -> Result<PriceSeries, DataFetchError> {
        let observations = self
            .series
            .get(symbol)
            .map(|s| s.observations().iter().filter(|o| range.contains(o.date)).cloned().collect())
            .unwrap_or_default();
        Ok(PriceSeries::from_unordered(symbol, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GOOG_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2015-01-05,523.26,524.33,513.06,517.15,517.15,2059100
2015-01-02,529.55,530.07,524.43,527.88,527.88,1324000
2015-01-06,515.00,516.18,501.05,501.96,501.96,2899900
2015-01-06,515.00,516.18,501.05,501.96,501.96,2899900
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range() {
        assert!(matches!(DateRange::new(date(2020, 1, 2), date(2020, 1, 1)), Err(EngineError::InvalidRequest(_))));
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 31)).unwrap();
        assert!(range.contains(date(2020, 1, 1)));
        assert!(range.contains(date(2020, 1, 31)));
        assert!(!range.contains(date(2020, 2, 1)));

        let future = DateRange::until_today(date(9999, 1, 1));
        assert_eq!(future.start, future.end);
    }

    #[tokio::test]
    async fn test_csv_provider_orders_and_filters() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("GOOG.csv"), GOOG_CSV).unwrap();
        let provider = CsvPriceProvider::new(dir.path());

        let all = provider.fetch("GOOG", &DateRange::new(date(2015, 1, 1), date(2015, 12, 31)).unwrap()).await.unwrap();
        assert_eq!(all.dates(), vec![date(2015, 1, 2), date(2015, 1, 5), date(2015, 1, 6)]);

        let later = provider.fetch("GOOG", &DateRange::new(date(2015, 1, 3), date(2015, 1, 5)).unwrap()).await.unwrap();
        assert_eq!(later.len(), 1);
        assert_eq!(later.observations()[0].close, 517.15);
    }

    #[tokio::test]
    async fn test_csv_provider_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = CsvPriceProvider::new(dir.path());
        let err = provider.fetch("MSFT", &DateRange::until_today(date(2015, 1, 1))).await.unwrap_err();
        assert_eq!(err, DataFetchError::NotFound { symbol: "MSFT".to_string() });
    }

    #[tokio::test]
    async fn test_csv_provider_bad_content_is_malformed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "Date,Open,High,Low,Close,Adj Close,Volume\nyesterday,1,1,1,1,1,1\n").unwrap();
        let provider = CsvPriceProvider::new(dir.path());
        let err = provider.fetch("BAD", &DateRange::until_today(date(2015, 1, 1))).await.unwrap_err();
        assert!(matches!(err, DataFetchError::Malformed { ref reason, .. } if reason.contains("Error parsing 'Date'")));
    }

    #[tokio::test]
    async fn test_csv_provider_skips_non_finite_rows() {
        let dir = tempdir().unwrap();
        let csv = "\
Date,Open,High,Low,Close,Adj Close,Volume
2015-01-02,1,2,0.5,1.5,1.5,NaN
2015-01-05,1,2,0.5,inf,1.6,10
2015-01-06,1,2,0.5,1.7,1.7,12
";
        fs::write(dir.path().join("GOOG.csv"), csv).unwrap();
        let provider = CsvPriceProvider::new(dir.path());

        let series = provider.fetch("GOOG", &DateRange::until_today(date(2015, 1, 1))).await.unwrap();
        assert_eq!(series.dates(), vec![date(2015, 1, 6)]);
        assert!(series.observations().iter().all(|o| o.volume.is_finite() && o.close.is_finite()));
    }

    #[tokio::test]
    async fn test_in_memory_provider_unknown_symbol_is_empty() {
        let provider = InMemoryPriceProvider::new();
        let series = provider.fetch("ZZZ", &DateRange::until_today(date(2015, 1, 1))).await.unwrap();
        assert!(series.is_empty());
        assert_eq!(series.symbol(), "ZZZ");
    }
}
