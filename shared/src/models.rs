use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV row as delivered by a price provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: f64,
}

impl PriceObservation {
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::AdjustedClose => self.adjusted_close,
        }
    }
}

/// Price column an indicator is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    #[default]
    AdjustedClose,
}

/// Ordered daily series for one symbol. Dates are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Builds a series, rejecting out-of-order or duplicated dates.
    pub fn new(symbol: impl Into<String>, observations: Vec<PriceObservation>) -> Result<Self> {
        let symbol = symbol.into();
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                bail!(
                    "Observations for '{}' are not strictly increasing: {} follows {}",
                    symbol,
                    pair[1].date,
                    pair[0].date
                );
            }
        }
        Ok(Self { symbol, observations })
    }

    /// Sorts by date and keeps the first row seen for each date.
    pub fn from_unordered(symbol: impl Into<String>, mut observations: Vec<PriceObservation>) -> Self {
        observations.sort_by_key(|o| o.date); // stable, so the first duplicate survives dedup
        observations.dedup_by_key(|o| o.date);
        Self { symbol: symbol.into(), observations }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), observations: Vec::new() }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self, field: PriceField) -> Vec<f64> {
        self.observations.iter().map(|o| o.field(field)).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossoverKind {
    Buy,
    Sell,
}

/// A MACD/Signal crossover event at a series position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossover {
    pub position: usize,
    pub kind: CrossoverKind,
}

/// A named output line of an indicator calculator. `None` marks positions
/// where the indicator is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLine {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, close: f64) -> PriceObservation {
        PriceObservation {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adjusted_close: close,
            volume: 100.0,
        }
    }

    #[test]
    fn test_new_rejects_duplicate_dates() {
        let result = PriceSeries::new("GOOG", vec![obs(2, 1.0), obs(2, 2.0)]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not strictly increasing"));
    }

    #[test]
    fn test_new_rejects_descending_dates() {
        assert!(PriceSeries::new("GOOG", vec![obs(3, 1.0), obs(2, 2.0)]).is_err());
    }

    #[test]
    fn test_from_unordered_sorts_and_keeps_first_duplicate() {
        let series = PriceSeries::from_unordered("MSFT", vec![obs(5, 3.0), obs(2, 1.0), obs(5, 9.0), obs(3, 2.0)]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(PriceField::Close), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn test_values_selects_field() {
        let mut row = obs(2, 10.0);
        row.adjusted_close = 9.5;
        let series = PriceSeries::new("MSFT", vec![row]).unwrap();
        assert_eq!(series.values(PriceField::AdjustedClose), vec![9.5]);
        assert_eq!(series.values(PriceField::Close), vec![10.0]);
        assert_eq!(PriceField::default(), PriceField::AdjustedClose);
    }
}
