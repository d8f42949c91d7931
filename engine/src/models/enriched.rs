use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Crossover, CrossoverKind, PriceField, PriceObservation};

use crate::config::settings::IndicatorParams;

/// One observation with its derived indicator fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPoint {
    pub observation: PriceObservation,
    /// Value of the price field the indicators were computed on.
    pub price: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub rsi: Option<f64>,
    pub buy_marker: Option<f64>,
    pub sell_marker: Option<f64>,
}

/// Index-aligned indicator view of a `PriceSeries`. Built per request and
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSeries {
    symbol: String,
    price_field: PriceField,
    params: IndicatorParams,
    points: Vec<EnrichedPoint>,
}

impl EnrichedSeries {
    pub fn new(symbol: impl Into<String>, price_field: PriceField, params: IndicatorParams, points: Vec<EnrichedPoint>) -> Self {
        Self { symbol: symbol.into(), price_field, params, points }
    }

    /// Returns a copy with buy/sell markers placed at the crossover
    /// positions. Markers carry the indicator price at that position;
    /// positions outside the series are ignored.
    pub fn with_crossovers(&self, crossovers: &[Crossover]) -> Self {
        let mut points = self.points.clone();
        for point in &mut points {
            point.buy_marker = None;
            point.sell_marker = None;
        }
        for crossover in crossovers {
            if let Some(point) = points.get_mut(crossover.position) {
                match crossover.kind {
                    CrossoverKind::Buy => point.buy_marker = Some(point.price),
                    CrossoverKind::Sell => point.sell_marker = Some(point.price),
                }
            }
        }
        Self { symbol: self.symbol.clone(), price_field: self.price_field, params: self.params, points }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn points(&self) -> &[EnrichedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.observation.date).collect()
    }

    pub fn column<T>(&self, f: impl Fn(&EnrichedPoint) -> T) -> Vec<T> {
        self.points.iter().map(f).collect()
    }

    pub fn macd(&self) -> Vec<f64> {
        self.column(|p| p.macd)
    }

    pub fn signal(&self) -> Vec<f64> {
        self.column(|p| p.signal)
    }

    pub fn rsi(&self) -> Vec<Option<f64>> {
        self.column(|p| p.rsi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, price: f64) -> EnrichedPoint {
        EnrichedPoint {
            observation: PriceObservation {
                date: NaiveDate::from_ymd_opt(2022, 3, day).unwrap(),
                open: price,
                high: price,
                low: price,
                close: price,
                adjusted_close: price,
                volume: 10.0,
            },
            price,
            ema_fast: price,
            ema_slow: price,
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
            rsi: None,
            buy_marker: None,
            sell_marker: None,
        }
    }

    #[test]
    fn test_with_crossovers_places_markers_and_leaves_source_unchanged() {
        let series = EnrichedSeries::new(
            "GOOG",
            PriceField::AdjustedClose,
            IndicatorParams::default(),
            vec![point(1, 10.0), point(2, 11.0), point(3, 12.0)],
        );
        let marked = series.with_crossovers(&[
            Crossover { position: 0, kind: CrossoverKind::Buy },
            Crossover { position: 2, kind: CrossoverKind::Sell },
            Crossover { position: 9, kind: CrossoverKind::Buy },
        ]);

        assert_eq!(marked.points()[0].buy_marker, Some(10.0));
        assert_eq!(marked.points()[1].buy_marker, None);
        assert_eq!(marked.points()[2].sell_marker, Some(12.0));
        assert_eq!(marked.symbol(), "GOOG");
        assert!(series.points().iter().all(|p| p.buy_marker.is_none() && p.sell_marker.is_none()));
    }
}
