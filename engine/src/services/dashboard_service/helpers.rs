// Conversions between engine values and wire messages
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Crossover, CrossoverKind, IndicatorLine};
use tonic::Status;

use crate::error::EngineError;
use crate::models::{EnrichedPoint, EnrichedSeries};
use crate::services::{CrossoverMessage, EnrichedRow, IndicatorLineMessage};

pub const DEFAULT_CHUNK_SIZE: usize = 256;
pub const MAX_CHUNK_SIZE: usize = 5_000;

pub fn to_enriched_row(point: &EnrichedPoint) -> EnrichedRow {
    let observation = &point.observation;
    EnrichedRow {
        date: observation.date.to_string(),
        open: observation.open,
        high: observation.high,
        low: observation.low,
        close: observation.close,
        adjusted_close: observation.adjusted_close,
        volume: observation.volume,
        price: point.price,
        ema_fast: point.ema_fast,
        ema_slow: point.ema_slow,
        macd: point.macd,
        signal: point.signal,
        histogram: point.histogram,
        rsi: point.rsi,
        buy_marker: point.buy_marker,
        sell_marker: point.sell_marker,
    }
}

pub fn to_crossover_message(crossover: &Crossover, enriched: &EnrichedSeries) -> CrossoverMessage {
    let point = enriched.points().get(crossover.position);
    CrossoverMessage {
        position: crossover.position as u64,
        date: point.map(|p| p.observation.date.to_string()).unwrap_or_default(),
        kind: match crossover.kind {
            CrossoverKind::Buy => "BUY".to_string(),
            CrossoverKind::Sell => "SELL".to_string(),
        },
        price: point.map_or(f64::NAN, |p| p.price),
    }
}

pub fn to_indicator_line_message(line: &IndicatorLine) -> IndicatorLineMessage {
    IndicatorLineMessage {
        name: line.name.clone(),
        values: line.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
    }
}

pub fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String, Status> {
    serde_json::to_string(value)
        .map_err(|e| EngineError::ProcessingError(format!("Failed to serialize {}: {}", what, e)).into())
}

/// Empty input means "not given".
pub fn parse_request_date(raw: &str, field: &str) -> Result<Option<NaiveDate>, Status> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| Status::invalid_argument(format!("Invalid {} '{}': {}", field, raw, e)))
}

pub fn chunk_size(requested: u32) -> usize {
    match requested as usize {
        0 => DEFAULT_CHUNK_SIZE,
        n => n.min(MAX_CHUNK_SIZE),
    }
}
