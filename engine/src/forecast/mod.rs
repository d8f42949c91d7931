// Linear trend forecast on closing prices
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use shared::models::PriceSeries;

use crate::error::EngineError;

/// Two-sided 95% normal quantile used for the uncertainty band.
const BAND_Z: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Fitted trend over the history followed by `horizon_days` daily
/// projections past the last observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub symbol: String,
    pub horizon_days: u32,
    pub slope_per_day: f64,
    pub intercept: f64,
    pub residual_std: f64,
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn projected(&self) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(self.horizon_days as usize);
        &self.points[start..]
    }
}

/// Least-squares fit of close against calendar days since the first
/// observation. Needs at least two finite closes.
pub fn linear_trend(series: &PriceSeries, horizon_days: u32) -> Result<Forecast, EngineError> {
    let (first_date, last_date) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(EngineError::NoData { symbol: series.symbol().to_string() }),
    };
    let day_offset = |date: NaiveDate| (date - first_date).num_days() as f64;

    let samples: Vec<(f64, f64)> = series
        .observations()
        .iter()
        .filter(|o| o.close.is_finite())
        .map(|o| (day_offset(o.date), o.close))
        .collect();
    if samples.len() < 2 {
        tracing::warn!(symbol = %series.symbol(), count = samples.len(), "Not enough closes to fit a trend");
        return Err(EngineError::NoData { symbol: series.symbol().to_string() });
    }

    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx: f64 = samples.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = samples.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let residual_std = if samples.len() > 2 {
        let sse: f64 = samples.iter().map(|(x, y)| (y - (intercept + slope * x)).powi(2)).sum();
        (sse / (n - 2.0)).sqrt()
    } else {
        0.0
    };

    let point = |date: NaiveDate| {
        let yhat = intercept + slope * day_offset(date);
        ForecastPoint { date, yhat, yhat_lower: yhat - BAND_Z * residual_std, yhat_upper: yhat + BAND_Z * residual_std }
    };
    let points = series
        .dates()
        .into_iter()
        .chain((1..=horizon_days as i64).map(|d| last_date + Duration::days(d)))
        .map(point)
        .collect();

    tracing::debug!(symbol = %series.symbol(), slope_per_day = slope, residual_std, horizon_days, "Fitted linear trend");
    Ok(Forecast {
        symbol: series.symbol().to_string(),
        horizon_days,
        slope_per_day: slope,
        intercept,
        residual_std,
        points,
    })
}
