// Request orchestration: symbol -> fetch -> enrich -> detect -> compose
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use shared::chart::ChartLayout;
use shared::models::{Crossover, IndicatorLine, PriceObservation, PriceSeries};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chart::ChartComposer;
use crate::config::settings::{EngineSettings, ForecastSettings};
use crate::config::symbols::{SymbolCatalog, SymbolEntry};
use crate::data::{DateRange, PriceProvider, SeriesCache};
use crate::error::{DataFetchError, EngineError};
use crate::forecast::{linear_trend, Forecast};
use crate::indicators::{build_calculator, IndicatorEngine};
use crate::models::EnrichedSeries;
use crate::signals::detect_crossovers;

/// Rows of the raw series shown as a preview.
pub const SAMPLE_ROWS: usize = 5;

/// Everything the renderer needs for one dashboard request.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub request_id: Uuid,
    pub symbol: String,
    pub range: DateRange,
    pub sample: Vec<PriceObservation>,
    pub enriched: EnrichedSeries,
    pub crossovers: Vec<Crossover>,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub request_id: Uuid,
    pub symbol: String,
    pub months: u32,
    pub forecast: Forecast,
    pub raw_layout: ChartLayout,
    pub forecast_layout: ChartLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorResult {
    pub indicator_name: String,
    pub parameters: Value,
    pub dates: Vec<NaiveDate>,
    pub lines: Vec<IndicatorLine>,
}

pub struct DashboardController {
    provider: Arc<dyn PriceProvider>,
    cache: Arc<RwLock<SeriesCache>>,
    catalog: SymbolCatalog,
    engine: IndicatorEngine,
    composer: ChartComposer,
    start_date: NaiveDate,
    fetch_timeout: Duration,
    cache_enabled: bool,
    forecast: ForecastSettings,
}

impl DashboardController {
    pub fn from_settings(settings: &EngineSettings, provider: Arc<dyn PriceProvider>) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(DashboardController {
            provider,
            cache: Arc::new(RwLock::new(SeriesCache::with_capacity(settings.data.cache_max_entries))),
            catalog: settings.catalog()?,
            engine: IndicatorEngine::new(settings.indicators, settings.data.price_field)?,
            composer: ChartComposer::new(settings.chart.clone()),
            start_date: settings.data.start_date,
            fetch_timeout: settings.fetch_timeout(),
            cache_enabled: settings.data.cache_enabled,
            forecast: settings.forecast,
        })
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn list_symbols(&self) -> &[SymbolEntry] {
        self.catalog.entries()
    }

    pub fn cache(&self) -> Arc<RwLock<SeriesCache>> {
        self.cache.clone()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Renders the configured start date through today.
    pub async fn render(&self, symbol: &str) -> Result<DashboardView, EngineError> {
        self.render_range(symbol, DateRange::until_today(self.start_date)).await
    }

    pub async fn render_range(&self, symbol: &str, range: DateRange) -> Result<DashboardView, EngineError> {
        let request_id = Uuid::new_v4();
        let code = self.catalog.resolve(symbol)?;
        info!(%request_id, symbol = %code, start = %range.start, end = %range.end, "Rendering dashboard");

        let series = self.load(&code, range, request_id).await?;
        let enriched = self.engine.enrich(&series);
        let crossovers = detect_crossovers(&enriched.macd(), &enriched.signal());
        let enriched = enriched.with_crossovers(&crossovers);
        let layout = self.composer.compose(&enriched, &crossovers);

        info!(
            %request_id,
            symbol = %code,
            count = enriched.len(),
            crossovers = crossovers.len(),
            "Dashboard rendered"
        );
        Ok(DashboardView {
            request_id,
            symbol: code,
            range,
            sample: series.observations().iter().take(SAMPLE_ROWS).cloned().collect(),
            enriched,
            crossovers,
            layout,
        })
    }

    /// Trend projection `months` ahead plus the raw-series layout.
    pub async fn forecast(&self, symbol: &str, months: u32) -> Result<ForecastView, EngineError> {
        let request_id = Uuid::new_v4();
        let horizon_days = self.forecast.horizon_days(months)?;
        let code = self.catalog.resolve(symbol)?;
        info!(%request_id, symbol = %code, months, horizon_days, "Computing forecast");

        let series = self.load(&code, DateRange::until_today(self.start_date), request_id).await?;
        let forecast = linear_trend(&series, horizon_days)?;
        let raw_layout = self.composer.compose_raw_series(&series);
        let forecast_layout = self.composer.compose_forecast(&series, &forecast);

        Ok(ForecastView { request_id, symbol: code, months, forecast, raw_layout, forecast_layout })
    }

    /// Runs a single named indicator over the configured price field.
    pub async fn calculate_indicator(
        &self,
        symbol: &str,
        indicator_type: &str,
        parameters: &Value,
    ) -> Result<IndicatorResult, EngineError> {
        let request_id = Uuid::new_v4();
        let calculator = build_calculator(indicator_type, parameters, self.engine.params())?;
        let code = self.catalog.resolve(symbol)?;
        info!(%request_id, symbol = %code, indicator = %calculator.name(), "Calculating indicator");

        let series = self.load(&code, DateRange::until_today(self.start_date), request_id).await?;
        let lines = calculator.calculate(&series.values(self.engine.price_field()));
        Ok(IndicatorResult {
            indicator_name: calculator.name().to_string(),
            parameters: calculator.parameters(),
            dates: series.dates(),
            lines,
        })
    }

    // Read-through: only non-empty series are cached.
    async fn load(&self, code: &str, range: DateRange, request_id: Uuid) -> Result<PriceSeries, EngineError> {
        if self.cache_enabled {
            if let Some(series) = self.cache.read().await.get(code, &range) {
                debug!(%request_id, symbol = %code, "Series cache hit");
                return Ok(series);
            }
        }

        let series = match tokio::time::timeout(self.fetch_timeout, self.provider.fetch(code, &range)).await {
            Ok(result) => result.map_err(|e| {
                warn!(%request_id, symbol = %code, error_detail = ?e, "Price fetch failed");
                e
            })?,
            Err(_) => {
                let timeout_ms = self.fetch_timeout.as_millis() as u64;
                warn!(%request_id, symbol = %code, timeout_ms, "Price fetch timed out");
                return Err(DataFetchError::Timeout { symbol: code.to_string(), timeout_ms }.into());
            }
        };

        if series.is_empty() {
            warn!(%request_id, symbol = %code, "Provider returned no observations");
            return Err(EngineError::NoData { symbol: code.to_string() });
        }
        debug!(%request_id, symbol = %code, count = series.len(), "Fetched price series");

        if self.cache_enabled {
            self.cache.write().await.insert(code, range, series.clone());
        }
        Ok(series)
    }
}
