// Handler for the GetForecast RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::to_json;
use crate::dashboard::DashboardController;
use crate::services::{ForecastRequest, ForecastResponse};

pub async fn handle_get_forecast(
    req_payload: ForecastRequest,
    controller: Arc<DashboardController>,
) -> Result<Response<ForecastResponse>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, months = req_payload.months, "Handling ForecastRequest in dedicated handler");

    let view = controller.forecast(&req_payload.symbol, req_payload.months).await?;
    Ok(Response::new(ForecastResponse {
        request_id: view.request_id.to_string(),
        symbol: view.symbol.clone(),
        forecast_json: to_json(&view.forecast, "forecast")?,
        raw_layout_json: to_json(&view.raw_layout, "raw series layout")?,
        forecast_layout_json: to_json(&view.forecast_layout, "forecast layout")?,
    }))
}
