// Handler for the CalculateIndicator RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::{to_indicator_line_message, to_json};
use crate::dashboard::DashboardController;
use crate::error::EngineError;
use crate::services::{IndicatorRequest, IndicatorResponse};

pub async fn handle_calculate_indicator(
    req_payload: IndicatorRequest,
    controller: Arc<DashboardController>,
) -> Result<Response<IndicatorResponse>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, indicator_type = %req_payload.indicator_type, "Handling CalculateIndicatorRequest in dedicated handler");

    let params: serde_json::Value = if req_payload.parameters.trim().is_empty() {
        serde_json::Value::Null
    } else {
        match serde_json::from_str(&req_payload.parameters) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(
                    indicator_type = %req_payload.indicator_type,
                    parameters = %req_payload.parameters,
                    error_detail = ?e,
                    "Invalid JSON parameters for indicator (handler)"
                );
                return Err(EngineError::IndicatorError(format!(
                    "Invalid JSON parameters for indicator '{}': {}",
                    req_payload.indicator_type, e
                ))
                .into());
            }
        }
    };

    let result = controller
        .calculate_indicator(&req_payload.symbol, &req_payload.indicator_type, &params)
        .await?;

    Ok(Response::new(IndicatorResponse {
        indicator_name: result.indicator_name.clone(),
        parameters_json: to_json(&result.parameters, "indicator parameters")?,
        dates: result.dates.iter().map(|d| d.to_string()).collect(),
        lines: result.lines.iter().map(to_indicator_line_message).collect(),
    }))
}
