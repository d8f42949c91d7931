// Handler for the GetDashboard RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::{parse_request_date, to_crossover_message, to_json};
use crate::dashboard::DashboardController;
use crate::data::DateRange;
use crate::services::{DashboardRequest, DashboardResponse};

pub async fn handle_get_dashboard(
    req_payload: DashboardRequest,
    controller: Arc<DashboardController>,
) -> Result<Response<DashboardResponse>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, "Handling GetDashboardRequest in dedicated handler");

    let start = parse_request_date(&req_payload.start_date, "start_date")?;
    let end = parse_request_date(&req_payload.end_date, "end_date")?;

    let view = match (start, end) {
        (None, None) => controller.render(&req_payload.symbol).await?,
        (start, end) => {
            let default_range = DateRange::until_today(controller.start_date());
            let range = DateRange::new(start.unwrap_or(default_range.start), end.unwrap_or(default_range.end))?;
            controller.render_range(&req_payload.symbol, range).await?
        }
    };

    let crossovers = view.crossovers.iter().map(|c| to_crossover_message(c, &view.enriched)).collect();
    Ok(Response::new(DashboardResponse {
        request_id: view.request_id.to_string(),
        symbol: view.symbol.clone(),
        title: view.layout.title.clone(),
        layout_json: to_json(&view.layout, "chart layout")?,
        sample_json: to_json(&view.sample, "sample rows")?,
        observation_count: view.enriched.len() as u64,
        crossovers,
    }))
}
