// DashboardService gRPC implementation. Each RPC is handled in its own
// sibling module; this file wires them to the generated trait.
use super::{
    DashboardRequest, DashboardResponse, DashboardService, EnrichedChunk, ForecastRequest, ForecastResponse,
    IndicatorRequest, IndicatorResponse, ListSymbolsRequest, ListSymbolsResponse, SeriesRequest,
};
use crate::dashboard::DashboardController;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod calculate_indicator;
pub mod get_dashboard;
pub mod get_forecast;
pub mod helpers;
pub mod list_symbols;
pub mod stream_enriched_series;

pub struct DashboardGrpcService {
    controller: Arc<DashboardController>,
}

impl DashboardGrpcService {
    pub fn new(controller: Arc<DashboardController>) -> Self {
        DashboardGrpcService { controller }
    }
}

#[tonic::async_trait]
impl DashboardService for DashboardGrpcService {
    async fn get_dashboard(&self, request: Request<DashboardRequest>) -> Result<Response<DashboardResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            start_date = %req_payload.start_date,
            end_date = %req_payload.end_date,
            "Received GetDashboardRequest, dispatching to handler."
        );
        get_dashboard::handle_get_dashboard(req_payload, self.controller.clone()).await
    }

    type StreamEnrichedSeriesStream = ReceiverStream<Result<EnrichedChunk, Status>>;
    async fn stream_enriched_series(
        &self,
        request: Request<SeriesRequest>,
    ) -> Result<Response<Self::StreamEnrichedSeriesStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            chunk_size = req_payload.chunk_size,
            "Received StreamEnrichedSeriesRequest, dispatching to handler."
        );
        stream_enriched_series::handle_stream_enriched_series(req_payload, self.controller.clone()).await
    }

    async fn calculate_indicator(&self, request: Request<IndicatorRequest>) -> Result<Response<IndicatorResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            indicator_type = %req_payload.indicator_type,
            parameters = %req_payload.parameters,
            "Received CalculateIndicatorRequest, dispatching to handler."
        );
        calculate_indicator::handle_calculate_indicator(req_payload, self.controller.clone()).await
    }

    async fn get_forecast(&self, request: Request<ForecastRequest>) -> Result<Response<ForecastResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(symbol = %req_payload.symbol, months = req_payload.months, "Received GetForecastRequest, dispatching to handler.");
        get_forecast::handle_get_forecast(req_payload, self.controller.clone()).await
    }

    async fn list_symbols(&self, _request: Request<ListSymbolsRequest>) -> Result<Response<ListSymbolsResponse>, Status> {
        tracing::info!("Received ListSymbolsRequest, dispatching to handler.");
        list_symbols::handle_list_symbols(self.controller.clone()).await
    }
}
