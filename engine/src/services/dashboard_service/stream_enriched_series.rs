// Handler for the StreamEnrichedSeries RPC
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::{chunk_size, to_enriched_row};
use crate::dashboard::DashboardController;
use crate::services::{EnrichedChunk, EnrichedRow, SeriesRequest};

pub async fn handle_stream_enriched_series(
    req_payload: SeriesRequest,
    controller: Arc<DashboardController>,
) -> Result<Response<ReceiverStream<Result<EnrichedChunk, Status>>>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, chunk_size = req_payload.chunk_size, "Handling SeriesRequest in dedicated handler");

    // Failures before the first chunk are reported as the RPC status.
    let view = controller.render(&req_payload.symbol).await?;
    let rows: Vec<EnrichedRow> = view.enriched.points().iter().map(to_enriched_row).collect();
    let size = chunk_size(req_payload.chunk_size);

    let (tx, rx) = mpsc::channel(4);
    let symbol = view.symbol;
    let request_id = view.request_id;

    tokio::spawn(async move {
        let total = rows.len();
        for chunk in rows.chunks(size) {
            let message = EnrichedChunk { symbol: symbol.clone(), rows: chunk.to_vec() };
            if let Err(e) = tx.send(Ok(message)).await {
                tracing::error!(%request_id, symbol = %symbol, error = ?e, "Client dropped enriched series stream");
                return;
            }
        }
        tracing::debug!(%request_id, symbol = %symbol, count = total, "Streamed enriched series");
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
