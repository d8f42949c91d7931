// Handler for the ListSymbols RPC
use std::sync::Arc;
use tonic::{Response, Status};

use crate::dashboard::DashboardController;
use crate::services::{ListSymbolsResponse, SymbolEntryMessage};

pub async fn handle_list_symbols(controller: Arc<DashboardController>) -> Result<Response<ListSymbolsResponse>, Status> {
    let entries = controller
        .list_symbols()
        .iter()
        .map(|entry| SymbolEntryMessage { display_name: entry.display_name.clone(), code: entry.code.clone() })
        .collect();
    Ok(Response::new(ListSymbolsResponse { entries }))
}
