// gRPC surface of the engine. Server and client stubs are generated by
// build.rs; the message types live in `messages`.
pub mod dashboard_service;
pub mod messages;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/dashboard.DashboardService.rs"));
}

pub use generated::dashboard_service_client::DashboardServiceClient;
pub use generated::dashboard_service_server::{DashboardService, DashboardServiceServer};
pub use messages::*;
