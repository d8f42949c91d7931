// Generates the DashboardService server/client stubs. The messages are
// hand-written prost types in src/services/messages.rs, so the service is
// described manually instead of through a .proto file.
use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::services::messages::{}", input))
        .output_type(format!("crate::services::messages::{}", output))
        .codec_path(CODEC)
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let dashboard_service = Service::builder()
        .name("DashboardService")
        .package("dashboard")
        .method(unary("get_dashboard", "GetDashboard", "DashboardRequest", "DashboardResponse"))
        .method(
            Method::builder()
                .name("stream_enriched_series")
                .route_name("StreamEnrichedSeries")
                .input_type("crate::services::messages::SeriesRequest")
                .output_type("crate::services::messages::EnrichedChunk")
                .codec_path(CODEC)
                .server_streaming()
                .build(),
        )
        .method(unary("calculate_indicator", "CalculateIndicator", "IndicatorRequest", "IndicatorResponse"))
        .method(unary("get_forecast", "GetForecast", "ForecastRequest", "ForecastResponse"))
        .method(unary("list_symbols", "ListSymbols", "ListSymbolsRequest", "ListSymbolsResponse"))
        .build();

    Builder::new().compile(&[dashboard_service]);
}
