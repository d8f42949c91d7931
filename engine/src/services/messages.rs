// Wire messages of the dashboard.DashboardService gRPC API. Layouts and
// forecasts travel as JSON strings of the serde descriptors.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DashboardRequest {
    /// Display name or ticker code.
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    /// `%Y-%m-%d`; empty means the configured start date.
    #[prost(string, tag = "2")]
    pub start_date: ::prost::alloc::string::String,
    /// `%Y-%m-%d`; empty means today.
    #[prost(string, tag = "3")]
    pub end_date: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CrossoverMessage {
    #[prost(uint64, tag = "1")]
    pub position: u64,
    #[prost(string, tag = "2")]
    pub date: ::prost::alloc::string::String,
    /// "BUY" or "SELL"
    #[prost(string, tag = "3")]
    pub kind: ::prost::alloc::string::String,
    #[prost(double, tag = "4")]
    pub price: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DashboardResponse {
    #[prost(string, tag = "1")]
    pub request_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub layout_json: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub sample_json: ::prost::alloc::string::String,
    #[prost(uint64, tag = "6")]
    pub observation_count: u64,
    #[prost(message, repeated, tag = "7")]
    pub crossovers: ::prost::alloc::vec::Vec<CrossoverMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SeriesRequest {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    /// Rows per chunk; 0 selects the server default.
    #[prost(uint32, tag = "2")]
    pub chunk_size: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnrichedRow {
    #[prost(string, tag = "1")]
    pub date: ::prost::alloc::string::String,
    #[prost(double, tag = "2")]
    pub open: f64,
    #[prost(double, tag = "3")]
    pub high: f64,
    #[prost(double, tag = "4")]
    pub low: f64,
    #[prost(double, tag = "5")]
    pub close: f64,
    #[prost(double, tag = "6")]
    pub adjusted_close: f64,
    #[prost(double, tag = "7")]
    pub volume: f64,
    #[prost(double, tag = "8")]
    pub price: f64,
    #[prost(double, tag = "9")]
    pub ema_fast: f64,
    #[prost(double, tag = "10")]
    pub ema_slow: f64,
    #[prost(double, tag = "11")]
    pub macd: f64,
    #[prost(double, tag = "12")]
    pub signal: f64,
    #[prost(double, tag = "13")]
    pub histogram: f64,
    #[prost(double, optional, tag = "14")]
    pub rsi: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "15")]
    pub buy_marker: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "16")]
    pub sell_marker: ::core::option::Option<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnrichedChunk {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub rows: ::prost::alloc::vec::Vec<EnrichedRow>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndicatorRequest {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    /// "ema", "macd" or "rsi"
    #[prost(string, tag = "2")]
    pub indicator_type: ::prost::alloc::string::String,
    /// JSON object, e.g. {"period": 14}; empty uses the defaults.
    #[prost(string, tag = "3")]
    pub parameters: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndicatorLineMessage {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    /// NaN where the indicator is undefined.
    #[prost(double, repeated, tag = "2")]
    pub values: ::prost::alloc::vec::Vec<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndicatorResponse {
    #[prost(string, tag = "1")]
    pub indicator_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub parameters_json: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub dates: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub lines: ::prost::alloc::vec::Vec<IndicatorLineMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ForecastRequest {
    #[prost(string, tag = "1")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub months: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ForecastResponse {
    #[prost(string, tag = "1")]
    pub request_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub forecast_json: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub raw_layout_json: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub forecast_layout_json: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSymbolsRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SymbolEntryMessage {
    #[prost(string, tag = "1")]
    pub display_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub code: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSymbolsResponse {
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<SymbolEntryMessage>,
}
