use thiserror::Error;

/// Failures of the external price source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataFetchError {
    #[error("No price data source for symbol '{symbol}'")]
    NotFound { symbol: String },

    #[error("Fetching '{symbol}' timed out after {timeout_ms} ms")]
    Timeout { symbol: String, timeout_ms: u64 },

    #[error("Malformed price data for '{symbol}': {reason}")]
    Malformed { symbol: String, reason: String },

    #[error("Price source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data fetch error: {0}")]
    DataFetch(#[from] DataFetchError),

    #[error("No data for symbol '{symbol}'")]
    NoData { symbol: String },

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// A request argument outside its accepted range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err);
        match err {
            EngineError::ConfigError(msg) => tonic::Status::failed_precondition(format!("Configuration error: {}", msg)),
            EngineError::DataFetch(fetch) => match fetch {
                DataFetchError::NotFound { .. } => tonic::Status::not_found(fetch.to_string()),
                DataFetchError::Timeout { .. } => tonic::Status::deadline_exceeded(fetch.to_string()),
                DataFetchError::Malformed { .. } => tonic::Status::invalid_argument(fetch.to_string()),
                DataFetchError::Unavailable(_) => tonic::Status::unavailable(fetch.to_string()),
            },
            EngineError::NoData { symbol } => tonic::Status::not_found(format!("No data for symbol '{}'", symbol)),
            EngineError::InvalidSymbol(msg) => tonic::Status::invalid_argument(format!("Invalid symbol: {}", msg)),
            EngineError::InvalidRequest(msg) => tonic::Status::invalid_argument(format!("Invalid request: {}", msg)),
            EngineError::IndicatorError(msg) => tonic::Status::invalid_argument(format!("Indicator calculation error: {}", msg)),
            EngineError::ProcessingError(msg) => tonic::Status::internal(format!("Processing error: {}", msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_maps_to_not_found() {
        let status: tonic::Status = EngineError::NoData { symbol: "GOOG".to_string() }.into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert!(status.message().contains("GOOG"));
    }

    #[test]
    fn test_timeout_maps_to_deadline_exceeded() {
        let err = EngineError::from(DataFetchError::Timeout { symbol: "MSFT".to_string(), timeout_ms: 250 });
        let status: tonic::Status = err.into();
        assert_eq!(status.code(), tonic::Code::DeadlineExceeded);
        assert!(status.message().contains("250 ms"));
    }

    #[test]
    fn test_config_error_maps_to_failed_precondition() {
        let status: tonic::Status = EngineError::ConfigError("fast_span must be positive".to_string()).into();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }

    #[test]
    fn test_invalid_request_maps_to_invalid_argument() {
        let status: tonic::Status = EngineError::InvalidRequest("months must be between 1 and 4, got 7".to_string()).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("got 7"));
    }
}
