// Price history loading and caching
pub mod csv_parser;
pub mod market_data;
pub mod provider;

pub use market_data::SeriesCache;
pub use provider::{CsvPriceProvider, DateRange, InMemoryPriceProvider, PriceProvider};
