// Engine configuration module
pub mod settings;
pub mod symbols;

pub use settings::{DataSettings, EngineSettings, ForecastSettings, IndicatorParams};
pub use symbols::{SymbolCatalog, SymbolEntry};
