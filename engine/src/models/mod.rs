// Engine-side data models. Wire and renderer-facing models live in the
// `shared` crate.
pub mod enriched;

pub use enriched::{EnrichedPoint, EnrichedSeries};
