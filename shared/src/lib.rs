// Data models shared between the engine and any chart renderer.
pub mod chart;
pub mod models;
