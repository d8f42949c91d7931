// Engine library root
// Indicator pipeline (indicators, signals, chart), its orchestration
// (dashboard) and the gRPC surface (services).

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod forecast;
pub mod indicators;
pub mod models;
pub mod services;
pub mod signals;
