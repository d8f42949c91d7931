// Chart display options (colors, sizes, optional overlays)
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub show_emas: bool,
    pub show_markers: bool,
    /// Relative panel heights, top to bottom: price, MACD, RSI, volume.
    pub panel_heights: [f64; 4],
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub axis_color: String,
    pub axis_line_width: f64,
    pub colors: ChartColors,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            show_emas: true,
            show_markers: true,
            panel_heights: [0.8, 0.3, 0.3, 0.2],
            width: 1100,
            height: 800,
            background: "#0E1117".to_string(),
            axis_color: "white".to_string(),
            axis_line_width: 2.0,
            colors: ChartColors::default(),
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.panel_heights.iter().any(|h| !h.is_finite() || *h <= 0.0) {
            return Err(EngineError::ConfigError(format!("panel_heights must be positive, got {:?}", self.panel_heights)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::ConfigError("chart width and height must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub ema_fast: String,
    pub ema_slow: String,
    pub macd: String,
    pub signal: String,
    pub histogram_negative: String,
    pub histogram_positive: String,
    pub rsi: String,
    pub volume: String,
    pub volume_outline: String,
    pub buy_marker: String,
    pub sell_marker: String,
    pub raw_open: String,
    pub raw_close: String,
    pub forecast: String,
    pub forecast_band: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        ChartColors {
            ema_fast: "dodgerblue".to_string(),
            ema_slow: "whitesmoke".to_string(),
            macd: "darkorange".to_string(),
            signal: "cyan".to_string(),
            histogram_negative: "red".to_string(),
            histogram_positive: "green".to_string(),
            rsi: "gold".to_string(),
            volume: "lightskyblue".to_string(),
            volume_outline: "firebrick".to_string(),
            buy_marker: "#26a69a".to_string(),
            sell_marker: "#ef5350".to_string(),
            raw_open: "#636efa".to_string(),
            raw_close: "#ef553b".to_string(),
            forecast: "#0072B2".to_string(),
            forecast_band: "rgba(0, 114, 178, 0.2)".to_string(),
        }
    }
}
