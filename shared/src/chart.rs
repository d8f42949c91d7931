// Declarative chart descriptors handed to an external renderer.
// Every layer is aligned to `ChartLayout::dates`; a layer starting at
// `start` covers dates[start..start + values.len()].
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::CrossoverKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub panels: Vec<Panel>,
    pub style: FigureStyle,
}

impl ChartLayout {
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Price,
    Macd,
    Rsi,
    Volume,
    RawSeries,
    Forecast,
}

/// One vertically stacked panel. Panels share the date axis; `index` is the
/// row from the top, starting at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub index: usize,
    pub kind: PanelKind,
    pub height: f64,
    pub y_title: String,
    pub x_title: Option<String>,
    pub y_range: Option<[f64; 2]>,
    pub layers: Vec<Layer>,
}

impl Panel {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Candlestick {
        name: String,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Line {
        name: String,
        start: usize,
        values: Vec<Option<f64>>,
        style: LineStyle,
    },
    Bar {
        name: String,
        values: Vec<f64>,
        coloring: BarColoring,
        outline: Option<LineStyle>,
        show_legend: bool,
    },
    Markers {
        name: String,
        kind: CrossoverKind,
        points: Vec<MarkerPoint>,
        color: String,
    },
    Band {
        name: String,
        start: usize,
        lower: Vec<f64>,
        upper: Vec<f64>,
        fill: String,
    },
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Candlestick { name, .. }
            | Layer::Line { name, .. }
            | Layer::Bar { name, .. }
            | Layer::Markers { name, .. }
            | Layer::Band { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

impl LineStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColoring {
    Uniform(String),
    PerBar(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint {
    pub position: usize,
    pub value: f64,
}

/// Figure-wide display hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub axis_color: String,
    pub axis_line_width: f64,
    pub hover_mode: String,
    pub legend_horizontal: bool,
    pub range_slider: bool,
}
