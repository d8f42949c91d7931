// Chart layout composition. Produces renderer-agnostic descriptors only;
// nothing here performs I/O.
pub mod options;

pub use options::{ChartColors, ChartOptions};

use shared::chart::{BarColoring, ChartLayout, FigureStyle, Layer, LineStyle, MarkerPoint, Panel, PanelKind};
use shared::models::{Crossover, CrossoverKind, PriceSeries};

use crate::forecast::Forecast;
use crate::models::EnrichedSeries;

const RSI_BAND: [f64; 2] = [25.0, 75.0];
const RSI_PADDING: f64 = 5.0;

/// RSI y-axis range: the [25, 75] band, widened to `min − 5` / `max + 5`
/// on whichever side the observed values leave it.
pub fn rsi_axis_range(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return RSI_BAND;
    }
    let lower = if min > RSI_BAND[0] { RSI_BAND[0] } else { min - RSI_PADDING };
    let upper = if max < RSI_BAND[1] { RSI_BAND[1] } else { max + RSI_PADDING };
    [lower, upper]
}

#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    options: ChartOptions,
}

impl ChartComposer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Four stacked panels on a shared date axis: price, MACD, RSI, volume.
    pub fn compose(&self, enriched: &EnrichedSeries, crossovers: &[Crossover]) -> ChartLayout {
        ChartLayout {
            title: format!("{} - Dashboard", enriched.symbol()),
            dates: enriched.dates(),
            panels: vec![
                self.price_panel(enriched, crossovers),
                self.macd_panel(enriched),
                self.rsi_panel(enriched),
                self.volume_panel(enriched),
            ],
            style: self.figure_style(false),
        }
    }

    fn figure_style(&self, range_slider: bool) -> FigureStyle {
        FigureStyle {
            width: self.options.width,
            height: self.options.height,
            background: self.options.background.clone(),
            axis_color: self.options.axis_color.clone(),
            axis_line_width: self.options.axis_line_width,
            hover_mode: "x unified".to_string(),
            legend_horizontal: true,
            range_slider,
        }
    }

    fn panel(&self, index: usize, kind: PanelKind, y_title: &str, layers: Vec<Layer>) -> Panel {
        Panel {
            index,
            kind,
            height: self.options.panel_heights[index],
            y_title: y_title.to_string(),
            x_title: None,
            y_range: None,
            layers,
        }
    }

    fn line(name: &str, start: usize, values: Vec<Option<f64>>, color: &str, width: f64) -> Layer {
        Layer::Line { name: name.to_string(), start, values, style: LineStyle::new(color, width) }
    }

    fn price_panel(&self, enriched: &EnrichedSeries, crossovers: &[Crossover]) -> Panel {
        let colors = &self.options.colors;
        let params = enriched.params();
        let mut layers = vec![Layer::Candlestick {
            name: "Candlestick Chart".to_string(),
            open: enriched.column(|p| p.observation.open),
            high: enriched.column(|p| p.observation.high),
            low: enriched.column(|p| p.observation.low),
            close: enriched.column(|p| p.observation.close),
        }];

        if self.options.show_emas {
            layers.push(Self::line(
                &format!("{}-period EMA", params.fast_span),
                0,
                enriched.column(|p| p.ema_fast.is_finite().then_some(p.ema_fast)),
                &colors.ema_fast,
                2.0,
            ));
            layers.push(Self::line(
                &format!("{}-period EMA", params.slow_span),
                0,
                enriched.column(|p| p.ema_slow.is_finite().then_some(p.ema_slow)),
                &colors.ema_slow,
                2.0,
            ));
        }

        if self.options.show_markers {
            for (kind, name, color) in [
                (CrossoverKind::Buy, "Buy", &colors.buy_marker),
                (CrossoverKind::Sell, "Sell", &colors.sell_marker),
            ] {
                let points = crossovers
                    .iter()
                    .filter(|c| c.kind == kind)
                    .filter_map(|c| {
                        enriched.points().get(c.position).map(|p| MarkerPoint { position: c.position, value: p.price })
                    })
                    .collect();
                layers.push(Layer::Markers { name: name.to_string(), kind, points, color: color.clone() });
            }
        }

        self.panel(0, PanelKind::Price, "Price ($)", layers)
    }

    fn macd_panel(&self, enriched: &EnrichedSeries) -> Panel {
        let colors = &self.options.colors;
        let histogram = enriched.column(|p| p.histogram);
        let bar_colors = histogram
            .iter()
            .map(|h| if *h < 0.0 { colors.histogram_negative.clone() } else { colors.histogram_positive.clone() })
            .collect();

        let layers = vec![
            Layer::Bar {
                name: "Histogram".to_string(),
                values: histogram,
                coloring: BarColoring::PerBar(bar_colors),
                outline: None,
                show_legend: true,
            },
            Self::line("MACD", 0, enriched.column(|p| p.macd.is_finite().then_some(p.macd)), &colors.macd, 2.5),
            Self::line("Signal", 0, enriched.column(|p| p.signal.is_finite().then_some(p.signal)), &colors.signal, 2.5),
        ];
        self.panel(1, PanelKind::Macd, "MACD", layers)
    }

    fn rsi_panel(&self, enriched: &EnrichedSeries) -> Panel {
        let start = enriched.params().rsi_display_start().min(enriched.len());
        let values: Vec<Option<f64>> = enriched.points()[start..].iter().map(|p| p.rsi).collect();
        let range = rsi_axis_range(values.iter().flatten().copied());

        let mut panel = self.panel(
            2,
            PanelKind::Rsi,
            "RSI",
            vec![Self::line("RSI", start, values, &self.options.colors.rsi, 2.0)],
        );
        panel.y_range = Some(range);
        panel
    }

    fn volume_panel(&self, enriched: &EnrichedSeries) -> Panel {
        let colors = &self.options.colors;
        let layers = vec![Layer::Bar {
            name: "Volume".to_string(),
            values: enriched.column(|p| p.observation.volume),
            coloring: BarColoring::Uniform(colors.volume.clone()),
            outline: Some(LineStyle::new(colors.volume_outline.as_str(), 0.1)),
            show_legend: false,
        }];
        let mut panel = self.panel(3, PanelKind::Volume, "Volume ($)", layers);
        panel.x_title = Some("Date".to_string());
        panel
    }

    /// Open and close lines of the raw series with a range slider.
    pub fn compose_raw_series(&self, series: &PriceSeries) -> ChartLayout {
        let colors = &self.options.colors;
        let open = series.observations().iter().map(|o| Some(o.open)).collect();
        let close = series.observations().iter().map(|o| Some(o.close)).collect();
        ChartLayout {
            title: "Time Series data with Rangeslider".to_string(),
            dates: series.dates(),
            panels: vec![Panel {
                index: 0,
                kind: PanelKind::RawSeries,
                height: 1.0,
                y_title: "Price ($)".to_string(),
                x_title: Some("Date".to_string()),
                y_range: None,
                layers: vec![
                    Self::line("stock_open", 0, open, &colors.raw_open, 2.0),
                    Self::line("stock_close", 0, close, &colors.raw_close, 2.0),
                ],
            }],
            style: self.figure_style(true),
        }
    }

    /// Observed closes, fitted trend with projection, and its uncertainty band.
    pub fn compose_forecast(&self, series: &PriceSeries, forecast: &Forecast) -> ChartLayout {
        let colors = &self.options.colors;
        let actual = series.observations().iter().map(|o| Some(o.close)).collect();
        let trend = forecast.points.iter().map(|p| Some(p.yhat)).collect();
        ChartLayout {
            title: format!("{} - Forecast ({} days)", forecast.symbol, forecast.horizon_days),
            dates: forecast.points.iter().map(|p| p.date).collect(),
            panels: vec![Panel {
                index: 0,
                kind: PanelKind::Forecast,
                height: 1.0,
                y_title: "Price ($)".to_string(),
                x_title: Some("Date".to_string()),
                y_range: None,
                layers: vec![
                    Layer::Band {
                        name: "Uncertainty".to_string(),
                        start: 0,
                        lower: forecast.points.iter().map(|p| p.yhat_lower).collect(),
                        upper: forecast.points.iter().map(|p| p.yhat_upper).collect(),
                        fill: colors.forecast_band.clone(),
                    },
                    Self::line("Actual", 0, actual, &colors.raw_close, 1.0),
                    Self::line("Trend", 0, trend, &colors.forecast, 2.0),
                ],
            }],
            style: self.figure_style(true),
        }
    }
}
