//! Public types for the chart module: per-view options and the shared configuration object.

use crate::color::Rgb8;

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Single-column panel to the right of the plot.
    Right,
    /// Horizontal band above the plot, wrapping into rows.
    Top,
}

/// The two renderings of a dashboard pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Wide chart for desktop layouts.
    Full,
    /// Square chart with abbreviated labels for narrow screens.
    Compact,
}

/// Layout differences between the views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    /// width / height
    pub aspect_ratio: f64,
    pub legend: LegendPosition,
    /// Static stand-in for hover tooltips: show each series' latest value in the legend.
    pub tooltips: bool,
    /// Upper bound on x-axis day labels.
    pub max_x_labels: usize,
}

impl View {
    pub fn options(&self) -> ViewOptions {
        match self {
            View::Full => ViewOptions {
                aspect_ratio: 2.4,
                legend: LegendPosition::Right,
                tooltips: true,
                max_x_labels: 14,
            },
            View::Compact => ViewOptions {
                aspect_ratio: 1.0,
                legend: LegendPosition::Top,
                tooltips: false,
                max_x_labels: 7,
            },
        }
    }
}

/// Look and feel shared by every chart.
///
/// Build one (usually via `Default`) and pass it to each [`super::Chart::new`]; nothing in
/// this crate keeps chart settings in global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas width in pixels; height follows from the view's aspect ratio.
    pub width: u32,
    pub background: Rgb8,
    pub title_color: Rgb8,
    pub title_font_px: u32,
    pub legend_color: Rgb8,
    pub legend_font_px: u32,
    /// Side length of the square color box in legend entries.
    pub legend_box_px: u32,
    pub legend_padding_px: u32,
    pub tick_color: Rgb8,
    pub tick_font_px: u32,
    pub y_grid_color: Rgb8,
    pub x_grid_color: Rgb8,
    pub line_width: u32,
    /// 0 draws lines only.
    pub point_radius: u32,
    /// Locale tag for y-axis numbers (`en`, `de`, ...).
    pub locale: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            background: Rgb8::new(0x22, 0x2c, 0x3c),
            title_color: Rgb8::new(0xdd, 0xdd, 0xdd),
            title_font_px: 16,
            legend_color: Rgb8::new(0xdd, 0xdd, 0xdd),
            legend_font_px: 11,
            legend_box_px: 6,
            legend_padding_px: 6,
            tick_color: Rgb8::new(0x88, 0x88, 0x88),
            tick_font_px: 12,
            y_grid_color: Rgb8::new(0x44, 0x44, 0x44),
            x_grid_color: Rgb8::new(0x33, 0x33, 0x33),
            line_width: 1,
            point_radius: 0,
            locale: "en".into(),
        }
    }
}
