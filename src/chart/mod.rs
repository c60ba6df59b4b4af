//! Chart rendering: multi-line latency charts over time, to **SVG** or **PNG**.
//!
//! - One [`ChartConfig`] shared by reference across charts (colors, fonts, line width)
//! - Two views per dashboard: `Full` (wide, legend right) and `Compact` (square, legend top)
//! - Time x-axis with day ticks, y-axis fixed from 0 to the metric's ceiling
//!
//! A [`Chart`] owns its datasets and the file it draws to. [`plot_is_it_up`] wires a
//! fetch into a full/compact pair.

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{ChartConfig, LegendPosition, View, ViewOptions};

use crate::api::Client;
use crate::models::{ChartDataset, FetchResult, Metric};
use crate::transform::{DEFAULT_WINDOW_DAYS, TransformOptions, abbreviate_labels, build_datasets};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use log::{info, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Once;

use legend::{LegendItem, draw_legend_panel, estimate_top_legend_height_px};
use util::{
    compute_left_label_area_px, day_coord, day_label, format_ms, map_locale, rgb, x_range,
};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // src/chart/mod.rs → project root → assets/DejaVuSans.ttf
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// A chart bound to an output file (its "canvas").
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    canvas: PathBuf,
    view: View,
    options: ViewOptions,
    config: &'a ChartConfig,
    now: DateTime<Utc>,
    /// Top of the y-axis in milliseconds.
    pub y_max: f64,
    /// Caption; empty draws none.
    pub title: String,
    pub datasets: Vec<ChartDataset>,
}

impl<'a> Chart<'a> {
    /// Create an empty chart and draw it once (axes, no series).
    ///
    /// `now` anchors the x-axis while there is no data to span.
    pub fn new<P: Into<PathBuf>>(
        canvas: P,
        view: View,
        y_max: f64,
        now: DateTime<Utc>,
        config: &'a ChartConfig,
    ) -> Result<Self> {
        let chart = Self {
            canvas: canvas.into(),
            view,
            options: view.options(),
            config,
            now,
            y_max,
            title: String::new(),
            datasets: Vec::new(),
        };
        chart.update()?;
        Ok(chart)
    }

    pub fn canvas(&self) -> &Path {
        &self.canvas
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Pixel size: configured width, height from the view's aspect ratio.
    pub fn size(&self) -> (u32, u32) {
        let w = self.config.width.max(1);
        let h = ((w as f64) / self.options.aspect_ratio).round().max(1.0) as u32;
        (w, h)
    }

    /// Redraw to the canvas. The backend is chosen by extension: `.svg` or bitmap.
    pub fn update(&self) -> Result<()> {
        ensure_fonts_registered();
        let (width, height) = self.size();
        let path_string = self.canvas.to_string_lossy().into_owned();

        let drawn = if self.canvas.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_chart(root, self)
        } else {
            let root =
                BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_chart(root, self)
        };
        drawn.with_context(|| format!("render {}", self.canvas.display()))
    }
}

/// The full-size and compact charts of one dashboard panel.
#[derive(Debug, Clone)]
pub struct ChartPair<'a> {
    pub full: Chart<'a>,
    pub compact: Chart<'a>,
    fetched: bool,
}

impl<'a> ChartPair<'a> {
    /// Create both (empty) charts with the metric's y ceiling.
    pub fn new(
        full_canvas: &Path,
        compact_canvas: &Path,
        metric: Metric,
        now: DateTime<Utc>,
        config: &'a ChartConfig,
    ) -> Result<Self> {
        let y_max = metric.y_axis_max();
        Ok(Self {
            full: Chart::new(full_canvas, View::Full, y_max, now, config)?,
            compact: Chart::new(compact_canvas, View::Compact, y_max, now, config)?,
            fetched: false,
        })
    }

    /// True while neither view has a dataset.
    pub fn is_empty(&self) -> bool {
        self.full.datasets.is_empty() && self.compact.datasets.is_empty()
    }

    /// True once a fetch result has been applied, even one that yielded no datasets.
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    /// Add one dataset per location to each view (each view gets its own copy),
    /// abbreviate the compact labels, set titles, and redraw both.
    pub fn apply(
        &mut self,
        results: &FetchResult,
        opts: &TransformOptions,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let datasets = build_datasets(results, opts, now);
        self.full.datasets.extend(datasets.iter().cloned());
        self.compact.datasets.extend(datasets);
        abbreviate_labels(&mut self.compact.datasets);

        let title = opts.metric.title();
        for chart in [&mut self.full, &mut self.compact] {
            chart.title = title.clone();
            chart.now = now;
        }
        self.fetched = true;
        self.full.update()?;
        self.compact.update()
    }
}

/// Fetch `url` and render a full/compact chart pair for `opts.metric`.
///
/// Both charts are drawn empty first. When the fetch fails (network, non-2xx, bad JSON)
/// the failure is logged and the empty pair is returned unchanged; only rendering and
/// file errors are returned as `Err`.
pub fn plot_is_it_up<'a>(
    client: &Client,
    url: &str,
    full_canvas: &Path,
    compact_canvas: &Path,
    opts: &TransformOptions,
    config: &'a ChartConfig,
    now: DateTime<Utc>,
) -> Result<ChartPair<'a>> {
    let mut pair = ChartPair::new(full_canvas, compact_canvas, opts.metric, now, config)?;
    match client.fetch(url) {
        Ok(results) => {
            info!("{} locations from {}", results.data.len(), url);
            pair.apply(&results, opts, now)?;
        }
        Err(e) => {
            warn!("No data from {url}: {e}");
        }
    }
    Ok(pair)
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &Chart) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: i32 = 12;
    let cfg = chart.config;
    let opts = chart.options;
    let locale = map_locale(&cfg.locale);
    let y_max = if chart.y_max > 0.0 { chart.y_max } else { 1.0 };

    root.fill(&rgb(cfg.background))
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 1) Legend texts & gutters
    // ----------------------------
    let legend_items: Vec<LegendItem> = chart
        .datasets
        .iter()
        .map(|ds| {
            let label = match (opts.tooltips, ds.latest()) {
                (true, Some(p)) => format!("{} {} ms", ds.label, format_ms(p.y, locale)),
                _ => ds.label.clone(),
            };
            (label, rgb(ds.color))
        })
        .collect();

    let left_label_px = compute_left_label_area_px(y_max, locale, cfg.tick_font_px);
    let axis_x_start_px = MARGIN + left_label_px as i32;
    let (root_w, _) = root.dim_in_pixel();

    // ----------------------------
    // 2) Split drawing areas
    // ----------------------------
    let (plot_area, legend_area) = match opts.legend {
        LegendPosition::Right => {
            let (plot, legend) = root.split_horizontally((82).percent_width());
            (plot, legend)
        }
        LegendPosition::Top => {
            let labels: Vec<String> = legend_items.iter().map(|(l, _)| l.clone()).collect();
            let h = estimate_top_legend_height_px(&labels, axis_x_start_px, root_w as i32, cfg);
            let (legend, plot) = root.split_vertically(h);
            (plot, legend)
        }
    };

    // ----------------------------
    // 3) Axes
    // ----------------------------
    let (x_min, x_max) = x_range(&chart.datasets, chart.now, DEFAULT_WINDOW_DAYS);
    let title_color = rgb(cfg.title_color);
    let title_style =
        TextStyle::from((FontFamily::SansSerif, cfg.title_font_px)).color(&title_color);

    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, cfg.tick_font_px * 2 + 8);
    let title = chart.title.trim();
    if !title.is_empty() {
        builder.caption(title, title_style);
    }
    let mut ctx = builder
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let tick_color = rgb(cfg.tick_color);
    let tick_style = TextStyle::from((FontFamily::SansSerif, cfg.tick_font_px)).color(&tick_color);
    let x_label_count = (((x_max - x_min).ceil() as usize) + 1).clamp(2, opts.max_x_labels);
    let x_label_fmt = |x: &f64| day_label(*x);
    let y_label_fmt = |v: &f64| format_ms(*v, locale);

    ctx.configure_mesh()
        .disable_x_mesh()
        .y_max_light_lines(0)
        .bold_line_style(rgb(cfg.y_grid_color))
        .axis_style(tick_color)
        .x_labels(x_label_count)
        .y_labels(6)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(tick_style)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Vertical grid line at every UTC midnight.
    let x_grid = rgb(cfg.x_grid_color);
    let first_day = x_min.ceil() as i64;
    let last_day = x_max.floor() as i64;
    ctx.draw_series((first_day..=last_day).map(|d| {
        PathElement::new(vec![(d as f64, 0.0), (d as f64, y_max)], x_grid.stroke_width(1))
    }))
    .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 4) Series
    // ----------------------------
    for ds in &chart.datasets {
        let color = rgb(ds.color);
        let mut pts: Vec<(f64, f64)> = ds
            .data
            .iter()
            .map(|p| (day_coord(p.t), p.y.clamp(0.0, y_max)))
            .collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0));

        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: cfg.line_width,
        };
        ctx.draw_series(LineSeries::new(pts.clone(), style))
            .map_err(|e| anyhow!("{:?}", e))?;
        if cfg.point_radius > 0 {
            let r = cfg.point_radius as i32;
            ctx.draw_series(pts.iter().map(|(x, y)| Circle::new((*x, *y), r, color.filled())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    // ----------------------------
    // 5) Legend & present
    // ----------------------------
    draw_legend_panel(&legend_area, &legend_items, opts.legend, axis_x_start_px, cfg)?;

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    legend_area.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
