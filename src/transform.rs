//! Reshape fetched location series into chart datasets.

use crate::color::{DEFAULT_BASE_COLOR, Rgb8, hue_wheel};
use crate::models::{ChartDataset, FetchResult, LocationSeries, Metric, Point};
use chrono::{DateTime, Duration, Utc};
use log::debug;

/// Locations left off the dashboard by default.
pub const DEFAULT_IGNORED: [&str; 2] = ["bogota", "bangkok"];

/// Trailing window shown by default, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

/// Short display names for the compact view, keyed by location key.
pub const CITY_ABBREVIATIONS: [(&str, &str); 12] = [
    ("tokyo", "Tokyo"),
    ("sydney", "SYD"),
    ("stockholm", "STO"),
    ("singapore", "SGP"),
    ("bangkok", "BKK"),
    ("newyork", "NYC"),
    ("oslo", "OSL"),
    ("frankfurt", "FRA"),
    ("seattle", "SEA"),
    ("bogota", "Bogota"),
    ("bangalore", "Bangalore"),
    ("london", "LON"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    pub metric: Metric,
    /// Keep only points strictly newer than `now - window`. `None` keeps everything.
    pub window: Option<Duration>,
    /// Location keys to skip.
    pub ignore: Vec<String>,
    pub base_color: Rgb8,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            window: Some(Duration::days(DEFAULT_WINDOW_DAYS)),
            ignore: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
            base_color: DEFAULT_BASE_COLOR,
        }
    }
}

impl TransformOptions {
    /// Defaults for the given metric.
    pub fn for_metric(metric: Metric) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }
}

/// Look up the compact-view abbreviation for a location key.
pub fn abbreviate(loc: &str) -> Option<&'static str> {
    CITY_ABBREVIATIONS
        .iter()
        .find(|(key, _)| *key == loc)
        .map(|(_, short)| *short)
}

/// Rewrite labels to their abbreviations; unmapped labels stay as they are.
pub fn abbreviate_labels(datasets: &mut [ChartDataset]) {
    for ds in datasets.iter_mut() {
        if let Some(short) = abbreviate(&ds.label) {
            ds.label = short.to_string();
        }
    }
}

/// Project one series onto `{t, metric}` points, dropping points at or before `cutoff`.
pub fn select_points(
    series: &LocationSeries,
    metric: Metric,
    cutoff: Option<DateTime<Utc>>,
) -> Vec<Point> {
    series
        .data
        .iter()
        .filter(|m| cutoff.is_none_or(|c| m.time > c))
        .map(|m| Point {
            t: m.time,
            y: metric.select(m),
        })
        .collect()
}

/// Build one dataset per (non-ignored) location, in fetched order.
///
/// One color is generated per fetched series and assigned by the series' index, so a
/// location keeps its color whether or not its neighbours are ignored.
pub fn build_datasets(
    result: &FetchResult,
    opts: &TransformOptions,
    now: DateTime<Utc>,
) -> Vec<ChartDataset> {
    let colors = hue_wheel(result.data.len(), opts.base_color);
    // A window reaching past the representable range means no cutoff.
    let cutoff = opts.window.and_then(|w| now.checked_sub_signed(w));

    result
        .data
        .iter()
        .zip(colors)
        .filter(|(series, _)| {
            let skip = opts.ignore.iter().any(|i| *i == series.loc);
            if skip {
                debug!("skipping ignored location {}", series.loc);
            }
            !skip
        })
        .map(|(series, color)| ChartDataset {
            data: select_points(series, opts.metric, cutoff),
            color,
            label: series.loc.clone(),
        })
        .collect()
}
