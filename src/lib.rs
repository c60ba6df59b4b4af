//! uptime_charts
//!
//! A small Rust library for turning uptime-monitor latency measurements into charts.
//! Pairs with the `uptime-charts` CLI.
//!
//! ### Features
//! - Fetch per-city measurement series from a JSON endpoint
//! - Pick HTTP GET transfer time or connect time, keep a trailing window (14 days by default)
//! - Evenly spaced series colors around the HSL wheel
//! - Render a full-size and a compact SVG/PNG chart from the same data
//! - Per-city summary statistics and CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use std::path::Path;
//! use uptime_charts::chart::{ChartConfig, plot_is_it_up};
//! use uptime_charts::{Client, Metric, TransformOptions};
//!
//! let client = Client::new()?;
//! let config = ChartConfig::default();
//! let pair = plot_is_it_up(
//!     &client,
//!     "https://example.com/api/isitup",
//!     Path::new("get.svg"),
//!     Path::new("get-small.svg"),
//!     &TransformOptions::for_metric(Metric::Get),
//!     &config,
//!     chrono::Utc::now(),
//! )?;
//! let stats = uptime_charts::stats::location_summary(&pair.full.datasets);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod color;
pub mod models;
pub mod stats;
pub mod storage;
pub mod transform;

pub use api::{Client, FetchError};
pub use models::{ChartDataset, FetchResult, LocationSeries, Measurement, Metric, Point};
pub use transform::TransformOptions;
