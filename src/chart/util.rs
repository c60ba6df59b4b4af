//! Utility functions for chart drawing: colors, time axis coordinates, locale-aware ticks.

use crate::color::Rgb8;
use crate::models::ChartDataset;
use chrono::{DateTime, Duration, TimeZone, Utc};
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Plotters color for an `Rgb8`.
#[inline]
pub fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// X coordinate of a timestamp: fractional days since the Unix epoch, so that whole
/// numbers fall on UTC midnight and the mesh puts day ticks there.
pub fn day_coord(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0 / SECONDS_PER_DAY
}

/// Inverse of [`day_coord`], `None` when out of range.
pub fn from_day_coord(x: f64) -> Option<DateTime<Utc>> {
    if !x.is_finite() {
        return None;
    }
    let millis = (x * SECONDS_PER_DAY * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}

/// X-axis tick label in `ddd DD` form, e.g. `Mon 05`.
pub fn day_label(x: f64) -> String {
    from_day_coord(x)
        .map(|t| t.format("%a %d").to_string())
        .unwrap_or_default()
}

/// X range (in day coordinates) covering every point; the trailing `fallback_days`
/// before `now` when there is nothing to show. Never zero-width.
pub fn x_range(datasets: &[ChartDataset], now: DateTime<Utc>, fallback_days: i64) -> (f64, f64) {
    let mut xs = datasets.iter().flat_map(|d| d.data.iter()).map(|p| day_coord(p.t));
    let Some(first) = xs.next() else {
        return (day_coord(now - Duration::days(fallback_days)), day_coord(now));
    };
    let (mut lo, mut hi) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    (lo, hi)
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `de`, `fr`, `es`, `it`, `pt`, `nl`,
/// plus their `xx_YY` forms. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Whole milliseconds with locale grouping: `5,000` / `5.000`.
pub fn format_ms(v: f64, locale: &Locale) -> String {
    let r = v.round() as i64;
    if r < 0 {
        format!("-{}", r.unsigned_abs().to_formatted_string(locale))
    } else {
        r.to_formatted_string(locale)
    }
}

/// Width in pixels for the y-axis label area, sized to the widest tick label in
/// `0..=y_max`, clamped to a sensible range.
pub fn compute_left_label_area_px(y_max: f64, locale: &Locale, font_px: u32) -> u32 {
    let widest = [0.0, y_max / 2.0, y_max]
        .iter()
        .map(|v| estimate_text_width_px(&format_ms(*v, locale), font_px))
        .max()
        .unwrap_or(0);
    widest.saturating_add(18).clamp(40, 120)
}
