use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which probe result a chart displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// HTTP GET transfer time (`transfer` field).
    #[default]
    Get,
    /// TCP connect time (`connect` field).
    Connect,
}

impl Metric {
    /// Pick this metric's value out of a measurement.
    pub fn select(&self, m: &Measurement) -> f64 {
        match self {
            Metric::Get => m.transfer,
            Metric::Connect => m.connect,
        }
    }

    /// Fixed y-axis ceiling in milliseconds.
    pub fn y_axis_max(&self) -> f64 {
        match self {
            Metric::Get => 5000.0,
            Metric::Connect => 500.0,
        }
    }

    /// Chart title for this metric, e.g. `GET in milliseconds`.
    pub fn title(&self) -> String {
        format!("{} in milliseconds", self)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Get => f.write_str("GET"),
            Metric::Connect => f.write_str("CONNECT"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Metric::Get),
            "connect" => Ok(Metric::Connect),
            other => Err(format!("unknown metric: {other} (expected GET or CONNECT)")),
        }
    }
}

/// One probe sample for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Accepts RFC 3339 strings or epoch milliseconds.
    #[serde(deserialize_with = "de_time_from_string_or_millis")]
    pub time: DateTime<Utc>,
    pub transfer: f64,
    pub connect: f64,
}

/// All samples for one monitored location, e.g. `loc = "sydney"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSeries {
    pub loc: String,
    #[serde(default)]
    pub data: Vec<Measurement>,
}

/// Top-level response body of the measurement endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub data: Vec<LocationSeries>,
}

/// A single plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub t: DateTime<Utc>,
    pub y: f64,
}

/// Rendering unit for one line on a chart.
///
/// Datasets are plain data: `clone()` is the full structural copy handed to each view,
/// so relabeling one view never touches another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub data: Vec<Point>,
    pub color: crate::color::Rgb8,
    pub label: String,
}

impl ChartDataset {
    /// Most recent point by timestamp.
    pub fn latest(&self) -> Option<&Point> {
        self.data.iter().max_by_key(|p| p.t)
    }
}

/// Serde helper: parse a timestamp from either an RFC 3339 string or epoch milliseconds.
fn de_time_from_string_or_millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct TimeVisitor;

    impl<'de> Visitor<'de> for TimeVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an RFC 3339 timestamp string or epoch milliseconds")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Utc.timestamp_millis_opt(v)
                .single()
                .ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = i64::try_from(v).map_err(E::custom)?;
            self.visit_i64(v)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !v.is_finite() {
                return Err(E::custom("non-finite timestamp"));
            }
            self.visit_i64(v.round() as i64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(E::custom)
        }
    }

    deserializer.deserialize_any(TimeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_case_insensitively() {
        assert_eq!("GET".parse::<Metric>().unwrap(), Metric::Get);
        assert_eq!("connect".parse::<Metric>().unwrap(), Metric::Connect);
        assert!("ping".parse::<Metric>().is_err());
    }

    #[test]
    fn metric_title_and_ceiling() {
        assert_eq!(Metric::Get.title(), "GET in milliseconds");
        assert_eq!(Metric::Connect.title(), "CONNECT in milliseconds");
        assert_eq!(Metric::Get.y_axis_max(), 5000.0);
        assert_eq!(Metric::Connect.y_axis_max(), 500.0);
    }

    #[test]
    fn measurement_time_accepts_string_and_millis() {
        let a: Measurement =
            serde_json::from_str(r#"{"time":"2020-05-01T12:00:00Z","transfer":1,"connect":2}"#)
                .unwrap();
        let b: Measurement =
            serde_json::from_str(r#"{"time":1588334400000,"transfer":1,"connect":2}"#).unwrap();
        assert_eq!(a.time, b.time);
    }
}
