use crate::models::ChartDataset;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save datasets as long-format CSV: one row per point, columns `location,time,value`.
pub fn save_csv<P: AsRef<Path>>(datasets: &[ChartDataset], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("location", "time", "value"))?;
    for ds in datasets {
        for p in &ds.data {
            wtr.serialize((&ds.label, p.t.to_rfc3339(), p.y))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save datasets as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(datasets: &[ChartDataset], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(datasets)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_BASE_COLOR;
    use crate::models::Point;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let ds = vec![ChartDataset {
            data: vec![Point {
                t: Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap(),
                y: 123.5,
            }],
            color: DEFAULT_BASE_COLOR,
            label: "oslo".into(),
        }];
        save_csv(&ds, &csvp).unwrap();
        save_json(&ds, &jsonp).unwrap();
        let csv = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv.starts_with("location,time,value"));
        assert!(csv.contains("oslo,2020-05-01T00:00:00+00:00,123.5"));
        assert!(jsonp.exists());
    }
}
