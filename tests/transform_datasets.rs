mod common;

use chrono::{Duration, TimeZone, Utc};
use uptime_charts::transform::{TransformOptions, abbreviate_labels, build_datasets};
use uptime_charts::{ChartDataset, Metric};

#[test]
fn trailing_window_keeps_last_fourteen_days() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["oslo"], 20, now);
    let ds = build_datasets(&result, &TransformOptions::default(), now);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].data.len(), 14);
    let cutoff = now - Duration::days(14);
    assert!(ds[0].data.iter().all(|p| p.t > cutoff));
}

#[test]
fn no_window_keeps_everything() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["oslo"], 20, now);
    let opts = TransformOptions {
        window: None,
        ..TransformOptions::default()
    };
    assert_eq!(build_datasets(&result, &opts, now)[0].data.len(), 20);
}

#[test]
fn connect_mode_plots_connect_values() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["oslo", "tokyo"], 5, now);
    let ds = build_datasets(&result, &TransformOptions::for_metric(Metric::Connect), now);
    for (d, series) in ds.iter().zip(&result.data) {
        for (p, m) in d.data.iter().zip(&series.data) {
            assert_eq!(p.t, m.time);
            assert_eq!(p.y, m.connect);
            assert_ne!(p.y, m.transfer);
        }
    }
}

#[test]
fn get_mode_plots_transfer_values() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["oslo"], 3, now);
    let ds = build_datasets(&result, &TransformOptions::for_metric(Metric::Get), now);
    let got: Vec<f64> = ds[0].data.iter().map(|p| p.y).collect();
    let want: Vec<f64> = result.data[0].data.iter().map(|m| m.transfer).collect();
    assert_eq!(got, want);
}

#[test]
fn source_is_not_consumed_and_order_is_preserved() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["tokyo", "sydney", "oslo"], 2, now);
    let before = result.clone();
    let ds = build_datasets(&result, &TransformOptions::default(), now);
    assert_eq!(result, before);
    let labels: Vec<&str> = ds.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["tokyo", "sydney", "oslo"]);
    // distinct colors by position
    assert_ne!(ds[0].color, ds[1].color);
    assert_ne!(ds[1].color, ds[2].color);
}

#[test]
fn relabeling_a_clone_leaves_the_source_labels() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["frankfurt", "atlantis"], 2, now);
    let full: Vec<ChartDataset> = build_datasets(&result, &TransformOptions::default(), now);
    let mut compact = full.clone();
    abbreviate_labels(&mut compact);
    assert_eq!(compact[0].label, "FRA");
    assert_eq!(compact[1].label, "atlantis");
    assert_eq!(full[0].label, "frankfurt");
    assert_eq!(compact[0].data, full[0].data);
}

#[test]
fn default_ignore_list_skips_locations() {
    let now = Utc.with_ymd_and_hms(2020, 6, 30, 12, 0, 0).unwrap();
    let result = common::fetch_result(&["bangkok", "oslo", "bogota"], 2, now);
    let ds = build_datasets(&result, &TransformOptions::default(), now);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].label, "oslo");

    let keep_all = TransformOptions {
        ignore: Vec::new(),
        ..TransformOptions::default()
    };
    assert_eq!(build_datasets(&result, &keep_all, now).len(), 3);
}
