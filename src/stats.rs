use crate::models::ChartDataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latency summary for one plotted location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub label: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Summarize the plotted values per dataset label, ordered by label.
/// Datasets sharing a label are pooled; non-finite values are ignored.
pub fn location_summary(datasets: &[ChartDataset]) -> Vec<Summary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ds in datasets {
        groups
            .entry(ds.label.as_str())
            .or_default()
            .extend(ds.data.iter().map(|p| p.y).filter(|y| y.is_finite()));
    }

    groups
        .into_iter()
        .map(|(label, mut vals)| {
            vals.sort_by(f64::total_cmp);
            let count = vals.len();
            let mean = (count > 0).then(|| vals.iter().sum::<f64>() / count as f64);
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary {
                label: label.to_string(),
                count,
                min: vals.first().copied(),
                max: vals.last().copied(),
                mean,
                median,
            }
        })
        .collect()
}
