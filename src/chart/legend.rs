//! Legend layout and drawing for the external legend panel.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, fit_to_width};
use super::types::{ChartConfig, LegendPosition};
use super::util::rgb;

/// One legend entry: text and series color.
pub type LegendItem = (String, RGBColor);

// Gap between the color box and its text, and after the text.
const BOX_TO_TEXT_GAP: i32 = 6;
const TRAILING_GAP: i32 = 10;

fn block_width(label: &str, cfg: &ChartConfig) -> i32 {
    cfg.legend_box_px as i32
        + BOX_TO_TEXT_GAP
        + estimate_text_width_px(label, cfg.legend_font_px) as i32
        + TRAILING_GAP
}

/// Greedy row packing for a `Top` legend: indices of the labels in each row.
fn pack_rows(labels: &[String], start_x: i32, total_w: i32, cfg: &ChartConfig) -> Vec<Vec<usize>> {
    let usable = total_w - cfg.legend_padding_px as i32;
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = start_x;
    for (i, label) in labels.iter().enumerate() {
        let w = block_width(label, cfg);
        if x + w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = start_x;
        }
        x += w;
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

fn row_height(cfg: &ChartConfig) -> i32 {
    (cfg.legend_font_px as i32).max(cfg.legend_box_px as i32) + cfg.legend_padding_px as i32
}

/// How tall the `Top` legend band must be to fit all labels. Mirrors [`draw_legend_panel`].
pub fn estimate_top_legend_height_px(
    labels: &[String],
    start_x: i32,
    total_w: i32,
    cfg: &ChartConfig,
) -> i32 {
    let rows = pack_rows(labels, start_x, total_w, cfg).len().max(1) as i32;
    rows * row_height(cfg) + 2 * cfg.legend_padding_px as i32
}

/// Draw the legend panel: a single column for `Right`, wrapped rows for `Top`.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    placement: LegendPosition,
    start_x: i32, // Top only: align the first entry with the plot's x-axis
    cfg: &ChartConfig,
) -> Result<()> {
    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;
    let pad = cfg.legend_padding_px as i32;
    let box_px = cfg.legend_box_px as i32;
    let line_h = row_height(cfg);

    let text_color = rgb(cfg.legend_color);
    let label_style = TextStyle::from((FontFamily::SansSerif, cfg.legend_font_px))
        .color(&text_color)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let draw_item = |x: i32, y_center: i32, label: &str, color: RGBColor| -> Result<()> {
        let half = box_px / 2;
        legend_area
            .draw(&Rectangle::new(
                [(x, y_center - half), (x + box_px, y_center + half)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        legend_area
            .draw(&Text::new(
                label.to_string(),
                (x + box_px + BOX_TO_TEXT_GAP, y_center),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    };

    match placement {
        LegendPosition::Right => {
            let max_text_w = (w - pad * 2 - box_px - BOX_TO_TEXT_GAP).max(20) as u32;
            let mut y = pad + line_h / 2;
            for (label, color) in items {
                let text = fit_to_width(label, cfg.legend_font_px, max_text_w);
                draw_item(pad, y, &text, *color)?;
                y += line_h;
            }
        }
        LegendPosition::Top => {
            let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
            let rows = pack_rows(&labels, start_x, w, cfg);
            let max_text_w = (w - start_x - pad - box_px - BOX_TO_TEXT_GAP).max(20) as u32;
            let mut y = pad + line_h / 2;
            for row in rows {
                let mut x = start_x;
                for idx in row {
                    let (label, color) = &items[idx];
                    let text = fit_to_width(label, cfg.legend_font_px, max_text_w);
                    draw_item(x, y, &text, *color)?;
                    x += block_width(&text, cfg);
                }
                y += line_h;
            }
        }
    }

    Ok(())
}
