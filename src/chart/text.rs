//! Text measurement and truncation for legend labels.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Shorten `text` to fit `max_px`, ending in a single ellipsis when anything was cut.
pub fn fit_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = text.chars().collect();
    while !out.is_empty() {
        out.pop();
        let candidate = format!("{out}…");
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            return candidate;
        }
    }
    out
}
