//! Series colors: hues evenly spaced around the HSL wheel, starting from a base color.
//!
//! Colors are exchanged as CSS strings (`rgb(200, 116, 94)`), the form a dashboard page
//! expects, and as `Rgb8` where the renderer needs numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default base color (a muted coral that reads well on a dark navy background).
pub const DEFAULT_BASE_COLOR: Rgb8 = Rgb8 {
    r: 0xc8,
    g: 0x74,
    b: 0x5e,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("unrecognized color string: {0:?}")]
    Unrecognized(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h_deg: f64, // 0..360
    pub s: f64,     // 0..1
    pub l: f64,     // 0..1
}

/// Parsed CSS color with alpha in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb8,
    pub a: f64,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || ColorError::InvalidHex(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize, w: usize| u8::from_str_radix(&hex[i..i + w], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                // #abc == #aabbcc
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        rgb8_to_hsl(*self)
    }

    /// CSS `rgb(r, g, b)` form.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Hsl {
    pub fn to_rgb8(&self) -> Rgb8 {
        hsl_to_rgb8(*self)
    }
}

/// Generate `num` colors whose hues are spaced `360 / num` degrees apart, starting at
/// `base`'s hue. Saturation and lightness are taken from `base`.
pub fn hue_wheel(num: usize, base: Rgb8) -> Vec<Rgb8> {
    let start = base.to_hsl();
    let step = if num == 0 { 0.0 } else { 360.0 / num as f64 };
    (0..num)
        .map(|i| {
            Hsl {
                h_deg: start.h_deg + step * i as f64,
                ..start
            }
            .to_rgb8()
        })
        .collect()
}

/// String form of [`hue_wheel`]: one `rgb(r, g, b)` string per color.
pub fn color_array(num: usize, base: Rgb8) -> Vec<String> {
    hue_wheel(num, base).iter().map(Rgb8::to_css).collect()
}

/// [`color_array`] from the default base color.
pub fn default_color_array(num: usize) -> Vec<String> {
    color_array(num, DEFAULT_BASE_COLOR)
}

/// Turn `rgb(...)` strings into `rgba(..., alpha)`. Other strings pass through unchanged.
pub fn colors_with_alpha(colors: &[String], alpha: f64) -> Vec<String> {
    colors
        .iter()
        .map(|c| match parse_css_color(c) {
            Ok(Rgba { rgb, .. }) => format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, alpha),
            Err(_) => c.clone(),
        })
        .collect()
}

/// Reorder so neighbours in the output are far apart on the wheel: even-indexed entries
/// are pushed to the front (in reverse), odd-indexed entries appended.
pub fn interleave_colors<T: Clone>(colors: &[T]) -> Vec<T> {
    let mut out = std::collections::VecDeque::with_capacity(colors.len());
    for (i, c) in colors.iter().enumerate() {
        if i % 2 == 1 {
            out.push_back(c.clone());
        } else {
            out.push_front(c.clone());
        }
    }
    out.into_iter().collect()
}

/// Parse `#hex`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_css_color(s: &str) -> Result<Rgba, ColorError> {
    let t = s.trim();
    if t.starts_with('#') {
        return Rgb8::from_hex(t).map(|rgb| Rgba { rgb, a: 1.0 });
    }
    let unrecognized = || ColorError::Unrecognized(s.to_string());
    let lower = t.to_ascii_lowercase();
    let (inner, want) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, 4)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, 3)
    } else {
        return Rgb8::from_hex(t)
            .map(|rgb| Rgba { rgb, a: 1.0 })
            .map_err(|_| unrecognized());
    };
    let inner = inner.strip_suffix(')').ok_or_else(unrecognized)?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != want {
        return Err(unrecognized());
    }
    let channel = |p: &str| p.parse::<u8>().map_err(|_| unrecognized());
    let rgb = Rgb8::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = if want == 4 {
        let a = parts[3].parse::<f64>().map_err(|_| unrecognized())?;
        if !(0.0..=1.0).contains(&a) {
            return Err(unrecognized());
        }
        a
    } else {
        1.0
    };
    Ok(Rgba { rgb, a })
}

// ------------------------ Conversions ------------------------

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn rgb8_to_hsl(rgb: Rgb8) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d == 0.0 {
        return Hsl { h_deg: 0.0, s: 0.0, l };
    }

    let s = if l < 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Hsl {
        h_deg: h * 60.0,
        s,
        l,
    }
}

// HSL -> RGB conversion (linear; sufficient for chart colors)
fn hsl_to_rgb8(hsl: Hsl) -> Rgb8 {
    let h = hsl.h_deg.rem_euclid(360.0) / 360.0;
    let s = clamp01(hsl.s);
    let l = clamp01(hsl.l);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb8 { r: v, g: v, b: v };
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb8 {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb8::from_hex("#c8745e").unwrap(), DEFAULT_BASE_COLOR);
        assert_eq!(Rgb8::from_hex("C8745E").unwrap(), DEFAULT_BASE_COLOR);
        assert_eq!(Rgb8::from_hex("#fff").unwrap(), Rgb8::new(255, 255, 255));
        assert!(Rgb8::from_hex("#12345").is_err());
        assert_eq!(Rgb8::from_hex("#fff").unwrap().to_hex(), "#ffffff");
        assert_eq!(DEFAULT_BASE_COLOR.to_hex(), "#c8745e");
        assert!(Rgb8::from_hex("#gg0000").is_err());
    }

    #[test]
    fn hsl_round_trip_is_close() {
        for c in [DEFAULT_BASE_COLOR, Rgb8::new(10, 200, 30), Rgb8::new(0, 0, 255)] {
            let back = c.to_hsl().to_rgb8();
            assert!((back.r as i32 - c.r as i32).abs() <= 1);
            assert!((back.g as i32 - c.g as i32).abs() <= 1);
            assert!((back.b as i32 - c.b as i32).abs() <= 1);
        }
    }

    #[test]
    fn first_color_is_the_base() {
        let colors = color_array(4, DEFAULT_BASE_COLOR);
        assert_eq!(colors[0], "rgb(200, 116, 94)");
    }

    #[test]
    fn zero_colors() {
        assert!(default_color_array(0).is_empty());
    }

    #[test]
    fn alpha_rewrite() {
        let out = colors_with_alpha(&["rgb(1, 2, 3)".to_string(), "red".to_string()], 0.25);
        assert_eq!(out, vec!["rgba(1, 2, 3, 0.25)".to_string(), "red".to_string()]);
    }

    #[test]
    fn interleave_puts_evens_first_reversed() {
        assert_eq!(interleave_colors(&[0, 1, 2, 3, 4]), vec![4, 2, 0, 1, 3]);
        assert!(interleave_colors::<u8>(&[]).is_empty());
    }

    #[test]
    fn css_parsing() {
        let c = parse_css_color("rgba(10, 20, 30, 0.5)").unwrap();
        assert_eq!(c.rgb, Rgb8::new(10, 20, 30));
        assert_eq!(c.a, 0.5);
        assert_eq!(parse_css_color("#0a141e").unwrap().rgb, Rgb8::new(10, 20, 30));
        assert!(parse_css_color("rgb(1, 2)").is_err());
        assert!(parse_css_color("hsl(1, 2%, 3%)").is_err());
    }
}
