use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_ACCENT_COLOR: &str = "#667eea";
pub const DEFAULT_TEXT_COLOR: &str = "#222222";
pub const DEFAULT_FONT: &str = "Arial";

pub const FONT_CHOICES: &[&str] = &[
    "Arial",
    "Georgia",
    "Times New Roman",
    "Verdana",
    "Courier New",
    "Comic Sans MS",
    "Trebuchet MS",
];

/// Optional user overrides; absent fields take the defaults above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    pub accent_color: Option<String>,
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
    pub text_color: Option<String>,
}

/// Style applied uniformly to whichever layout is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub accent_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub text_color: String,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        resolve_style(&StyleOverrides::default())
    }
}

pub fn resolve_style(overrides: &StyleOverrides) -> ResolvedStyle {
    ResolvedStyle {
        accent_color: color_or(&overrides.accent_color, DEFAULT_ACCENT_COLOR),
        heading_font: font_or_default(&overrides.heading_font),
        body_font: font_or_default(&overrides.body_font),
        text_color: color_or(&overrides.text_color, DEFAULT_TEXT_COLOR),
    }
}

fn color_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        None | Some("") => default.to_string(),
        Some(color) if is_hex_color(color) => color.to_ascii_lowercase(),
        Some(color) => {
            warn!("Ignoring invalid color override {color:?}");
            default.to_string()
        }
    }
}

fn font_or_default(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_FONT.to_string(),
        Some(font) => match FONT_CHOICES.iter().find(|f| f.eq_ignore_ascii_case(font)) {
            Some(known) => known.to_string(),
            None => {
                warn!("Ignoring unsupported font override {font:?}");
                DEFAULT_FONT.to_string()
            }
        },
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// RGB components in 0.0–1.0, expanding `#rgb` shorthand.
pub fn hex_to_rgb(value: &str) -> Option<(f32, f32, f32)> {
    let hex = value.strip_prefix('#').filter(|hex| hex.is_ascii())?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some((channel(0)?, channel(2)?, channel(4)?))
}
