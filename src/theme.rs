use serde::{Deserialize, Serialize};

/// Studio colour themes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours a theme contributes to a chart when the configuration leaves them unset
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub axis_line: &'static str,
    pub split_line: &'static str,
    pub colors: &'static [&'static str],
}

const LIGHT_COLORS: [&str; 9] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc",
];

const DARK_COLORS: [&str; 9] = [
    "#4992ff", "#7cffb2", "#fddd60", "#ff6e76", "#58d9f9", "#05c091", "#ff8a45", "#8d48e3",
    "#dd79ff",
];

impl Theme {
    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Light => ThemePalette {
                background: "#ffffff",
                text: "#333333",
                axis_line: "#6e7079",
                split_line: "#e0e6f1",
                colors: &LIGHT_COLORS,
            },
            Theme::Dark => ThemePalette {
                background: "#100c2a",
                text: "#eeeeee",
                axis_line: "#b9b8ce",
                split_line: "#484753",
                colors: &DARK_COLORS,
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Parses `#rgb` or `#rrggbb` into its red, green and blue components
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}
