// Dashboard colours and fonts
use serde::{Deserialize, Serialize};
use shared::models::IndicatorCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub sidebar: String,
    pub foreground: String,
    pub muted: String,
    pub primary: String,
    pub border: String,
    pub success_bg: String,
    pub success_fg: String,
    pub error_bg: String,
    pub error_fg: String,
    pub font_family: String,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            sidebar: "#f0f2f6".to_string(),
            foreground: "#262730".to_string(),
            muted: "#6c757d".to_string(),
            primary: "#ff4b4b".to_string(),
            border: "#d9d9d9".to_string(),
            success_bg: "#e6f4ea".to_string(),
            success_fg: "#1e7e34".to_string(),
            error_bg: "#fdecea".to_string(),
            error_fg: "#b71c1c".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Fixed bar colour of each indicator.
pub fn indicator_color(code: IndicatorCode) -> &'static str {
    match code {
        IndicatorCode::Vanf => "#1f77b4", // blue
        IndicatorCode::Trif => "#d62728", // red
        IndicatorCode::Drc => "#2ca02c",  // green
        IndicatorCode::Vane => "#9467bd", // purple
        IndicatorCode::Trie => "#ff7f0e", // orange
        IndicatorCode::Rca => "#17becf",  // cyan
    }
}
