// GUI configuration module
pub mod theme;

// Mirrors the structure of assets/config/default.json
use serde::Deserialize;
use shared::models::{IndicatorCode, Language};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub engine: EngineConnSettings,
    pub chart: ChartConfig,
    pub preview: PreviewSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub language: String, // "fr" or "en"
    pub default_discount_rate: f64,
    pub discount_rate_step: f64,
    pub decimals: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConnSettings {
    pub host: String,
    pub port: u16,
}

impl EngineConnSettings {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub width: f64,
    pub height: f64,
    /// Bar colour per indicator code, e.g. "VANF" -> "#1f77b4"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl ChartConfig {
    pub fn color_for(&self, code: IndicatorCode) -> String {
        self.colors
            .get(code.as_str())
            .cloned()
            .unwrap_or_else(|| theme::indicator_color(code).to_string())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PreviewSettings {
    /// Rows shown in the data preview; the rest of the sheet is still evaluated.
    pub max_rows: usize,
}

impl AppConfig {
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str)
    }

    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        self.language()?;
        let rate = self.app.default_discount_rate;
        if !(0.0..=100.0).contains(&rate) {
            anyhow::bail!("default_discount_rate must be between 0 and 100, got {}", rate);
        }
        if self.app.discount_rate_step <= 0.0 {
            anyhow::bail!("discount_rate_step must be positive");
        }
        if self.chart.width <= 0.0 || self.chart.height <= 0.0 {
            anyhow::bail!("chart dimensions must be positive");
        }
        Ok(())
    }

    pub fn language(&self) -> Result<Language, anyhow::Error> {
        self.app.language.parse()
    }
}
