// Engine settings, loaded from a JSON file or left at their defaults.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use shared::utils::NumberFormat;
use std::path::Path;

use crate::data::session_store::MAX_SESSION_TTL_SECS;

/// Environment variable holding the path of the JSON settings file.
pub const CONFIG_ENV_VAR: &str = "APPRAISAL_ENGINE_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Rows per message when streaming a sheet preview.
    pub preview_chunk_rows: usize,
    /// Sessions idle for longer than this are dropped on the next load.
    pub session_ttl_secs: i64,
    pub data: DataSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            preview_chunk_rows: 100,
            session_ttl_secs: 3600,
            data: DataSettings::default(),
        }
    }
}

/// How CSV sheets are written. Workbooks carry typed cells and ignore this.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataSettings {
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    pub decimal_separator: String,
    pub thousand_separator: String, // Empty for none
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            csv_delimiter: ",".to_string(),
            decimal_separator: ".".to_string(),
            thousand_separator: String::new(),
        }
    }
}

impl DataSettings {
    pub fn delimiter(&self) -> Result<u8> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(anyhow!("csv_delimiter must be a single ASCII character, got '{}'", self.csv_delimiter)),
        }
    }

    pub fn number_format(&self) -> Result<NumberFormat> {
        let mut decimal = self.decimal_separator.chars();
        let decimal_separator = match (decimal.next(), decimal.next()) {
            (Some(c), None) => c,
            _ => return Err(anyhow!("decimal_separator must be a single character, got '{}'", self.decimal_separator)),
        };
        let mut thousands = self.thousand_separator.chars();
        let thousand_separator = match (thousands.next(), thousands.next()) {
            (None, _) => None,
            (Some(c), None) => Some(c),
            _ => return Err(anyhow!("thousand_separator must be empty or a single character, got '{}'", self.thousand_separator)),
        };
        if Some(decimal_separator) == thousand_separator {
            return Err(anyhow!("decimal and thousand separators must differ"));
        }
        Ok(NumberFormat::new(decimal_separator, thousand_separator))
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json).context("Invalid engine settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine settings '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Reads the file named by `APPRAISAL_ENGINE_CONFIG`, or returns the defaults.
    pub fn load_from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_chunk_rows == 0 {
            return Err(anyhow!("preview_chunk_rows must be greater than 0"));
        }
        if self.session_ttl_secs <= 0 || self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(anyhow!(
                "session_ttl_secs must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECS,
                self.session_ttl_secs
            ));
        }
        self.data.delimiter()?;
        self.data.number_format()?;
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.address(), "127.0.0.1:50051");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json(r#"{ "port": 6000, "data": { "csv_delimiter": ";" } }"#).unwrap();
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.data.delimiter().unwrap(), b';');
        assert_eq!(settings.data.decimal_separator, ".");
    }

    #[test]
    fn test_french_number_format() {
        let data = DataSettings {
            csv_delimiter: ";".into(),
            decimal_separator: ",".into(),
            thousand_separator: ".".into(),
        };
        assert_eq!(data.number_format().unwrap(), NumberFormat::new(',', Some('.')));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(EngineSettings::from_json(r#"{ "preview_chunk_rows": 0 }"#).is_err());
        assert!(EngineSettings::from_json(r#"{ "data": { "csv_delimiter": ";;" } }"#).is_err());
        assert!(EngineSettings::from_json(r#"{ "data": { "decimal_separator": ",", "thousand_separator": "," } }"#).is_err());
        assert!(EngineSettings::from_json("not json").is_err());
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert!(EngineSettings::from_json(r#"{ "session_ttl_secs": 0 }"#).is_err());
        let err = EngineSettings::from_json(r#"{ "session_ttl_secs": 9223372036854775807 }"#).unwrap_err();
        assert!(err.to_string().contains("session_ttl_secs must be between 1 and"));
        assert!(EngineSettings::from_json(r#"{ "session_ttl_secs": 86400 }"#).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "host": "0.0.0.0", "preview_chunk_rows": 25 }}"#).unwrap();
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.preview_chunk_rows, 25);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineSettings::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read engine settings"));
    }
}
