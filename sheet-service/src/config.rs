use serde::Deserialize;
use std::fs;

use crate::parse::{FileDateFallback, NumberPolicy, ParseOptions};

#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// Published-CSV URL of the spreadsheet.
    pub url: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    /// 0-based field index mapped to `power` (date is field 0).
    #[serde(default = "default_power_column")]
    pub power_column: usize,
    /// 0-based field index mapped to `gas`.
    #[serde(default = "default_gas_column")]
    pub gas_column: usize,
    #[serde(default)]
    pub file_date_fallback: FileDateFallback,
    #[serde(default)]
    pub on_parse_failure: NumberPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sheet: SheetConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub parse: ParseConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            power_column: default_power_column(),
            gas_column: default_gas_column(),
            file_date_fallback: FileDateFallback::default(),
            on_parse_failure: NumberPolicy::default(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_power_column() -> usize {
    1
}

fn default_gas_column() -> usize {
    2
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("SHEET_SERVICE_CONFIG").unwrap_or_else(|_| "sheet-service.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            power_column: self.parse.power_column,
            gas_column: self.parse.gas_column,
            file_date_fallback: self.parse.file_date_fallback,
            on_parse_failure: self.parse.on_parse_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_parse_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [sheet]
            url = "https://example.com/pub?output=csv"

            [server]
            bind_addr = "0.0.0.0:8080"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.sheet.fetch_timeout_secs, 30);
        assert_eq!(cfg.parse.power_column, 1);
        assert_eq!(cfg.parse.gas_column, 2);
        assert_eq!(cfg.parse.file_date_fallback, FileDateFallback::Today);
        assert_eq!(cfg.parse.on_parse_failure, NumberPolicy::Zero);
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn parse_section_overrides() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [sheet]
            url = "https://example.com/pub?output=csv"
            fetch_timeout_secs = 5

            [server]
            bind_addr = "127.0.0.1:9999"

            [parse]
            power_column = 2
            gas_column = 1
            file_date_fallback = "first-row"
            on_parse_failure = "reject"

            [metrics]
            bind_addr = "0.0.0.0:9100"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.sheet.fetch_timeout_secs, 5);
        assert_eq!(cfg.parse.power_column, 2);
        assert_eq!(cfg.parse.file_date_fallback, FileDateFallback::FirstRow);
        assert_eq!(cfg.parse.on_parse_failure, NumberPolicy::Reject);
        assert_eq!(cfg.metrics.unwrap().bind_addr, "0.0.0.0:9100");
    }
}
