use crate::core::export::ExportFormat;
use crate::core::registry::UnitRegistry;
use crate::domain::ports::{ConfigProvider, SameUnitPolicy};
use crate::utils::error::{AppError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for any configured number of display decimals.
pub const MAX_DECIMALS: usize = 15;

static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_domain: String,
    pub same_unit_policy: SameUnitPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_domain: "Length".to_string(),
            same_unit_policy: SameUnitPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub linear_decimals: usize,
    pub temperature_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            linear_decimals: 6,
            temperature_decimals: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub compress: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string(), "tsv".to_string(), "json".to_string()],
            compress: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: LogFormat,
}

impl ConverterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DEFAULT_DOMAIN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("session.default_domain", &self.session.default_domain)?;
        if UnitRegistry::standard()
            .get_domain(&self.session.default_domain)
            .is_err()
        {
            return Err(AppError::InvalidConfigValueError {
                field: "session.default_domain".to_string(),
                value: self.session.default_domain.clone(),
                reason: format!(
                    "Unknown domain. Valid domains: {}",
                    UnitRegistry::standard().list_domains().join(", ")
                ),
            });
        }

        validate_range("display.linear_decimals", self.display.linear_decimals, 0, MAX_DECIMALS)?;
        validate_range(
            "display.temperature_decimals",
            self.display.temperature_decimals,
            0,
            MAX_DECIMALS,
        )?;

        validate_path("export.output_path", &self.export.output_path)?;
        self.export_formats()?;

        Ok(())
    }

    /// 取得匯出格式
    pub fn export_formats(&self) -> Result<Vec<ExportFormat>> {
        self.export.formats.iter().map(|f| f.parse::<ExportFormat>()).collect()
    }

    pub fn output_path(&self) -> &str {
        &self.export.output_path
    }
}

impl ConfigProvider for ConverterConfig {
    fn default_domain(&self) -> &str {
        &self.session.default_domain
    }

    fn same_unit_policy(&self) -> SameUnitPolicy {
        self.session.same_unit_policy
    }

    fn linear_decimals(&self) -> usize {
        self.display.linear_decimals
    }

    fn temperature_decimals(&self) -> usize {
        self.display.temperature_decimals
    }
}

impl Validate for ConverterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
