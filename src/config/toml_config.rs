use crate::core::calculator::ACCEPTED_IBUPROFEN_CEILINGS;
use crate::core::theme::Theme;
use crate::domain::model::OutputFormat;
use crate::utils::error::{DoseError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dosing: Option<DosingConfig>,
    pub output: Option<OutputConfig>,
    pub theme: Option<ThemeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DosingConfig {
    pub ibuprofen_max_single_dose_mg: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub dark: Option<String>,
    pub bright: Option<String>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DoseError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DoseError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IBUPROFEN_MAX})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoseError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(max) = self.dosing.as_ref().and_then(|d| d.ibuprofen_max_single_dose_mg) {
            validation::validate_one_of(
                "dosing.ibuprofen_max_single_dose_mg",
                max,
                &ACCEPTED_IBUPROFEN_CEILINGS,
            )?;
        }

        if let Some(theme) = &self.theme {
            match (&theme.dark, &theme.bright) {
                (Some(dark), Some(bright)) => {
                    validation::validate_hex_color("theme.dark", dark)?;
                    validation::validate_hex_color("theme.bright", bright)?;
                }
                (Some(_), None) => {
                    validation::validate_required_field("theme.bright", &theme.bright)?;
                }
                (None, Some(_)) => {
                    validation::validate_required_field("theme.dark", &theme.dark)?;
                }
                (None, None) => {}
            }
        }

        Ok(())
    }

    pub fn ibuprofen_max_mg(&self) -> Option<f64> {
        self.dosing
            .as_ref()
            .and_then(|d| d.ibuprofen_max_single_dose_mg)
            .map(f64::from)
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn seed(&self) -> Option<u64> {
        self.theme.as_ref().and_then(|t| t.seed)
    }

    /// 固定配色；未設定時回傳 None
    pub fn fixed_theme(&self) -> Result<Option<Theme>> {
        let Some(theme) = &self.theme else {
            return Ok(None);
        };
        match (&theme.dark, &theme.bright) {
            (Some(dark), Some(bright)) => Theme::from_hex(dark, bright)
                .map(Some)
                .map_err(|e| DoseError::InvalidConfigValueError {
                    field: "theme".to_string(),
                    value: e.0.clone(),
                    reason: "Expected a hex color such as #1b2a41".to_string(),
                }),
            _ => Ok(None),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
