#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::calculator::{ACCEPTED_IBUPROFEN_CEILINGS, IBUPROFEN_PEDIATRIC_MAX_MG};
use crate::core::theme::Theme;
use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// 合併後的最終設定 (命令列 > TOML > 預設值)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ibuprofen_max_mg: f64,
    pub format: OutputFormat,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ibuprofen_max_mg: IBUPROFEN_PEDIATRIC_MAX_MG,
            format: OutputFormat::Text,
            theme: Theme::default(),
        }
    }
}

impl ConfigProvider for Settings {
    fn ibuprofen_max_single_dose_mg(&self) -> f64 {
        self.ibuprofen_max_mg
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        let ceiling = self.ibuprofen_max_mg as u32;
        if f64::from(ceiling) != self.ibuprofen_max_mg {
            return Err(crate::utils::error::DoseError::InvalidConfigValueError {
                field: "ibuprofen_max_single_dose_mg".to_string(),
                value: self.ibuprofen_max_mg.to_string(),
                reason: "Must be a whole number of milligrams".to_string(),
            });
        }
        validation::validate_one_of(
            "ibuprofen_max_single_dose_mg",
            ceiling,
            &ACCEPTED_IBUPROFEN_CEILINGS,
        )
    }
}
