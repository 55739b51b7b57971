pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use crate::adapters::{renderer_for, HtmlRenderer, JsonRenderer, TextRenderer};
pub use crate::config::{toml_config::TomlConfig, Settings};
pub use crate::core::calculator::{compute_doses, DoseCalculator, DosingLimits};
pub use crate::core::form::{FormSnapshot, FormState};
pub use crate::core::theme::Theme;
pub use crate::domain::model::{
    Advisory, AgeBracket, Assessment, DoseResult, Drug, Outcome, OutputFormat, Weight, WeightUnit,
};
pub use crate::utils::error::{DoseError, Result, ValidationError};
