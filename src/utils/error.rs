use serde::Serialize;
use thiserror::Error;

/// 使用者輸入錯誤，於畫面上就地提示修正，不屬於系統錯誤
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please select an age group to continue.")]
    MissingAge,

    #[error("Please enter a valid weight to calculate dosing.")]
    InvalidWeight,
}

impl ValidationError {
    /// 提示卡片的標題
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingAge => "Age required",
            ValidationError::InvalidWeight => "Weight required",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown age group '{0}' (expected under-2-months, 2-to-6-months or 6-months-and-up)")]
pub struct UnknownAgeBracket(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown weight unit '{0}' (expected kg or lbs)")]
pub struct UnknownWeightUnit(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a hex color")]
pub struct InvalidColor(pub String);

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DoseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DoseError::Validation(_) => ErrorCategory::Input,
            DoseError::ConfigValidationError { .. }
            | DoseError::InvalidConfigValueError { .. }
            | DoseError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DoseError::IoError(_) | DoseError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DoseError::Validation(e) => format!("{}: {}", e.title(), e),
            DoseError::IoError(e) => format!("Could not read a required file ({})", e),
            DoseError::SerializationError(_) => "Could not produce JSON output".to_string(),
            DoseError::ConfigValidationError { field, .. } => {
                format!("The configuration file is not valid (problem near '{}')", field)
            }
            DoseError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not an accepted value for {}", value, field)
            }
            DoseError::MissingConfigError { field } => {
                format!("The configuration is missing '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DoseError::Validation(ValidationError::MissingAge) => {
                "Pass --age with one of: under-2-months, 2-to-6-months, 6-months-and-up".to_string()
            }
            DoseError::Validation(ValidationError::InvalidWeight) => {
                "Pass --weight with a number greater than zero".to_string()
            }
            DoseError::IoError(_) => "Check that the --config path exists and is readable".to_string(),
            DoseError::SerializationError(_) => "Try --format text instead".to_string(),
            DoseError::ConfigValidationError { .. } => {
                "Make sure the file is valid TOML and matches the documented layout".to_string()
            }
            DoseError::InvalidConfigValueError { reason, .. } => reason.clone(),
            DoseError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DoseError>;
