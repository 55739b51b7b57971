use crate::utils::error::{DoseError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DoseError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_one_of<T: PartialEq + std::fmt::Display>(
    field_name: &str,
    value: T,
    allowed: &[T],
) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }

    let accepted: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
    Err(DoseError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Accepted values: {}", accepted.join(", ")),
    })
}

/// 去掉 (至多一個) `#` 後的 3 或 6 位十六進位數字
pub fn hex_digits(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let well_formed =
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    well_formed.then_some(digits)
}

/// 接受 `#abc`、`#aabbcc` 或不含 `#` 的寫法
pub fn validate_hex_color(field_name: &str, value: &str) -> Result<()> {
    if hex_digits(value).is_none() {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a hex color such as #1b2a41".to_string(),
        });
    }
    Ok(())
}
