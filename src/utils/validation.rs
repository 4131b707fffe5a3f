use crate::utils::error::{LabError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LabError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LabError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LabError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LabError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 驗證半開區間 [low, high) 非空
pub fn validate_half_open_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    low: T,
    high: T,
) -> Result<()> {
    if low >= high {
        return Err(LabError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("[{}, {})", low, high),
            reason: format!("Lower bound {} must be below upper bound {}", low, high),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("temperature.export_csv", "out/grid.csv").is_ok());
        assert!(validate_path("temperature.export_csv", "").is_err());
        assert!(validate_path("temperature.export_csv", "a\0b").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("temperature.days", 7, 1).is_ok());
        assert!(validate_positive_number("temperature.days", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("car.color", "Blue").is_ok());
        assert!(validate_non_empty_string("car.color", "   ").is_err());
    }

    #[test]
    fn test_validate_half_open_range() {
        assert!(validate_half_open_range("temperature.range", -5, 30).is_ok());
        assert!(validate_half_open_range("temperature.range", 30, 30).is_err());
        assert!(validate_half_open_range("temperature.range", 31, 30).is_err());
    }
}
