use crate::utils::error::{EstimateError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 非負且有限的費率
pub fn validate_rate(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Rate must be a finite, non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

// 表單邊界的檢查：回傳 InvalidQuoteInput 而不是設定錯誤
pub fn validate_description(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimateError::invalid_input(
            field_name,
            value,
            "Please describe the items you are moving",
        ));
    }
    Ok(())
}

pub fn validate_distance(field_name: &str, miles: f64) -> Result<()> {
    if !miles.is_finite() {
        return Err(EstimateError::invalid_input(
            field_name,
            miles.to_string(),
            "Distance must be a number",
        ));
    }
    if miles < 1.0 {
        return Err(EstimateError::invalid_input(
            field_name,
            miles.to_string(),
            "Distance must be at least 1 mile",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("batch.output_path", "./output").is_ok());
        assert!(validate_path("batch.output_path", "").is_err());
        assert!(validate_path("batch.output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("pricing.per_mile_rate", 2.0).is_ok());
        assert!(validate_rate("pricing.per_mile_rate", 0.0).is_ok());
        assert!(validate_rate("pricing.per_mile_rate", -1.0).is_err());
        assert!(validate_rate("pricing.per_mile_rate", f64::NAN).is_err());
        assert!(validate_rate("pricing.per_mile_rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("estimator.simulated_delay_ms", 1500u64, 0, 60_000).is_ok());
        assert!(validate_range("estimator.simulated_delay_ms", 60_001u64, 0, 60_000).is_err());
    }

    #[test]
    fn test_validate_distance() {
        assert!(validate_distance("distance_miles", 1.0).is_ok());
        assert!(validate_distance("distance_miles", 350.5).is_ok());
        assert!(validate_distance("distance_miles", 0.5).is_err());
        assert!(validate_distance("distance_miles", -10.0).is_err());
        assert!(validate_distance("distance_miles", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("inventory_description", "1 bed apartment").is_ok());
        assert!(validate_description("inventory_description", "   ").is_err());
    }
}
