//! Validation helper functions for configuration types.

use crate::core::errors::{NamewiseError, Result};

/// Validate that a u64 value is greater than zero.
pub fn validate_positive_u64(value: u64, field: &str) -> Result<()> {
    if value == 0 {
        return Err(NamewiseError::config_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f32 value lies within an inclusive range.
pub fn validate_range_f32(value: f32, min: f32, max: f32, field: &str) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(NamewiseError::config_field(
            format!("{} must be between {} and {}, got {}", field, min, max, value),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string setting is not blank.
pub fn validate_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NamewiseError::config_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a URL setting uses an http(s) scheme.
pub fn validate_http_url(value: &str, field: &str) -> Result<()> {
    validate_non_empty(value, field)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(NamewiseError::config_field(
            format!("{} must start with http:// or https://", field),
            field,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_timeout() {
        assert!(validate_positive_u64(0, "timeout_secs").is_err());
        assert!(validate_positive_u64(30, "timeout_secs").is_ok());
    }

    #[test]
    fn range_is_inclusive() {
        assert!(validate_range_f32(0.0, 0.0, 2.0, "temperature").is_ok());
        assert!(validate_range_f32(2.0, 0.0, 2.0, "temperature").is_ok());
        assert!(validate_range_f32(2.1, 0.0, 2.0, "temperature").is_err());
    }

    #[test]
    fn url_needs_scheme() {
        assert!(validate_http_url("api.example.com", "api_url").is_err());
        assert!(validate_http_url("   ", "api_url").is_err());
        assert!(validate_http_url("https://api.example.com/v1", "api_url").is_ok());
    }
}
