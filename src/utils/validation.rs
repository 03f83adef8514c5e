use crate::core::Coordinate;
use crate::utils::error::{Result, RouteError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RouteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Rejects empty keys and `${VAR}` placeholders that were never substituted.
pub fn validate_api_key(field_name: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() || (key.starts_with("${") && key.ends_with('}')) {
        return Err(RouteError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    if key.chars().any(char::is_whitespace) {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "<redacted>".to_string(),
            reason: "API key cannot contain whitespace".to_string(),
        });
    }
    Ok(())
}

pub fn validate_coordinate(field_name: &str, coordinate: &Coordinate) -> Result<()> {
    if !coordinate.is_valid() {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: coordinate.to_string(),
            reason: "Latitude must be within ±90 and longitude within ±180".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RouteError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RouteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
