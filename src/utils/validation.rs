use crate::domain::model::Domain;
use crate::utils::error::{AppError, ConvertError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// Optional sign, digits with at most one decimal point, optional exponent.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[-+]?\d*\.?\d+(e[-+]?\d+)?$").expect("number pattern is a valid regex")
});

/// Parses a user-typed real number, e.g. `-3`, `.5`, `2.5e-3`.
pub fn validate_number(raw: &str) -> std::result::Result<f64, ConvertError> {
    let trimmed = raw.trim();
    let not_a_number = || ConvertError::NotANumber {
        input: raw.to_string(),
    };

    if !NUMBER_RE.is_match(trimmed) {
        tracing::debug!("Rejected numeric input: {:?}", raw);
        return Err(not_a_number());
    }

    // 1e999 passes the pattern but overflows to infinity
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(not_a_number()),
    }
}

pub fn validate_sign(value: f64, domain: &Domain) -> std::result::Result<(), ConvertError> {
    if value < 0.0 && !domain.allows_negative {
        return Err(ConvertError::NegativeNotAllowed {
            domain: domain.name.clone(),
        });
    }
    Ok(())
}

pub fn validate_units_distinct(
    source_unit: &str,
    target_unit: &str,
) -> std::result::Result<(), ConvertError> {
    if source_unit == target_unit {
        return Err(ConvertError::SameUnit {
            unit: source_unit.to_string(),
        });
    }
    Ok(())
}

pub fn validate_unit_membership(domain: &Domain, unit: &str) -> std::result::Result<(), ConvertError> {
    if !domain.contains_unit(unit) {
        return Err(ConvertError::UnknownUnit {
            domain: domain.name.clone(),
            unit: unit.to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
