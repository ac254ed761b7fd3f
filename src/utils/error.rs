use serde::Serialize;
use thiserror::Error;

/// User-input failures reported by `convert` / `select_domain`.
///
/// Every variant is recoverable: the caller shows the message and waits for new input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Unknown domain: {domain}")]
    UnknownDomain { domain: String },

    #[error("Unknown unit '{unit}' for domain {domain}")]
    UnknownUnit { domain: String, unit: String },

    #[error("Not a number: '{input}'")]
    NotANumber { input: String },

    #[error("Negative values are not valid for {domain}")]
    NegativeNotAllowed { domain: String },

    #[error("Source and target unit are both '{unit}'")]
    SameUnit { unit: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UnknownDomain,
    UnknownUnit,
    NotANumber,
    NegativeNotAllowed,
    SameUnit,
}

/// Serializable `{ kind, message }` pair handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::UnknownDomain { .. } => ErrorKind::UnknownDomain,
            ConvertError::UnknownUnit { .. } => ErrorKind::UnknownUnit,
            ConvertError::NotANumber { .. } => ErrorKind::NotANumber,
            ConvertError::NegativeNotAllowed { .. } => ErrorKind::NegativeNotAllowed,
            ConvertError::SameUnit { .. } => ErrorKind::SameUnit,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ConvertError::UnknownDomain { domain } => {
                format!("Unknown measurement domain '{}'.", domain)
            }
            ConvertError::UnknownUnit { domain, unit } => {
                format!("'{}' is not a {} unit.", unit, domain)
            }
            ConvertError::NotANumber { .. } => {
                "Enter a valid number - letters are not allowed.".to_string()
            }
            ConvertError::NegativeNotAllowed { domain } => {
                format!("Negative values are not valid for {}.", domain)
            }
            ConvertError::SameUnit { .. } => {
                "Choose two different units to convert between.".to_string()
            }
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.user_message(),
        }
    }
}

/// Catalog construction failures. These are programming errors and abort startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Domain {domain} has no units")]
    EmptyDomain { domain: String },

    #[error("Domain {domain}: base unit '{base}' must be declared with factor 1")]
    MissingBaseUnit { domain: String, base: String },

    #[error("Domain {domain}: unit '{unit}' has non-positive factor {factor}")]
    NonPositiveFactor {
        domain: String,
        unit: String,
        factor: f64,
    },

    #[error("Domain {domain}: unit '{unit}' declared more than once")]
    DuplicateUnit { domain: String, unit: String },

    #[error("Domain {domain} declared more than once")]
    DuplicateDomain { domain: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Unit registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Convert(_) => "Check the value and the selected units, then try again",
            AppError::Registry(_) => "The unit catalog is inconsistent; fix the domain definition",
            AppError::ZipError(_) | AppError::CsvError(_) | AppError::SerializationError(_) => {
                "Try exporting again, or choose a different export format"
            }
            AppError::IoError(_) => "Check that the output directory exists and is writable",
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Convert(e) => e.user_message(),
            AppError::ConfigError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_kind_and_user_message() {
        let err = ConvertError::NegativeNotAllowed {
            domain: "Length".to_string(),
        };
        let report = err.report();

        assert_eq!(report.kind, ErrorKind::NegativeNotAllowed);
        assert_eq!(report.message, "Negative values are not valid for Length.");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "NegativeNotAllowed");
    }

    #[test]
    fn test_app_error_wraps_convert_error() {
        let err: AppError = ConvertError::NotANumber {
            input: "abc".to_string(),
        }
        .into();

        assert_eq!(
            err.user_friendly_message(),
            "Enter a valid number - letters are not allowed."
        );
        assert_eq!(err.to_string(), "Not a number: 'abc'");
    }
}
