use enumfield_core::{config::ConfigError, error::EnumFieldError, validate::ValidateError};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Debug, ThisError)]
#[error("{kind}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,

    /// Field issues, present for validation failures.
    pub issues: BTreeMap<String, Vec<String>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            issues: BTreeMap::new(),
        }
    }
}

impl From<EnumFieldError> for Error {
    fn from(err: EnumFieldError) -> Self {
        let kind = match err {
            EnumFieldError::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            EnumFieldError::UnknownPredicate { .. } | EnumFieldError::UnknownScope { .. } => {
                ErrorKind::NotFound
            }
        };

        Self::new(kind, err.to_string())
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        let message = err.to_string();
        let ValidateError::ValidationFailed(issues) = err;

        Self {
            kind: ErrorKind::Validation,
            message,
            issues,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Declare(err) => err.into(),
            ConfigError::Io { .. } | ConfigError::Parse(_) => {
                Self::new(ErrorKind::Config, err.to_string())
            }
        }
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Config,
    InvalidEnumValue,
    NotFound,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
        };

        write!(f, "{label}")
    }
}
