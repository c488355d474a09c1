use crate::ThisError;

///
/// EnumFieldError
///
/// Raised synchronously by declarations and by name lookups on a
/// `ModelSchema`. Declarations are not transactional: artifacts registered
/// before an `InvalidEnumValue` stay registered.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EnumFieldError {
    #[error("invalid enum value: {value}")]
    InvalidEnumValue { value: String },

    #[error("no predicate named '{name}' on {path}")]
    UnknownPredicate { path: String, name: String },

    #[error("no scope named '{name}' on {path}")]
    UnknownScope { path: String, name: String },
}

impl EnumFieldError {
    pub(crate) fn invalid_value(value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            value: value.into(),
        }
    }
}
