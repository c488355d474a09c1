use crate::{DEFAULT_INCLUSION_MESSAGE, ThisError, declare::ValueSet, traits::Record};
use std::collections::BTreeMap;

///
/// ValidateError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    /// Failure messages keyed by field name.
    #[error("validation failed: {}", render_issues(.0))]
    ValidationFailed(BTreeMap<String, Vec<String>>),
}

impl ValidateError {
    #[must_use]
    pub const fn issues(&self) -> &BTreeMap<String, Vec<String>> {
        match self {
            Self::ValidationFailed(issues) => issues,
        }
    }
}

fn render_issues(issues: &BTreeMap<String, Vec<String>>) -> String {
    issues
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field} {m}")))
        .collect::<Vec<_>>()
        .join(", ")
}

///
/// InclusionValidation
///
/// Rejects records whose field value is not in `allowed`.
/// A null value passes only with `allow_nil` or `allow_blank`; a blank
/// value (empty or whitespace) passes with `allow_blank`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InclusionValidation {
    pub field: String,
    pub allowed: ValueSet,
    pub message: Option<String>,
    pub allow_nil: Option<bool>,
    pub allow_blank: Option<bool>,
}

impl InclusionValidation {
    /// Failure message when the record is rejected, `None` when it passes.
    pub fn check<R: Record + ?Sized>(&self, record: &R) -> Option<&str> {
        let allow_nil = self.allow_nil.unwrap_or(false);
        let allow_blank = self.allow_blank.unwrap_or(false);

        let passes = match record.field_value(&self.field) {
            None => allow_nil || allow_blank,
            Some(value) if allow_blank && is_blank(value) => true,
            Some(value) => self.allowed.contains(value),
        };

        if passes { None } else { Some(self.message()) }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_INCLUSION_MESSAGE)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

///
/// validate_record
/// Run every validation, collecting failures by field.
///
pub fn validate_record<R: Record + ?Sized>(
    validations: &[InclusionValidation],
    record: &R,
) -> Result<(), ValidateError> {
    let mut issues: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for validation in validations {
        if let Some(message) = validation.check(record) {
            issues
                .entry(validation.field.clone())
                .or_default()
                .push(message.to_string());
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::ValidationFailed(issues))
    }
}

///
/// TESTS
///
