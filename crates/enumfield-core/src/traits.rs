use crate::{error::EnumFieldError, host::EnumHost};
use std::collections::{BTreeMap, HashMap};

///
/// Record
///
/// Read access to the string attributes of a model instance.
/// `None` means the attribute is null or unknown.
///

pub trait Record {
    fn field_value(&self, field: &str) -> Option<&str>;
}

impl Record for BTreeMap<String, String> {
    fn field_value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, String, S> {
    fn field_value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, field: &str) -> Option<&str> {
        (**self).field_value(field)
    }
}

///
/// EnumModel
///
/// A model type that opts into enumerated fields.
/// Implemented by `#[derive(EnumFields)]`; can also be written by hand.
///

pub trait EnumModel: Record {
    /// Model name used in errors and declaration events.
    const MODEL_PATH: &'static str;

    /// Run every enum field declaration of the model against `host`.
    fn declare_enum_fields<H: EnumHost + ?Sized>(host: &mut H) -> Result<(), EnumFieldError>;
}
