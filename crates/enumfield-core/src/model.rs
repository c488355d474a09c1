//! Per-model registry of enumerated field artifacts.
//!
//! `ModelSchema` is the in-crate `EnumHost`: it owns the constants,
//! predicates, scopes and inclusion validations declared for one model type
//! and evaluates them against records.

use crate::{
    declare::{EnumFieldOptions, ValueSet, declare_enum_field},
    error::EnumFieldError,
    host::{EnumHost, Registration},
    obs::{DeclareSink, TracingSink},
    query::{Filter, Query},
    traits::{EnumModel, Record},
    validate::{InclusionValidation, ValidateError, validate_record},
};
use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

///
/// Constant
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Constant {
    /// One raw enum value.
    Value(String),
    /// The aggregate constant holding a whole value set.
    Values(ValueSet),
}

impl Constant {
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Values(_) => None,
        }
    }

    #[must_use]
    pub const fn as_values(&self) -> Option<&ValueSet> {
        match self {
            Self::Value(_) => None,
            Self::Values(values) => Some(values),
        }
    }
}

///
/// Predicate
/// True when the record's `field` equals `value`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub value: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// A null attribute never matches.
    pub fn test<R: Record + ?Sized>(&self, record: &R) -> bool {
        record.field_value(&self.field) == Some(self.value.as_str())
    }
}

///
/// ModelSchema
///

pub struct ModelSchema {
    path: String,
    constants: BTreeMap<String, Constant>,
    predicates: BTreeMap<String, Predicate>,
    scopes: BTreeMap<String, Filter>,
    validations: Vec<InclusionValidation>,
    sink: Arc<dyn DeclareSink>,
}

impl ModelSchema {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            constants: BTreeMap::new(),
            predicates: BTreeMap::new(),
            scopes: BTreeMap::new(),
            validations: Vec::new(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the declaration sink (defaults to `TracingSink`).
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DeclareSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build the schema of a model that declares its own enum fields.
    pub fn build<M: EnumModel>() -> Result<Self, EnumFieldError> {
        Self::build_with_sink::<M>(Arc::new(TracingSink))
    }

    pub fn build_with_sink<M: EnumModel>(sink: Arc<dyn DeclareSink>) -> Result<Self, EnumFieldError> {
        let mut schema = Self::new(M::MODEL_PATH).with_sink(sink);
        M::declare_enum_fields(&mut schema)?;

        Ok(schema)
    }

    /// Declare an enumerated field on this schema.
    pub fn declare(
        &mut self,
        field: &str,
        possible_values: impl Into<ValueSet>,
        options: &EnumFieldOptions,
    ) -> Result<&mut Self, EnumFieldError> {
        declare_enum_field(self, field, possible_values, options)?;

        Ok(self)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    // ------------------------------------------------------------------
    // Constants
    // ------------------------------------------------------------------

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    #[must_use]
    pub fn value_constant(&self, name: &str) -> Option<&str> {
        self.constant(name).and_then(Constant::as_value)
    }

    #[must_use]
    pub fn values_constant(&self, name: &str) -> Option<&ValueSet> {
        self.constant(name).and_then(Constant::as_values)
    }

    pub fn constant_names(&self) -> impl Iterator<Item = &str> {
        self.constants.keys().map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Look up a predicate; the trailing `?` is optional.
    #[must_use]
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(predicate_key(name).as_ref())
    }

    pub fn predicate_names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Evaluate the predicate `name` against `record`.
    pub fn is<R: Record + ?Sized>(&self, record: &R, name: &str) -> Result<bool, EnumFieldError> {
        self.predicate(name)
            .map(|predicate| predicate.test(record))
            .ok_or_else(|| EnumFieldError::UnknownPredicate {
                path: self.path.clone(),
                name: name.to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    #[must_use]
    pub fn scope(&self, name: &str) -> Option<&Filter> {
        self.scopes.get(name)
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    /// Unrestricted query over this model.
    #[must_use]
    pub const fn all(&self) -> Query<'_> {
        Query::new(self)
    }

    /// Query restricted by the scope `name`.
    pub fn query(&self, name: &str) -> Result<Query<'_>, EnumFieldError> {
        self.all().scope(name)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    #[must_use]
    pub fn validations(&self) -> &[InclusionValidation] {
        &self.validations
    }

    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<(), ValidateError> {
        validate_record(&self.validations, record)
    }
}

impl EnumHost for ModelSchema {
    fn model_path(&self) -> &str {
        &self.path
    }

    fn register_inclusion_validation(&mut self, validation: InclusionValidation) {
        self.validations.push(validation);
    }

    fn register_scope(&mut self, name: &str, filter: Filter) -> Registration {
        insert_first(&mut self.scopes, name, filter)
    }

    fn define_predicate(&mut self, name: &str, predicate: Predicate) -> Registration {
        insert_first(&mut self.predicates, name, predicate)
    }

    fn constant_defined(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    fn set_constant(&mut self, name: &str, constant: Constant) {
        self.constants.insert(name.to_string(), constant);
    }

    fn sink(&self) -> &dyn DeclareSink {
        self.sink.as_ref()
    }
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("path", &self.path)
            .field("constants", &self.constants)
            .field("predicates", &self.predicates)
            .field("scopes", &self.scopes)
            .field("validations", &self.validations)
            .finish_non_exhaustive()
    }
}

fn insert_first<T>(map: &mut BTreeMap<String, T>, name: &str, item: T) -> Registration {
    if map.contains_key(name) {
        Registration::Skipped
    } else {
        map.insert(name.to_string(), item);
        Registration::Defined
    }
}

fn predicate_key(name: &str) -> Cow<'_, str> {
    if name.ends_with('?') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}?"))
    }
}

///
/// TESTS
///
