use crate::{
    error::EnumFieldError,
    host::{EnumHost, Registration},
    model::{Constant, Predicate},
    naming::{self, Prefix},
    obs::{ArtifactKind, DeclareEvent},
    query::Filter,
    validate::InclusionValidation,
};
use derive_more::Deref;
use serde::Deserialize;
use std::sync::Arc;

///
/// ValueSet
///
/// Ordered, immutable sequence of raw enum values. Clones share one
/// allocation, so the aggregate constant and the inclusion validation see
/// the exact sequence passed to the declaration.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, PartialEq)]
#[serde(from = "Vec<String>")]
pub struct ValueSet(Arc<[String]>);

impl ValueSet {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// True when both sets are the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.to_vec()
    }
}

impl From<Vec<String>> for ValueSet {
    fn from(values: Vec<String>) -> Self {
        Self(values.into())
    }
}

impl From<&[&str]> for ValueSet {
    fn from(values: &[&str]) -> Self {
        values.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for ValueSet {
    fn from(values: [&str; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ValueSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<[&str]> for ValueSet {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for ValueSet {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

///
/// EnumFieldOptions
///
/// `None` for `allow_nil` / `allow_blank` means "not set", which the
/// inclusion validation treats as false.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EnumFieldOptions {
    pub message: Option<String>,
    pub allow_nil: Option<bool>,
    pub allow_blank: Option<bool>,
    pub prefix: Prefix,
}

impl EnumFieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn allow_nil(mut self, allow: bool) -> Self {
        self.allow_nil = Some(allow);
        self
    }

    #[must_use]
    pub const fn allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = Some(allow);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

// ============================================================================
// Declaration
// ============================================================================

///
/// declare_enum_field
///
/// Register an enumerated field on `host`. For each value, in order: check
/// its format, derive its method name, define its constant (first writer
/// wins), define its predicate and define its scope. Then define the
/// aggregate constant and register the inclusion validation.
///
/// Fails on the first value with a character outside `[A-Za-z0-9_\s-]`;
/// artifacts registered for earlier values are kept.
///
pub fn declare_enum_field<H: EnumHost + ?Sized>(
    host: &mut H,
    field: &str,
    possible_values: impl Into<ValueSet>,
    options: &EnumFieldOptions,
) -> Result<(), EnumFieldError> {
    let values = possible_values.into();
    let prefix = options.prefix.resolve(field);
    let prefix = prefix.as_deref();

    for value in values.iter() {
        if let Err(err) = naming::verify_format(value) {
            emit_invalid(host, field, value);
            return Err(err);
        }

        let method = naming::methodize(value);

        let constant = naming::constant_name(prefix, &method);
        define_constant(host, constant, Constant::Value(value.clone()));

        let predicate = naming::predicate_name(prefix, &method);
        let outcome = host.define_predicate(&predicate, Predicate::new(field, value.as_str()));
        emit(host, ArtifactKind::Predicate, predicate, outcome);

        let scope = naming::scope_name(&method);
        let outcome = host.register_scope(&scope, Filter::eq(field, value.as_str()));
        emit(host, ArtifactKind::Scope, scope, outcome);
    }

    let aggregate = naming::aggregate_constant_name(field);
    define_constant(host, aggregate, Constant::Values(values.clone()));

    let validation = InclusionValidation {
        field: field.to_string(),
        allowed: values,
        message: options.message.clone(),
        allow_nil: options.allow_nil,
        allow_blank: options.allow_blank,
    };
    let count = validation.allowed.len();
    host.register_inclusion_validation(validation);

    let event = DeclareEvent::ValidationRegistered {
        model: host.model_path().to_string(),
        field: field.to_string(),
        values: count,
    };
    host.sink().record(event);

    Ok(())
}

fn define_constant<H: EnumHost + ?Sized>(host: &mut H, name: String, constant: Constant) {
    let outcome = if host.constant_defined(&name) {
        Registration::Skipped
    } else {
        host.set_constant(&name, constant);
        Registration::Defined
    };

    emit(host, ArtifactKind::Constant, name, outcome);
}

fn emit<H: EnumHost + ?Sized>(host: &H, kind: ArtifactKind, name: String, outcome: Registration) {
    let model = host.model_path().to_string();
    let event = match outcome {
        Registration::Defined => DeclareEvent::Defined { model, kind, name },
        Registration::Skipped => DeclareEvent::NameCollision { model, kind, name },
    };

    host.sink().record(event);
}

fn emit_invalid<H: EnumHost + ?Sized>(host: &H, field: &str, value: &str) {
    host.sink().record(DeclareEvent::InvalidValue {
        model: host.model_path().to_string(),
        field: field.to_string(),
        value: value.to_string(),
    });
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::ModelSchema, obs::RecordingSink};
    use std::collections::BTreeMap;

    fn person(gender: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("gender".to_string(), gender.to_string())])
    }

    fn gender_schema(options: &EnumFieldOptions) -> ModelSchema {
        let mut schema = ModelSchema::new("Person");
        declare_enum_field(&mut schema, "gender", ["Male", "Female"], options)
            .expect("gender values are valid");

        schema
    }

    #[test]
    fn declares_constants_predicates_and_scopes() {
        let schema = gender_schema(&EnumFieldOptions::new());

        assert_eq!(
            schema.values_constant("GENDERS").expect("aggregate constant"),
            &["Male", "Female"]
        );
        assert_eq!(schema.value_constant("MALE"), Some("Male"));
        assert_eq!(schema.value_constant("FEMALE"), Some("Female"));

        let male = person("Male");
        assert_eq!(schema.is(&male, "male?"), Ok(true));
        assert_eq!(schema.is(&male, "female?"), Ok(false));

        let female = person("Female");
        assert_eq!(schema.is(&female, "male?"), Ok(false));
        assert_eq!(schema.is(&female, "female?"), Ok(true));

        assert_eq!(schema.scope("male"), Some(&Filter::eq("gender", "Male")));
        assert_eq!(schema.scope("female"), Some(&Filter::eq("gender", "Female")));
    }

    #[test]
    fn aggregate_constant_shares_the_declared_sequence() {
        let values = ValueSet::from(["Male", "Female"]);
        let mut schema = ModelSchema::new("Person");
        declare_enum_field(&mut schema, "gender", values.clone(), &EnumFieldOptions::new())
            .expect("gender values are valid");

        let aggregate = schema.values_constant("GENDERS").expect("aggregate constant");
        assert!(aggregate.ptr_eq(&values));
        assert!(schema.validations()[0].allowed.ptr_eq(&values));
    }

    #[test]
    fn multi_word_and_mixed_case_values_are_methodized() {
        let mut schema = ModelSchema::new("Mocked");
        declare_enum_field(
            &mut schema,
            "field",
            ["choice one", "choice-two", "other"],
            &EnumFieldOptions::new(),
        )
        .expect("values are valid");
        declare_enum_field(
            &mut schema,
            "kind",
            ["Choice One", "ChoiceTwo", "Other"],
            &EnumFieldOptions::new(),
        )
        .expect("values are valid");

        assert!(schema.predicate("choice_one?").is_some());
        assert!(schema.predicate("choice_two?").is_some());
        assert!(schema.predicate("choicetwo?").is_some());
        assert_eq!(schema.value_constant("CHOICE_ONE"), Some("choice one"));
        assert_eq!(schema.value_constant("CHOICETWO"), Some("ChoiceTwo"));
    }

    #[test]
    fn prefix_applies_to_constants_and_predicates_only() {
        let schema = gender_schema(&EnumFieldOptions::new().prefix(true));
        assert!(schema.predicate("gender_male?").is_some());
        assert!(schema.predicate("male?").is_none());
        assert_eq!(schema.value_constant("GENDER_MALE"), Some("Male"));
        assert!(schema.scope("male").is_some());

        let schema = gender_schema(&EnumFieldOptions::new().prefix("sex"));
        assert!(schema.predicate("sex_male?").is_some());
        assert_eq!(schema.value_constant("SEX_FEMALE"), Some("Female"));

        let schema = gender_schema(&EnumFieldOptions::new().prefix(false));
        assert!(schema.predicate("male?").is_some());
    }

    #[test]
    fn invalid_value_stops_the_declaration() {
        let mut schema = ModelSchema::new("Mocked");
        let err = declare_enum_field(
            &mut schema,
            "field",
            ["good", "*&%^%?!", "later"],
            &EnumFieldOptions::new(),
        )
        .expect_err("punctuation must be rejected");

        assert_eq!(
            err,
            EnumFieldError::InvalidEnumValue {
                value: "*&%^%?!".to_string()
            }
        );

        // registrations before the bad value are not rolled back
        assert!(schema.predicate("good?").is_some());
        assert!(schema.predicate("later?").is_none());
        assert!(schema.values_constant("FIELDS").is_none());
        assert!(schema.validations().is_empty());
    }

    #[test]
    fn empty_value_set_registers_an_empty_inclusion() {
        let mut schema = ModelSchema::new("Mocked");
        declare_enum_field(
            &mut schema,
            "field",
            ValueSet::from(Vec::<String>::new()),
            &EnumFieldOptions::new().allow_nil(true),
        )
        .expect("empty set is accepted");

        assert!(schema.values_constant("FIELDS").expect("aggregate").is_empty());
        assert!(schema.validate(&person("Male")).is_ok());
        assert!(
            schema
                .validate(&BTreeMap::from([("field".to_string(), "x".to_string())]))
                .is_err()
        );
    }

    #[test]
    fn colliding_names_keep_the_first_definition() {
        let sink = Arc::new(RecordingSink::new());
        let mut schema = ModelSchema::new("Mocked").with_sink(sink.clone());

        declare_enum_field(&mut schema, "grade", ["A", "a"], &EnumFieldOptions::new())
            .expect("values are valid");

        assert_eq!(schema.value_constant("A"), Some("A"));
        let predicate = schema.predicate("a?").expect("predicate");
        assert_eq!(predicate.value, "A");
        assert_eq!(schema.scope("a"), Some(&Filter::eq("grade", "A")));

        assert_eq!(
            sink.collisions(),
            vec![
                (ArtifactKind::Constant, "A".to_string()),
                (ArtifactKind::Predicate, "a?".to_string()),
                (ArtifactKind::Scope, "a".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_declaration_keeps_existing_aggregate_constant() {
        let mut schema = gender_schema(&EnumFieldOptions::new());
        declare_enum_field(&mut schema, "gender", ["Other"], &EnumFieldOptions::new())
            .expect("values are valid");

        assert_eq!(
            schema.values_constant("GENDERS").expect("aggregate"),
            &["Male", "Female"]
        );
        assert_eq!(schema.value_constant("OTHER"), Some("Other"));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: EnumFieldOptions =
            serde_json::from_str(r#"{ "message": "bad gender", "allow_nil": true, "prefix": "sex" }"#)
                .expect("valid options");

        assert_eq!(
            options,
            EnumFieldOptions::new()
                .message("bad gender")
                .allow_nil(true)
                .prefix("sex")
        );

        let empty: EnumFieldOptions = serde_json::from_str("{}").expect("empty options");
        assert_eq!(empty, EnumFieldOptions::default());
    }
}
