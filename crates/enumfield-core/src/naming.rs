//! Name derivation for enumerated values.
//!
//! Every generated artifact name (constant, predicate, scope, aggregate
//! constant) is computed here so that the runtime declarator and the derive
//! macro agree byte for byte.

use crate::error::EnumFieldError;
use serde::{Deserialize, Deserializer};

///
/// Prefix
///
/// Optional namespace prepended to constant and predicate names.
/// Deserializes from `false`, `true` or a string.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Prefix {
    #[default]
    None,
    /// Use the field name.
    Field,
    Custom(String),
}

impl Prefix {
    /// Resolve the prefix for `field`, including the trailing underscore.
    #[must_use]
    pub fn resolve(&self, field: &str) -> Option<String> {
        match self {
            Self::None => None,
            Self::Field => Some(format!("{field}_")),
            Self::Custom(prefix) => Some(format!("{prefix}_")),
        }
    }
}

impl From<bool> for Prefix {
    fn from(flag: bool) -> Self {
        if flag { Self::Field } else { Self::None }
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Self::Custom(prefix.to_string())
    }
}

impl From<String> for Prefix {
    fn from(prefix: String) -> Self {
        Self::Custom(prefix)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => flag.into(),
            Repr::Name(name) => name.into(),
        })
    }
}

// ============================================================================
// Value format
// ============================================================================

/// Word characters, whitespace, underscore and hyphen only.
#[must_use]
pub const fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_separator_space(c)
}

// ASCII whitespace plus vertical tab.
const fn is_separator_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Reject values that cannot be turned into an identifier.
pub fn verify_format(value: &str) -> Result<(), EnumFieldError> {
    if value.chars().all(is_value_char) {
        Ok(())
    } else {
        Err(EnumFieldError::invalid_value(value))
    }
}

/// Lower-case `value` and collapse each hyphen/whitespace run into one `_`.
///
/// Case boundaries are not split: `ChoiceTwo` becomes `choicetwo`.
#[must_use]
pub fn methodize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_separator = false;

    for c in value.chars() {
        if c == '-' || is_separator_space(c) {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }

    out
}

// ============================================================================
// Artifact names
// ============================================================================

fn prefixed(prefix: Option<&str>, method: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{method}"),
        None => method.to_string(),
    }
}

#[must_use]
pub fn constant_name(prefix: Option<&str>, method: &str) -> String {
    prefixed(prefix, method).to_ascii_uppercase()
}

#[must_use]
pub fn predicate_name(prefix: Option<&str>, method: &str) -> String {
    format!("{}?", prefixed(prefix, method))
}

/// Scopes are never prefixed.
#[must_use]
pub fn scope_name(method: &str) -> String {
    method.to_string()
}

#[must_use]
pub fn aggregate_constant_name(field: &str) -> String {
    pluralize(field).to_ascii_uppercase()
}

// ============================================================================
// Pluralization
// ============================================================================

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "jeans",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

// Whole words only: `box` is not an `ox`.
const WHOLE_WORD_IRREGULAR: &[(&str, &str)] = &[("ox", "oxen")];

// Matched as word endings, so `salesperson` and `fireman` follow `person` and `man`.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("louse", "lice"),
    ("man", "men"),
    ("mouse", "mice"),
    ("move", "moves"),
    ("person", "people"),
    ("sex", "sexes"),
    ("tooth", "teeth"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

// (suffix, characters to drop, replacement), first match wins.
const SUFFIX_RULES: &[(&str, usize, &str)] = &[
    ("quiz", 0, "zes"),
    ("matrix", 2, "ices"),
    ("vertex", 2, "ices"),
    ("index", 2, "ices"),
    ("alias", 0, "es"),
    ("status", 0, "es"),
    ("octopus", 2, "i"),
    ("virus", 2, "i"),
    ("bus", 0, "es"),
    ("buffalo", 0, "es"),
    ("tomato", 0, "es"),
    ("axis", 2, "es"),
    ("testis", 2, "es"),
    ("sis", 2, "es"),
    ("hive", 0, "s"),
    ("tum", 2, "a"),
    ("ium", 2, "a"),
    ("ch", 0, "es"),
    ("sh", 0, "es"),
    ("ss", 0, "es"),
    ("x", 0, "es"),
];

/// Pluralize an English word or the last segment of a snake_case name.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let (head, last) = match word.rfind('_') {
        Some(index) => word.split_at(index + 1),
        None => ("", word),
    };

    if last.is_empty() {
        return word.to_string();
    }

    format!("{head}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = WHOLE_WORD_IRREGULAR
        .iter()
        .find(|(single, _)| *single == lower)
    {
        return match_case(word, plural);
    }

    if let Some((single, plural)) = IRREGULAR
        .iter()
        .find(|(single, _)| lower.ends_with(single))
    {
        let (head, tail) = word.split_at(word.len() - single.len());
        return format!("{head}{}", match_case(tail, plural));
    }

    if let Some((_, drop, replacement)) = SUFFIX_RULES
        .iter()
        .find(|(suffix, _, _)| lower.ends_with(suffix))
    {
        let stem = &word[..word.len() - drop];
        return format!("{stem}{replacement}");
    }

    if let Some(stem) = consonant_y_stem(&lower) {
        return format!("{}ies", &word[..stem]);
    }

    if let Some(stem) = f_stem(&lower) {
        return format!("{}ves", &word[..stem]);
    }

    if lower.ends_with('s') {
        return word.to_string();
    }

    format!("{word}s")
}

// `city` -> `cit`, `soliloquy` -> `soliloqu`; vowel + y keeps its y.
fn consonant_y_stem(lower: &str) -> Option<usize> {
    let stem = lower.strip_suffix('y')?;
    let before = stem.chars().last()?;

    if stem.ends_with("qu") || !matches!(before, 'a' | 'e' | 'i' | 'o' | 'u' | 'y') {
        Some(stem.len())
    } else {
        None
    }
}

// `knife` -> `kni`, `wolf` -> `wol`, `half` -> `hal`; `roof` and `cafe` keep.
fn f_stem(lower: &str) -> Option<usize> {
    if let Some(stem) = lower.strip_suffix("fe") {
        return stem
            .chars()
            .last()
            .filter(|c| *c != 'f' && !matches!(c, 'a' | 'e' | 'o' | 'u'))
            .map(|_| stem.len());
    }

    let stem = lower.strip_suffix('f')?;
    stem.chars()
        .last()
        .filter(|c| matches!(c, 'l' | 'r'))
        .map(|_| stem.len())
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().all(|c| !c.is_ascii_lowercase()) {
        return replacement.to_ascii_uppercase();
    }

    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(head)) if first.is_ascii_uppercase() => {
            format!("{}{}", head.to_ascii_uppercase(), chars.as_str())
        }
        _ => replacement.to_string(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn methodize_normalizes_case_and_separators() {
        assert_eq!(methodize("Choice One"), "choice_one");
        assert_eq!(methodize("choice-two"), "choice_two");
        assert_eq!(methodize("ChoiceTwo"), "choicetwo");
        assert_eq!(methodize("out of this world"), "out_of_this_world");
        assert_eq!(methodize("a - \tb"), "a_b");
        assert_eq!(methodize(""), "");
    }

    #[test]
    fn verify_format_rejects_punctuation() {
        assert!(verify_format("Male").is_ok());
        assert!(verify_format("choice one").is_ok());
        assert!(verify_format("choice-two_3").is_ok());
        assert!(verify_format("").is_ok());

        let err = verify_format("*&%^%?!").expect_err("punctuation must be rejected");
        assert_eq!(
            err,
            EnumFieldError::InvalidEnumValue {
                value: "*&%^%?!".to_string()
            }
        );
        assert!(verify_format("café").is_err());
        assert!(verify_format("a.b").is_err());
    }

    #[test]
    fn prefix_resolves_from_options() {
        assert_eq!(Prefix::None.resolve("gender"), None);
        assert_eq!(Prefix::from(false).resolve("gender"), None);
        assert_eq!(Prefix::from(true).resolve("gender").as_deref(), Some("gender_"));
        assert_eq!(Prefix::from("sex").resolve("gender").as_deref(), Some("sex_"));
    }

    #[test]
    fn prefix_deserializes_from_bool_or_string() {
        let flag: Prefix = serde_json::from_str("true").expect("bool prefix");
        let off: Prefix = serde_json::from_str("false").expect("bool prefix");
        let custom: Prefix = serde_json::from_str("\"sex\"").expect("string prefix");

        assert_eq!(flag, Prefix::Field);
        assert_eq!(off, Prefix::None);
        assert_eq!(custom, Prefix::Custom("sex".to_string()));
    }

    #[test]
    fn artifact_names_apply_prefix() {
        let prefix = Prefix::Field.resolve("gender");

        assert_eq!(constant_name(prefix.as_deref(), "male"), "GENDER_MALE");
        assert_eq!(predicate_name(prefix.as_deref(), "male"), "gender_male?");
        assert_eq!(predicate_name(None, "male"), "male?");
        assert_eq!(scope_name("male"), "male");
    }

    #[test]
    fn pluralize_covers_common_field_names() {
        let cases = [
            ("gender", "genders"),
            ("status", "statuses"),
            ("category", "categories"),
            ("day", "days"),
            ("box", "boxes"),
            ("match", "matches"),
            ("class", "classes"),
            ("person", "people"),
            ("child", "children"),
            ("wolf", "wolves"),
            ("knife", "knives"),
            ("roof", "roofs"),
            ("analysis", "analyses"),
            ("index", "indices"),
            ("quiz", "quizzes"),
            ("medium", "media"),
            ("datum", "data"),
            ("news", "news"),
            ("species", "species"),
            ("kind", "kinds"),
            ("user_status", "user_statuses"),
            ("sales_person", "sales_people"),
            ("series", "series"),
            ("salesperson", "salespeople"),
            ("fireman", "firemen"),
            ("Chairwoman", "Chairwomen"),
            ("grandchild", "grandchildren"),
            ("ox", "oxen"),
            ("box", "boxes"),
        ];

        for (single, plural) in cases {
            assert_eq!(pluralize(single), plural, "pluralize({single})");
        }
    }

    #[test]
    fn aggregate_constant_is_upper_plural() {
        assert_eq!(aggregate_constant_name("gender"), "GENDERS");
        assert_eq!(aggregate_constant_name("status"), "STATUSES");
        assert_eq!(aggregate_constant_name("Person"), "PEOPLE");
    }

    proptest! {
        #[test]
        fn accepted_values_methodize_to_identifier_chars(value in "[A-Za-z0-9_ \\-]{0,24}") {
            prop_assert!(verify_format(&value).is_ok());

            let method = methodize(&value);
            prop_assert!(method.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!method.contains("__") || value.contains('_'));
        }

        #[test]
        fn methodize_is_case_insensitive(value in "[A-Za-z0-9 \\-]{0,24}") {
            prop_assert_eq!(methodize(&value), methodize(&value.to_ascii_uppercase()));
            prop_assert_eq!(methodize(&value), methodize(&value.to_ascii_lowercase()));
        }

        #[test]
        fn punctuation_is_always_rejected(
            head in "[A-Za-z0-9]{0,8}",
            bad in "[!?*&%^.,;:'\"()]",
            tail in "[A-Za-z0-9]{0,8}",
        ) {
            let value = format!("{head}{bad}{tail}");
            prop_assert!(verify_format(&value).is_err());
        }
    }
}
