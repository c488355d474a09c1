//! Enum field declarations loaded from TOML.
//!
//! ```toml
//! path = "Person"
//!
//! [[field]]
//! name = "gender"
//! values = ["Male", "Female"]
//! prefix = true
//! allow_nil = true
//! ```

use crate::{
    ThisError,
    declare::{EnumFieldOptions, ValueSet, declare_enum_field},
    error::EnumFieldError,
    host::EnumHost,
    model::ModelSchema,
    naming::Prefix,
};
use serde::Deserialize;
use std::{fs, path::Path};

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error(transparent)]
    Declare(#[from] EnumFieldError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid enum field config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// ModelConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub path: String,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,
}

impl ModelConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    /// Declare every field, in file order, stopping at the first error.
    pub fn apply<H: EnumHost + ?Sized>(&self, host: &mut H) -> Result<(), EnumFieldError> {
        for field in &self.fields {
            declare_enum_field(host, &field.name, field.values.clone(), &field.options())?;
        }

        Ok(())
    }

    pub fn into_schema(self) -> Result<ModelSchema, EnumFieldError> {
        let mut schema = ModelSchema::new(self.path.as_str());
        self.apply(&mut schema)?;

        Ok(schema)
    }
}

///
/// FieldConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    pub values: ValueSet,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub allow_nil: Option<bool>,

    #[serde(default)]
    pub allow_blank: Option<bool>,

    #[serde(default)]
    pub prefix: Prefix,
}

impl FieldConfig {
    #[must_use]
    pub fn options(&self) -> EnumFieldOptions {
        EnumFieldOptions {
            message: self.message.clone(),
            allow_nil: self.allow_nil,
            allow_blank: self.allow_blank,
            prefix: self.prefix.clone(),
        }
    }
}

///
/// TESTS
///
