//! Core runtime for EnumField: value-name derivation, the host capability
//! trait, the per-model schema registry, inclusion validation, query scopes,
//! TOML configuration and the declaration observability boundary.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod declare;
pub mod error;
pub mod host;
pub mod model;
pub mod naming;
pub mod obs;
pub mod query;
pub mod traits;
pub mod validate;

pub use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Failure message attached by the inclusion validation when the declaration
/// did not supply one.
pub const DEFAULT_INCLUSION_MESSAGE: &str = "is not included in the list";

///
/// Prelude
///
/// Domain vocabulary only; errors and sinks are imported from their modules.
///

pub mod prelude {
    pub use crate::{
        declare::{EnumFieldOptions, ValueSet, declare_enum_field},
        host::EnumHost,
        model::{Constant, ModelSchema, Predicate},
        naming::Prefix,
        query::{Filter, Query},
        traits::{EnumModel, Record},
    };
}
