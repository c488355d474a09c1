//! ## Crate layout
//! - `core`: runtime declarator, model schema, validation, scopes and config.
//! - `error`: the public error type wrapping every failure of the crate.
//! - `EnumFields`: derive macro generating per-value constants, predicates
//!   and scopes at build time.
//!
//! ```ignore
//! #[derive(EnumFields)]
//! pub struct Person {
//!     #[enum_field(values("Male", "Female"))]
//!     pub gender: String,
//! }
//!
//! assert_eq!(Person::GENDERS, &["Male", "Female"]);
//! assert!(Person { gender: Person::MALE.into() }.is_male());
//! ```

pub use enumfield_core as core;
pub use enumfield_derive::EnumFields;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        EnumFields,
        core::{
            config::ModelConfig,
            declare::{EnumFieldOptions, ValueSet, declare_enum_field},
            host::EnumHost as _,
            model::ModelSchema,
            naming::Prefix,
            query::{Filter, Query},
            traits::{EnumModel, Record as _},
        },
    };
}
