use crate::{
    model::{Constant, Predicate},
    obs::DeclareSink,
    query::Filter,
    validate::InclusionValidation,
};

///
/// Registration
/// Outcome of defining a named artifact on a host.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Registration {
    Defined,
    /// The name was already taken; the existing definition is kept.
    Skipped,
}

///
/// EnumHost
///
/// Capabilities a model type must offer so enumerated fields can be
/// declared on it. Names are unique per host and the first definition of a
/// name wins for every artifact kind.
///

pub trait EnumHost {
    /// Model name used in events and errors.
    fn model_path(&self) -> &str;

    fn register_inclusion_validation(&mut self, validation: InclusionValidation);

    fn register_scope(&mut self, name: &str, filter: Filter) -> Registration;

    fn define_predicate(&mut self, name: &str, predicate: Predicate) -> Registration;

    fn constant_defined(&self, name: &str) -> bool;

    fn set_constant(&mut self, name: &str, constant: Constant);

    fn sink(&self) -> &dyn DeclareSink;
}
