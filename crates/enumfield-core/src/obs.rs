//! Declaration observability boundary.
//!
//! Declarations report what they register through `DeclareEvent` and a
//! caller-injected `DeclareSink`. Sinks must not affect declaration semantics.

use derive_more::Display;
use std::sync::{Mutex, PoisonError};

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ArtifactKind {
    #[display("constant")]
    Constant,
    #[display("predicate")]
    Predicate,
    #[display("scope")]
    Scope,
}

///
/// DeclareEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeclareEvent {
    Defined {
        model: String,
        kind: ArtifactKind,
        name: String,
    },
    NameCollision {
        model: String,
        kind: ArtifactKind,
        name: String,
    },
    ValidationRegistered {
        model: String,
        field: String,
        values: usize,
    },
    InvalidValue {
        model: String,
        field: String,
        value: String,
    },
}

///
/// DeclareSink
///

pub trait DeclareSink: Send + Sync {
    fn record(&self, event: DeclareEvent);
}

///
/// TracingSink
/// Default sink; forwards events to `tracing`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DeclareSink for TracingSink {
    fn record(&self, event: DeclareEvent) {
        match event {
            DeclareEvent::Defined { model, kind, name } => {
                tracing::debug!(%model, %kind, %name, "enum field artifact defined");
            }
            DeclareEvent::NameCollision { model, kind, name } => {
                tracing::warn!(%model, %kind, %name, "enum field name already defined, keeping first");
            }
            DeclareEvent::ValidationRegistered {
                model,
                field,
                values,
            } => {
                tracing::debug!(%model, %field, values, "inclusion validation registered");
            }
            DeclareEvent::InvalidValue {
                model,
                field,
                value,
            } => {
                tracing::error!(%model, %field, %value, "invalid enum value");
            }
        }
    }
}

///
/// RecordingSink
/// Keeps every event in memory; used by tests and tooling.
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DeclareEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<DeclareEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn collisions(&self) -> Vec<(ArtifactKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DeclareEvent::NameCollision { kind, name, .. } => Some((kind, name)),
                _ => None,
            })
            .collect()
    }
}

impl DeclareSink for RecordingSink {
    fn record(&self, event: DeclareEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
