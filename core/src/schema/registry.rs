//! schema/registry.rs
//! Schema resolution by (topic, version).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use log::debug;
use parking_lot::RwLock;

use crate::schema::types::{Schema, TopicId};

/// Resolves a schema by version for one topic.
///
/// Implementations may block (a remote registry is a network call); the
/// caller owns timeouts. Failures are returned as-is and never retried here.
pub trait SchemaRegistry: Send + Sync {
    fn resolve_schema(&self, topic: &TopicId, version: i32) -> Result<Arc<Schema>, RegistryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No schema registered for this topic and version.
    NotFound { topic: TopicId, version: i32 },

    /// Registry backend failed (transport, auth, ...).
    Unavailable(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NotFound { topic, version } =>
                write!(f, "schema version {} not found for topic {}", version, topic),
            RegistryError::Unavailable(msg) =>
                write!(f, "schema registry unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Thread-safe in-process registry.
#[derive(Debug, Default)]
pub struct InMemorySchemaRegistry {
    schemas: RwLock<HashMap<(TopicId, i32), Arc<Schema>>>,
}

impl InMemorySchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under its own version. Replaces any previous entry.
    pub fn register(&self, topic: TopicId, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        debug!("registering schema version {} for {}", schema.version(), topic);
        self.schemas
            .write()
            .insert((topic, schema.version()), Arc::clone(&schema));
        schema
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}

impl SchemaRegistry for InMemorySchemaRegistry {
    fn resolve_schema(&self, topic: &TopicId, version: i32) -> Result<Arc<Schema>, RegistryError> {
        self.schemas
            .read()
            .get(&(topic.clone(), version))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound { topic: topic.clone(), version })
    }
}
