//! Bundled engine, queries, and visibility over a single store.

use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::engine::RelationshipEngine;
use crate::query::RelationshipQueries;
use crate::storage::{EdgeStore, MemoryEdgeStore};
use crate::visibility::VisibilityEvaluator;

/// The relationship graph subsystem, wired up.
///
/// All components share one [`EdgeStore`] and one [`UserDirectory`];
/// the engine is the sole writer, the other two only read.
pub struct RelationshipService {
    engine: RelationshipEngine,
    queries: RelationshipQueries,
    visibility: VisibilityEvaluator,
    store: Arc<dyn EdgeStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RelationshipService {
    pub fn new(store: Arc<dyn EdgeStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            engine: RelationshipEngine::new(store.clone(), directory.clone()),
            queries: RelationshipQueries::new(store.clone(), directory.clone()),
            visibility: VisibilityEvaluator::new(store.clone(), directory.clone()),
            store,
            directory,
        }
    }

    /// Convenience constructor over a fresh in-memory store.
    pub fn in_memory(directory: Arc<dyn UserDirectory>) -> Self {
        Self::new(Arc::new(MemoryEdgeStore::new()), directory)
    }

    /// The action state machine; the only writer.
    pub fn engine(&self) -> &RelationshipEngine {
        &self.engine
    }

    /// Read-only aggregate views.
    pub fn queries(&self) -> &RelationshipQueries {
        &self.queries
    }

    /// Protected-content visibility decisions.
    pub fn visibility(&self) -> &VisibilityEvaluator {
        &self.visibility
    }

    /// The shared edge store.
    pub fn store(&self) -> Arc<dyn EdgeStore> {
        Arc::clone(&self.store)
    }

    /// The shared user directory.
    pub fn directory(&self) -> Arc<dyn UserDirectory> {
        Arc::clone(&self.directory)
    }
}
