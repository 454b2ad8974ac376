//! In-memory edge storage backend.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;

use crate::models::{DirectedEdge, EdgeStatus, UserId};
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::traits::EdgeStore;

/// Edge store backed by a sharded concurrent map.
///
/// The map is keyed by the ordered pair, and every mutation happens
/// under that key's shard lock, which makes the entry itself the
/// uniqueness constraint: concurrent creates resolve to one winner,
/// and conditional updates/deletes observe a consistent status.
#[derive(Debug, Default)]
pub struct MemoryEdgeStore {
    edges: DashMap<(UserId, UserId), DirectedEdge>,
}

impl MemoryEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edges currently stored, regardless of status.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[async_trait]
impl EdgeStore for MemoryEdgeStore {
    async fn create_edge(&self, edge: DirectedEdge) -> StorageResult<()> {
        let (from, to) = edge.key();
        match self.edges.entry((from, to)) {
            Entry::Occupied(_) => Err(StorageError::Conflict { from, to }),
            Entry::Vacant(slot) => {
                trace!(%from, %to, status = %edge.status, "edge created");
                slot.insert(edge);
                Ok(())
            }
        }
    }

    async fn update_status(
        &self,
        from: UserId,
        to: UserId,
        new_status: EdgeStatus,
    ) -> StorageResult<DirectedEdge> {
        match self.edges.get_mut(&(from, to)) {
            Some(mut edge) if edge.status == EdgeStatus::Pending => {
                edge.status = new_status;
                edge.since = Utc::now();
                trace!(%from, %to, status = %new_status, "edge status updated");
                Ok(edge.value().clone())
            }
            _ => Err(StorageError::NotFound { from, to }),
        }
    }

    async fn delete_edge(
        &self,
        from: UserId,
        to: UserId,
        expected: Option<EdgeStatus>,
    ) -> StorageResult<DirectedEdge> {
        let removed = self
            .edges
            .remove_if(&(from, to), |_, edge| {
                expected.map_or(true, |status| edge.status == status)
            })
            .map(|(_, edge)| edge);

        match removed {
            Some(edge) => {
                trace!(%from, %to, "edge deleted");
                Ok(edge)
            }
            None => Err(StorageError::NotFound { from, to }),
        }
    }

    async fn find_edge(&self, from: UserId, to: UserId) -> StorageResult<Option<DirectedEdge>> {
        Ok(self.edges.get(&(from, to)).map(|edge| edge.value().clone()))
    }

    async fn find_edges_to(
        &self,
        user: UserId,
        status: Option<EdgeStatus>,
    ) -> StorageResult<Vec<DirectedEdge>> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| edge.to == user && status.map_or(true, |s| edge.status == s))
            .map(|edge| edge.value().clone())
            .collect())
    }

    async fn find_edges_from(
        &self,
        user: UserId,
        status: Option<EdgeStatus>,
    ) -> StorageResult<Vec<DirectedEdge>> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| edge.from == user && status.map_or(true, |s| edge.status == s))
            .map(|edge| edge.value().clone())
            .collect())
    }
}
