//! Trait definitions for edge storage backends.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::{DirectedEdge, EdgeStatus, UserId};
use crate::storage::errors::StorageResult;

/// Durable storage of directed relationship edges.
///
/// Every operation touches at most one edge and must be linearizable
/// with respect to the ordered-pair key: the store is the sole
/// concurrency-control primitive in the system. No multi-edge
/// transactions exist, and the store holds no lifecycle logic of its
/// own — all mutation is driven by the relationship engine.
#[async_trait]
pub trait EdgeStore: Send + Sync + Debug + 'static {
    /// Atomically create an edge.
    ///
    /// The uniqueness constraint over `(from, to)` decides races: of
    /// two concurrent creations for the same ordered pair, exactly one
    /// succeeds and the other receives [`StorageError::Conflict`].
    ///
    /// [`StorageError::Conflict`]: crate::storage::StorageError::Conflict
    async fn create_edge(&self, edge: DirectedEdge) -> StorageResult<()>;

    /// Atomically move a still-`Pending` edge to `new_status`,
    /// refreshing its `since` timestamp.
    ///
    /// `Pending` is the only legal source state (status never
    /// regresses), so the update is a compare-and-set against it: if
    /// the edge is absent or has already left `Pending`, the call
    /// fails with `NotFound` and the caller decides what the lost race
    /// means.
    async fn update_status(
        &self,
        from: UserId,
        to: UserId,
        new_status: EdgeStatus,
    ) -> StorageResult<DirectedEdge>;

    /// Delete the edge for the ordered pair, returning the removed
    /// record.
    ///
    /// With `expected` set, the delete only applies while the edge is
    /// still in that status — the delete-side analogue of
    /// [`update_status`]'s compare-and-set. `None` deletes
    /// unconditionally.
    ///
    /// [`update_status`]: EdgeStore::update_status
    async fn delete_edge(
        &self,
        from: UserId,
        to: UserId,
        expected: Option<EdgeStatus>,
    ) -> StorageResult<DirectedEdge>;

    /// Look up the edge for an ordered pair.
    async fn find_edge(&self, from: UserId, to: UserId) -> StorageResult<Option<DirectedEdge>>;

    /// All edges directed at `user`, optionally filtered by status.
    /// Order is unspecified; callers sort.
    async fn find_edges_to(
        &self,
        user: UserId,
        status: Option<EdgeStatus>,
    ) -> StorageResult<Vec<DirectedEdge>>;

    /// All edges originating from `user`, optionally filtered by
    /// status. Order is unspecified; callers sort.
    async fn find_edges_from(
        &self,
        user: UserId,
        status: Option<EdgeStatus>,
    ) -> StorageResult<Vec<DirectedEdge>>;
}
