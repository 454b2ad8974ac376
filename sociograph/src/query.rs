//! Read-only aggregate views over the relationship graph.
//!
//! Pure projections: nothing here writes to the store. The UI renders
//! its relationship buttons from [`DualStatus`] and its lists from the
//! joined projections below.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directory::UserDirectory;
use crate::models::{DirectedEdge, EdgeStatus, UserId, UserSummary};
use crate::storage::EdgeStore;
use crate::Result;

/// Both directions of a pair at once, the input to UI button
/// rendering.
///
/// Six combinations are meaningful: none/none, pending-sent alone,
/// pending-received alone, accepted alone, pending both ways, and
/// accepted + pending-received. Accepted both ways is simply each
/// side independently following the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualStatus {
    /// Status of the `actor -> target` edge, if any.
    pub your_status: Option<EdgeStatus>,
    /// Status of the `target -> actor` edge, if any.
    pub their_status: Option<EdgeStatus>,
}

/// A pending request joined with the counterpart's profile summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    /// The sender (incoming lists) or receiver (outgoing lists).
    pub user: UserSummary,
    pub since: DateTime<Utc>,
}

/// One row of a followers/following listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEntry {
    pub user: UserSummary,
    pub since: DateTime<Utc>,
    /// Whether the viewing user has an accepted follow of this entry.
    pub you_follow_them: bool,
}

/// Read-only queries over the relationship store.
pub struct RelationshipQueries {
    store: Arc<dyn EdgeStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RelationshipQueries {
    pub fn new(store: Arc<dyn EdgeStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// Inbound pending requests for `user`, oldest first, joined with
    /// the sender's profile.
    pub async fn pending_incoming(&self, user: UserId) -> Result<Vec<PendingRequest>> {
        let mut edges = self
            .store
            .find_edges_to(user, Some(EdgeStatus::Pending))
            .await?;
        edges.sort_by_key(|edge| edge.since);

        let mut requests = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(user) = self.lookup(edge.from).await? {
                requests.push(PendingRequest {
                    user,
                    since: edge.since,
                });
            }
        }
        Ok(requests)
    }

    /// Outbound pending requests from `user`, oldest first, joined
    /// with the receiver's profile.
    pub async fn pending_outgoing(&self, user: UserId) -> Result<Vec<PendingRequest>> {
        let mut edges = self
            .store
            .find_edges_from(user, Some(EdgeStatus::Pending))
            .await?;
        edges.sort_by_key(|edge| edge.since);

        let mut requests = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(user) = self.lookup(edge.to).await? {
                requests.push(PendingRequest {
                    user,
                    since: edge.since,
                });
            }
        }
        Ok(requests)
    }

    /// Both directions of the `(actor, target)` pair.
    pub async fn dual_status(&self, actor: UserId, target: UserId) -> Result<DualStatus> {
        let your_status = self
            .store
            .find_edge(actor, target)
            .await?
            .map(|edge| edge.status);
        let their_status = self
            .store
            .find_edge(target, actor)
            .await?
            .map(|edge| edge.status);
        Ok(DualStatus {
            your_status,
            their_status,
        })
    }

    /// Count of accepted edges directed at `user`.
    pub async fn follower_count(&self, user: UserId) -> Result<usize> {
        Ok(self
            .store
            .find_edges_to(user, Some(EdgeStatus::Accepted))
            .await?
            .len())
    }

    /// Count of accepted edges originating from `user`.
    pub async fn following_count(&self, user: UserId) -> Result<usize> {
        Ok(self
            .store
            .find_edges_from(user, Some(EdgeStatus::Accepted))
            .await?
            .len())
    }

    /// Accepted followers of `user`, newest first, with
    /// `you_follow_them` computed for `viewer`.
    pub async fn followers(&self, user: UserId, viewer: UserId) -> Result<Vec<FollowEntry>> {
        let mut edges = self
            .store
            .find_edges_to(user, Some(EdgeStatus::Accepted))
            .await?;
        edges.sort_by_key(|edge| std::cmp::Reverse(edge.since));

        let mut entries = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(summary) = self.lookup(edge.from).await? {
                entries.push(FollowEntry {
                    you_follow_them: self.viewer_follows(viewer, edge.from).await?,
                    user: summary,
                    since: edge.since,
                });
            }
        }
        Ok(entries)
    }

    /// Users that `user` has an accepted follow of, newest first, with
    /// `you_follow_them` computed for `viewer`.
    pub async fn following(&self, user: UserId, viewer: UserId) -> Result<Vec<FollowEntry>> {
        let mut edges = self
            .store
            .find_edges_from(user, Some(EdgeStatus::Accepted))
            .await?;
        edges.sort_by_key(|edge| std::cmp::Reverse(edge.since));

        let mut entries = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(summary) = self.lookup(edge.to).await? {
                entries.push(FollowEntry {
                    you_follow_them: self.viewer_follows(viewer, edge.to).await?,
                    user: summary,
                    since: edge.since,
                });
            }
        }
        Ok(entries)
    }

    async fn viewer_follows(&self, viewer: UserId, other: UserId) -> Result<bool> {
        if viewer == other {
            return Ok(false);
        }
        let edge = self.store.find_edge(viewer, other).await?;
        Ok(matches!(edge, Some(DirectedEdge { status: EdgeStatus::Accepted, .. })))
    }

    async fn lookup(&self, id: UserId) -> Result<Option<UserSummary>> {
        let summary = self.directory.summary(id).await?;
        if summary.is_none() {
            // Edge references a user the directory no longer knows;
            // drop the row rather than fail the whole listing.
            debug!(%id, "skipping edge with unknown user");
        }
        Ok(summary)
    }
}
