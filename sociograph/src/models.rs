//! Domain types for the relationship graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a user in the directory.
///
/// The engine never allocates these; they are owned by the external
/// user directory and treated as opaque keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Whether a profile auto-approves inbound follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileType {
    /// Follows are approved instantly, no pending step.
    Public,
    /// Follows start out pending until the owner accepts.
    Private,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileType::Public => write!(f, "Public"),
            ProfileType::Private => write!(f, "Private"),
        }
    }
}

/// State of a directed edge.
///
/// Status only ever moves `Pending` -> `Accepted`; an edge never
/// regresses. Every other change is a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStatus {
    /// Awaiting approval from the edge's `to` user.
    Pending,
    /// Approved, active relationship in this direction.
    Accepted,
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeStatus::Pending => write!(f, "Pending"),
            EdgeStatus::Accepted => write!(f, "Accepted"),
        }
    }
}

/// A single directed relationship record.
///
/// The ordered pair `(from, to)` is the identity: at most one edge
/// exists per ordered pair, and the reverse pair is an independent
/// edge. `from != to` always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedEdge {
    /// The user who initiated the relationship.
    pub from: UserId,
    /// The user the relationship is directed at.
    pub to: UserId,
    /// Current state of this direction.
    pub status: EdgeStatus,
    /// Set on creation, refreshed when the edge becomes `Accepted`.
    pub since: DateTime<Utc>,
}

impl DirectedEdge {
    /// Create a new edge stamped with the current time.
    pub fn new(from: UserId, to: UserId, status: EdgeStatus) -> Self {
        Self {
            from,
            to,
            status,
            since: Utc::now(),
        }
    }

    /// The ordered-pair key of this edge.
    pub fn key(&self) -> (UserId, UserId) {
        (self.from, self.to)
    }
}

/// Profile projection joined into request and follower listings.
///
/// Owned by the user directory; the engine reads it, never writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub profile_type: ProfileType,
}
