//! The relationship action state machine.
//!
//! Every mutation of the relationship graph flows through
//! [`RelationshipEngine::execute`]; readers (visibility, queries)
//! never write. The engine holds no locks of its own — each verb
//! resolves to a single atomic store call, and the store's
//! ordered-pair constraint decides any race.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::directory::UserDirectory;
use crate::models::{DirectedEdge, EdgeStatus, ProfileType, UserId};
use crate::storage::{EdgeStore, StorageError};
use crate::{RelationshipError, Result};

/// A relationship action requested by a user.
///
/// `send`, `cancel`, and `unfollow` act on the actor's own outbound
/// edge; `accept` and `decline` act on the inbound edge someone else
/// aimed at the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Create the outbound edge (a follow, or a follow request).
    Send,
    /// Approve the inbound pending request.
    Accept,
    /// Reject the inbound pending request.
    Decline,
    /// Withdraw the actor's own pending request.
    Cancel,
    /// Remove the actor's own accepted follow. The reverse edge, if
    /// any, is untouched.
    #[serde(alias = "unfriend")]
    Unfollow,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Send => "send",
            Verb::Accept => "accept",
            Verb::Decline => "decline",
            Verb::Cancel => "cancel",
            Verb::Unfollow => "unfollow",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "send" => Ok(Verb::Send),
            "accept" => Ok(Verb::Accept),
            "decline" => Ok(Verb::Decline),
            "cancel" => Ok(Verb::Cancel),
            "unfollow" | "unfriend" => Ok(Verb::Unfollow),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// Successful result of an executed verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// `send` against a public target: the edge is accepted instantly.
    Followed,
    /// `send` against a private target: the edge awaits approval.
    RequestSent,
    RequestAccepted,
    RequestDeclined,
    RequestCancelled,
    Unfollowed,
}

impl ActionOutcome {
    /// Human-readable confirmation for the API layer.
    pub fn message(&self) -> &'static str {
        match self {
            ActionOutcome::Followed => "Followed successfully!",
            ActionOutcome::RequestSent => "Follow request sent!",
            ActionOutcome::RequestAccepted => "Request accepted!",
            ActionOutcome::RequestDeclined => "Request declined.",
            ActionOutcome::RequestCancelled => "Request cancelled.",
            ActionOutcome::Unfollowed => "Unfollowed successfully.",
        }
    }
}

/// Validates and executes relationship actions.
pub struct RelationshipEngine {
    store: Arc<dyn EdgeStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RelationshipEngine {
    pub fn new(store: Arc<dyn EdgeStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// Execute one relationship action on behalf of `actor`.
    ///
    /// Exactly one of a success outcome or a typed error comes back;
    /// nothing is retried. A lost `send` race surfaces as
    /// [`RelationshipError::Conflict`]; any other verb that loses its
    /// race observes the edge gone (or already moved on) and surfaces
    /// [`RelationshipError::InvalidTransition`].
    pub async fn execute(&self, actor: UserId, target: UserId, verb: Verb) -> Result<ActionOutcome> {
        if actor == target {
            return Err(RelationshipError::SelfAction);
        }
        if !self.directory.exists(target).await? {
            return Err(RelationshipError::UserNotFound(target));
        }

        debug!(%actor, %target, %verb, "executing relationship action");

        let outcome = match verb {
            Verb::Send => self.send(actor, target).await?,
            Verb::Accept => self.accept(actor, target).await?,
            Verb::Decline => self.decline(actor, target).await?,
            Verb::Cancel => self.cancel(actor, target).await?,
            Verb::Unfollow => self.unfollow(actor, target).await?,
        };

        info!(%actor, %target, %verb, ?outcome, "relationship action applied");
        Ok(outcome)
    }

    /// `send`: create the outbound edge, status decided by the
    /// target's profile type at creation time.
    async fn send(&self, actor: UserId, target: UserId) -> Result<ActionOutcome> {
        // Advisory pre-check for a friendly error; the create below is
        // the atomic arbiter.
        if self.store.find_edge(actor, target).await?.is_some() {
            return Err(RelationshipError::InvalidTransition {
                verb: Verb::Send,
                reason: "you already follow this user or have a request pending",
            });
        }

        let profile_type = self
            .directory
            .profile_type(target)
            .await?
            .ok_or(RelationshipError::UserNotFound(target))?;

        let status = match profile_type {
            ProfileType::Public => EdgeStatus::Accepted,
            ProfileType::Private => EdgeStatus::Pending,
        };

        match self
            .store
            .create_edge(DirectedEdge::new(actor, target, status))
            .await
        {
            Ok(()) => Ok(match status {
                EdgeStatus::Accepted => ActionOutcome::Followed,
                EdgeStatus::Pending => ActionOutcome::RequestSent,
            }),
            Err(StorageError::Conflict { .. }) => Err(RelationshipError::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    /// `accept`: promote the inbound pending edge (target -> actor).
    async fn accept(&self, actor: UserId, target: UserId) -> Result<ActionOutcome> {
        match self
            .store
            .update_status(target, actor, EdgeStatus::Accepted)
            .await
        {
            Ok(_) => Ok(ActionOutcome::RequestAccepted),
            Err(StorageError::NotFound { .. }) => Err(RelationshipError::InvalidTransition {
                verb: Verb::Accept,
                reason: "no incoming request to accept",
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// `decline`: drop the inbound pending edge (target -> actor).
    async fn decline(&self, actor: UserId, target: UserId) -> Result<ActionOutcome> {
        match self
            .store
            .delete_edge(target, actor, Some(EdgeStatus::Pending))
            .await
        {
            Ok(_) => Ok(ActionOutcome::RequestDeclined),
            Err(StorageError::NotFound { .. }) => Err(RelationshipError::InvalidTransition {
                verb: Verb::Decline,
                reason: "no incoming request to decline",
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// `cancel`: withdraw the actor's own pending outbound edge.
    async fn cancel(&self, actor: UserId, target: UserId) -> Result<ActionOutcome> {
        match self
            .store
            .delete_edge(actor, target, Some(EdgeStatus::Pending))
            .await
        {
            Ok(_) => Ok(ActionOutcome::RequestCancelled),
            Err(StorageError::NotFound { .. }) => Err(RelationshipError::InvalidTransition {
                verb: Verb::Cancel,
                reason: "no pending outgoing request to cancel",
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// `unfollow`: remove only the actor's own accepted edge.
    async fn unfollow(&self, actor: UserId, target: UserId) -> Result<ActionOutcome> {
        match self
            .store
            .delete_edge(actor, target, Some(EdgeStatus::Accepted))
            .await
        {
            Ok(_) => Ok(ActionOutcome::Unfollowed),
            Err(StorageError::NotFound { .. }) => Err(RelationshipError::InvalidTransition {
                verb: Verb::Unfollow,
                reason: "you are not following this user",
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryUserDirectory, MockUserDirectory};
    use crate::models::UserSummary;
    use crate::storage::MemoryEdgeStore;

    fn user(id: u64, profile_type: ProfileType) -> UserSummary {
        UserSummary {
            id: UserId(id),
            name: format!("User {id}"),
            username: format!("user{id}"),
            profile_type,
        }
    }

    fn fixture(users: &[(u64, ProfileType)]) -> (RelationshipEngine, Arc<MemoryEdgeStore>) {
        let store = Arc::new(MemoryEdgeStore::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        for (id, profile_type) in users {
            directory.upsert(user(*id, *profile_type));
        }
        let engine = RelationshipEngine::new(store.clone(), directory);
        (engine, store)
    }

    #[tokio::test]
    async fn send_to_public_target_is_accepted_immediately() {
        let (engine, store) = fixture(&[(1, ProfileType::Public), (2, ProfileType::Public)]);

        let outcome = engine
            .execute(UserId(2), UserId(1), Verb::Send)
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Followed);

        let edge = store.find_edge(UserId(2), UserId(1)).await.unwrap().unwrap();
        assert_eq!(edge.status, EdgeStatus::Accepted);
    }

    #[tokio::test]
    async fn send_to_private_target_is_pending() {
        let (engine, store) = fixture(&[(3, ProfileType::Private), (4, ProfileType::Public)]);

        let outcome = engine
            .execute(UserId(4), UserId(3), Verb::Send)
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::RequestSent);

        let edge = store.find_edge(UserId(4), UserId(3)).await.unwrap().unwrap();
        assert_eq!(edge.status, EdgeStatus::Pending);
    }

    #[tokio::test]
    async fn second_send_is_an_invalid_transition_not_a_duplicate() {
        let (engine, store) = fixture(&[(1, ProfileType::Public), (2, ProfileType::Public)]);

        engine
            .execute(UserId(1), UserId(2), Verb::Send)
            .await
            .unwrap();
        let err = engine
            .execute(UserId(1), UserId(2), Verb::Send)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RelationshipError::InvalidTransition {
                verb: Verb::Send,
                ..
            }
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn accept_acts_on_the_inbound_edge() {
        let (engine, store) = fixture(&[(3, ProfileType::Private), (4, ProfileType::Public)]);

        engine
            .execute(UserId(4), UserId(3), Verb::Send)
            .await
            .unwrap();
        let outcome = engine
            .execute(UserId(3), UserId(4), Verb::Accept)
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::RequestAccepted);

        let edge = store.find_edge(UserId(4), UserId(3)).await.unwrap().unwrap();
        assert_eq!(edge.status, EdgeStatus::Accepted);
        // No reverse edge appeared.
        assert!(store.find_edge(UserId(3), UserId(4)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn decline_after_accept_is_invalid() {
        let (engine, _store) = fixture(&[(3, ProfileType::Private), (4, ProfileType::Public)]);

        engine
            .execute(UserId(4), UserId(3), Verb::Send)
            .await
            .unwrap();
        engine
            .execute(UserId(3), UserId(4), Verb::Accept)
            .await
            .unwrap();

        let err = engine
            .execute(UserId(3), UserId(4), Verb::Decline)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelationshipError::InvalidTransition {
                verb: Verb::Decline,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn cancel_requires_a_pending_outbound_edge() {
        let (engine, store) = fixture(&[(1, ProfileType::Private), (2, ProfileType::Public)]);

        engine
            .execute(UserId(2), UserId(1), Verb::Send)
            .await
            .unwrap();
        engine
            .execute(UserId(2), UserId(1), Verb::Cancel)
            .await
            .unwrap();
        assert!(store.is_empty());

        // Nothing left to cancel.
        let err = engine
            .execute(UserId(2), UserId(1), Verb::Cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RelationshipError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn cancel_cannot_withdraw_an_accepted_follow() {
        let (engine, _store) = fixture(&[(1, ProfileType::Public), (2, ProfileType::Public)]);

        engine
            .execute(UserId(2), UserId(1), Verb::Send)
            .await
            .unwrap();
        let err = engine
            .execute(UserId(2), UserId(1), Verb::Cancel)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelationshipError::InvalidTransition {
                verb: Verb::Cancel,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unfollow_removes_only_the_actors_own_edge() {
        let (engine, store) = fixture(&[(1, ProfileType::Public), (2, ProfileType::Public)]);

        engine
            .execute(UserId(1), UserId(2), Verb::Send)
            .await
            .unwrap();
        engine
            .execute(UserId(2), UserId(1), Verb::Send)
            .await
            .unwrap();

        engine
            .execute(UserId(1), UserId(2), Verb::Unfollow)
            .await
            .unwrap();

        assert!(store.find_edge(UserId(1), UserId(2)).await.unwrap().is_none());
        let reverse = store.find_edge(UserId(2), UserId(1)).await.unwrap().unwrap();
        assert_eq!(reverse.status, EdgeStatus::Accepted);
    }

    #[tokio::test]
    async fn self_action_is_rejected_before_anything_else() {
        let (engine, _store) = fixture(&[(1, ProfileType::Public)]);

        let err = engine
            .execute(UserId(1), UserId(1), Verb::Send)
            .await
            .unwrap_err();
        assert!(matches!(err, RelationshipError::SelfAction));
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let mut directory = MockUserDirectory::new();
        directory.expect_exists().returning(|_| Ok(false));
        let engine =
            RelationshipEngine::new(Arc::new(MemoryEdgeStore::new()), Arc::new(directory));

        let err = engine
            .execute(UserId(1), UserId(99), Verb::Send)
            .await
            .unwrap_err();
        assert!(matches!(err, RelationshipError::UserNotFound(UserId(99))));
    }

    #[tokio::test]
    async fn directory_failure_propagates() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_exists()
            .returning(|_| Err(crate::directory::DirectoryError::Unavailable("down".into())));
        let engine =
            RelationshipEngine::new(Arc::new(MemoryEdgeStore::new()), Arc::new(directory));

        let err = engine
            .execute(UserId(1), UserId(2), Verb::Send)
            .await
            .unwrap_err();
        assert!(matches!(err, RelationshipError::Directory(_)));
    }

    #[tokio::test]
    async fn verb_parses_wire_strings_including_unfriend_alias() {
        let unfollow: Verb = serde_json::from_str("\"unfollow\"").unwrap();
        let unfriend: Verb = serde_json::from_str("\"unfriend\"").unwrap();
        assert_eq!(unfollow, Verb::Unfollow);
        assert_eq!(unfriend, Verb::Unfollow);

        let send: Verb = serde_json::from_str("\"send\"").unwrap();
        assert_eq!(send, Verb::Send);
        assert!(serde_json::from_str::<Verb>("\"poke\"").is_err());
    }

    #[tokio::test]
    async fn concurrent_sends_produce_one_winner_and_one_conflict() {
        let (engine, store) = fixture(&[(1, ProfileType::Private), (2, ProfileType::Public)]);
        let engine = Arc::new(engine);

        let a = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.execute(UserId(2), UserId(1), Verb::Send).await })
        };
        let b = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.execute(UserId(2), UserId(1), Verb::Send).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for result in &results {
            if let Err(err) = result {
                // Depending on interleaving the loser either hits the
                // store's uniqueness constraint or re-reads the edge.
                assert!(matches!(
                    err,
                    RelationshipError::Conflict
                        | RelationshipError::InvalidTransition {
                            verb: Verb::Send,
                            ..
                        }
                ));
            }
        }
        assert_eq!(store.len(), 1);
    }
}
