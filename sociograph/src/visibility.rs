//! Visibility derivation for protected content.

use std::sync::Arc;

use tracing::debug;

use crate::directory::UserDirectory;
use crate::models::{EdgeStatus, ProfileType, UserId};
use crate::storage::EdgeStore;
use crate::{RelationshipError, Result};

/// Decides whether an actor may view a target's protected content.
///
/// The rule is intentionally asymmetric: only the actor's own
/// approved follow of the target opens the gate. Whether the target
/// follows the actor back is irrelevant.
pub struct VisibilityEvaluator {
    store: Arc<dyn EdgeStore>,
    directory: Arc<dyn UserDirectory>,
}

impl VisibilityEvaluator {
    pub fn new(store: Arc<dyn EdgeStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// True if `actor` may view `target`'s protected content.
    ///
    /// Own profile and public profiles are always visible; a private
    /// profile is visible only through an `Accepted` edge
    /// `actor -> target`.
    pub async fn can_view(&self, actor: UserId, target: UserId) -> Result<bool> {
        if actor == target {
            return Ok(true);
        }

        let profile_type = self
            .directory
            .profile_type(target)
            .await?
            .ok_or(RelationshipError::UserNotFound(target))?;

        if profile_type == ProfileType::Public {
            return Ok(true);
        }

        let edge = self.store.find_edge(actor, target).await?;
        let allowed = matches!(edge, Some(e) if e.status == EdgeStatus::Accepted);
        debug!(%actor, %target, allowed, "visibility check against private profile");
        Ok(allowed)
    }
}
