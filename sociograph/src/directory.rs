//! User directory collaborator.
//!
//! The directory owns user profiles; the relationship engine only
//! reads it, to check that a target exists and whether its profile
//! auto-approves follows.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{ProfileType, UserId, UserSummary};

/// Error type for directory lookups.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// The directory backend could not be reached or answered badly.
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Whether a user with this id exists.
    async fn exists(&self, id: UserId) -> Result<bool, DirectoryError>;

    /// The user's profile type, or `None` if the user is unknown.
    async fn profile_type(&self, id: UserId) -> Result<Option<ProfileType>, DirectoryError>;

    /// Profile projection for listings, or `None` if the user is
    /// unknown.
    async fn summary(&self, id: UserId) -> Result<Option<UserSummary>, DirectoryError>;
}

/// Directory held entirely in memory.
///
/// Suitable for embedding the library, the server binary, and tests;
/// a production deployment would implement [`UserDirectory`] over the
/// real user service instead.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<UserId, UserSummary>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub fn upsert(&self, user: UserSummary) {
        self.users.insert(user.id, user);
    }

    /// Flip an existing user's profile type. Returns false if the
    /// user is unknown.
    pub fn set_profile_type(&self, id: UserId, profile_type: ProfileType) -> bool {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.profile_type = profile_type;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, id: UserId) -> Result<bool, DirectoryError> {
        Ok(self.users.contains_key(&id))
    }

    async fn profile_type(&self, id: UserId) -> Result<Option<ProfileType>, DirectoryError> {
        Ok(self.users.get(&id).map(|user| user.profile_type))
    }

    async fn summary(&self, id: UserId) -> Result<Option<UserSummary>, DirectoryError> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, profile_type: ProfileType) -> UserSummary {
        UserSummary {
            id: UserId(id),
            name: format!("User {id}"),
            username: format!("user{id}"),
            profile_type,
        }
    }

    #[tokio::test]
    async fn lookups_reflect_upserts() {
        let directory = InMemoryUserDirectory::new();
        assert!(!directory.exists(UserId(1)).await.unwrap());

        directory.upsert(user(1, ProfileType::Private));
        assert!(directory.exists(UserId(1)).await.unwrap());
        assert_eq!(
            directory.profile_type(UserId(1)).await.unwrap(),
            Some(ProfileType::Private)
        );
        assert_eq!(
            directory.summary(UserId(1)).await.unwrap().unwrap().username,
            "user1"
        );
    }

    #[tokio::test]
    async fn set_profile_type_updates_in_place() {
        let directory = InMemoryUserDirectory::new();
        directory.upsert(user(7, ProfileType::Private));

        assert!(directory.set_profile_type(UserId(7), ProfileType::Public));
        assert_eq!(
            directory.profile_type(UserId(7)).await.unwrap(),
            Some(ProfileType::Public)
        );

        assert!(!directory.set_profile_type(UserId(8), ProfileType::Public));
    }
}
