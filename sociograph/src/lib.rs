//! # Sociograph
//!
//! Asymmetric relationship graph engine for social applications:
//! directed follow/friend edges between users, a validated action
//! state machine over them, visibility decisions for private
//! profiles, and the aggregate views a UI renders from.
//!
//! Relationships are *directed*: `A -> B` and `B -> A` are
//! independent edges that may exist (or not) simultaneously.
//! Unfollowing someone never touches their follow of you, and a
//! private account's approval gate applies per direction.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sociograph::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sociograph::Result<()> {
//!     // The user directory is an external collaborator; the
//!     // in-memory one works for embedding and tests.
//!     let directory = Arc::new(InMemoryUserDirectory::new());
//!     directory.upsert(UserSummary {
//!         id: UserId(1),
//!         name: "Ada".into(),
//!         username: "ada".into(),
//!         profile_type: ProfileType::Private,
//!     });
//!     directory.upsert(UserSummary {
//!         id: UserId(2),
//!         name: "Grace".into(),
//!         username: "grace".into(),
//!         profile_type: ProfileType::Public,
//!     });
//!
//!     let service = init_with_defaults(directory).await?;
//!
//!     // Private target: the follow starts out pending...
//!     service.engine().execute(UserId(2), UserId(1), Verb::Send).await?;
//!     // ...until the target accepts the inbound request.
//!     service.engine().execute(UserId(1), UserId(2), Verb::Accept).await?;
//!
//!     let status = service.queries().dual_status(UserId(2), UserId(1)).await?;
//!     assert_eq!(status.your_status, Some(EdgeStatus::Accepted));
//!     assert!(service.visibility().can_view(UserId(2), UserId(1)).await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod directory;
pub mod engine;
pub mod logging;
pub mod models;
pub mod query;
pub mod service;
pub mod storage;
pub mod visibility;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export core initialization functions
    pub use crate::{init, init_with_defaults};

    // Re-export config types
    pub use crate::config::{
        ConfigBuilder, ConfigLoader, EdgeStorageType, LogFormat, LogLevel, SociographConfig,
    };

    // Re-export domain types
    pub use crate::models::{DirectedEdge, EdgeStatus, ProfileType, UserId, UserSummary};

    // Re-export the engine surface
    pub use crate::engine::{ActionOutcome, RelationshipEngine, Verb};

    // Re-export readers and their row types
    pub use crate::query::{DualStatus, FollowEntry, PendingRequest, RelationshipQueries};
    pub use crate::visibility::VisibilityEvaluator;

    // Re-export collaborators and storage for advanced usage
    pub use crate::directory::{DirectoryError, InMemoryUserDirectory, UserDirectory};
    pub use crate::service::RelationshipService;
    pub use crate::storage::{EdgeStore, MemoryEdgeStore, StorageError};

    // Re-export essential result type
    pub use crate::{RelationshipError, Result};
}

use std::sync::Arc;

use directory::UserDirectory;
use models::UserId;
use service::RelationshipService;
use storage::{EdgeStore, MemoryEdgeStore};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for relationship operations.
///
/// Every variant is recoverable by the caller; nothing here is a
/// process-level fault, and nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum RelationshipError {
    /// The actor targeted themselves.
    #[error("cannot perform a relationship action on yourself")]
    SelfAction,

    /// The target user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The verb is not legal for the current edge state/direction.
    #[error("cannot {verb}: {reason}")]
    InvalidTransition {
        verb: engine::Verb,
        reason: &'static str,
    },

    /// A concurrent duplicate creation won the race.
    #[error("a concurrent request already created this relationship")]
    Conflict,

    /// The user directory collaborator failed.
    #[error("user directory error: {0}")]
    Directory(#[from] directory::DirectoryError),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] storage::StorageError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for RelationshipError {
    fn from(err: config::ConfigError) -> Self {
        RelationshipError::Configuration(err.to_string())
    }
}

/// Result type for relationship operations
pub type Result<T> = std::result::Result<T, RelationshipError>;

/// Initialize Sociograph with default configuration.
///
/// Sets up logging and an in-memory edge store, and returns a
/// [`RelationshipService`] wired to the provided user directory.
pub async fn init_with_defaults(
    directory: Arc<dyn UserDirectory>,
) -> Result<RelationshipService> {
    let config = config::ConfigBuilder::defaults().build()?;
    init(config, directory).await
}

/// Initialize Sociograph with the provided configuration.
///
/// The user directory stays caller-owned: it is an external
/// collaborator the engine only reads.
pub async fn init(
    config: config::SociographConfig,
    directory: Arc<dyn UserDirectory>,
) -> Result<RelationshipService> {
    // Ignore errors if tracing is already initialized elsewhere.
    let _ = logging::init(&config.logging);

    let store: Arc<dyn EdgeStore> = match config.storage.backend {
        config::EdgeStorageType::Memory => Arc::new(MemoryEdgeStore::new()),
    };

    Ok(RelationshipService::new(store, directory))
}
