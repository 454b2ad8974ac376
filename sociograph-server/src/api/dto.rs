//! Wire types for the relationship API.
//!
//! The JSON contract is camelCase; statuses travel as the strings
//! `"Pending"` / `"Accepted"`, with `null` for "no edge".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sociograph::models::UserSummary;
use sociograph::query::{DualStatus, FollowEntry, PendingRequest};

/// Profile summary as rendered in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: u64,
    pub name: String,
    pub username: String,
    /// "Public" or "Private"
    pub profile_type: String,
}

impl From<UserSummary> for UserSummaryDto {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.0,
            name: user.name,
            username: user.username,
            profile_type: user.profile_type.to_string(),
        }
    }
}

/// Both directions of a relationship pair
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipStatusDto {
    /// Status of your edge toward the target, if any
    pub your_status: Option<String>,
    /// Status of the target's edge toward you, if any
    pub their_status: Option<String>,
}

impl From<DualStatus> for RelationshipStatusDto {
    fn from(status: DualStatus) -> Self {
        Self {
            your_status: status.your_status.map(|s| s.to_string()),
            their_status: status.their_status.map(|s| s.to_string()),
        }
    }
}

/// Request body for relationship actions
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActionRequest {
    /// One of: send, accept, decline, cancel, unfollow (or unfriend)
    pub action: String,
}

/// Confirmation message for a successful action
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// A pending follow request joined with the counterpart's profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequestDto {
    pub user: UserSummaryDto,
    pub since: DateTime<Utc>,
}

impl From<PendingRequest> for PendingRequestDto {
    fn from(request: PendingRequest) -> Self {
        Self {
            user: request.user.into(),
            since: request.since,
        }
    }
}

/// One row of a followers/following listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowEntryDto {
    pub user: UserSummaryDto,
    pub since: DateTime<Utc>,
    /// Whether the requesting user follows this entry
    pub you_follow_them: bool,
}

impl From<FollowEntry> for FollowEntryDto {
    fn from(entry: FollowEntry) -> Self {
        Self {
            user: entry.user.into(),
            since: entry.since,
            you_follow_them: entry.you_follow_them,
        }
    }
}

/// Visibility decision for a profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanViewResponse {
    pub can_view: bool,
}

/// Accepted-edge counts in both directions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowerCountsResponse {
    pub followers: usize,
    pub following: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociograph::models::{EdgeStatus, ProfileType, UserId};

    #[test]
    fn status_dto_uses_camel_case_and_nulls() {
        let dto = RelationshipStatusDto::from(DualStatus {
            your_status: Some(EdgeStatus::Pending),
            their_status: None,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["yourStatus"], "Pending");
        assert!(json["theirStatus"].is_null());
    }

    #[test]
    fn user_summary_dto_flattens_the_profile_type() {
        let dto = UserSummaryDto::from(UserSummary {
            id: UserId(3),
            name: "User 3".into(),
            username: "user3".into(),
            profile_type: ProfileType::Private,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["profileType"], "Private");
    }
}
