//! User-centric read endpoints: follower listings, counts, and
//! visibility checks

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::Json,
};

use sociograph::models::UserId;

use crate::{
    api::auth::CurrentUser,
    api::dto::{CanViewResponse, FollowEntryDto, FollowerCountsResponse},
    error::ServerResult,
    state::AppState,
};

/// Accepted followers of a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/followers",
    tag = "users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Followers, newest first", body = Vec<FollowEntryDto>),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn followers(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Vec<FollowEntryDto>>> {
    let entries = state.service.queries().followers(UserId(id), viewer).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Users a user has an accepted follow of
#[utoipa::path(
    get,
    path = "/api/users/{id}/following",
    tag = "users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Following, newest first", body = Vec<FollowEntryDto>),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn following(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<Json<Vec<FollowEntryDto>>> {
    let entries = state.service.queries().following(UserId(id), viewer).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Follower and following counts for a user
#[utoipa::path(
    get,
    path = "/api/users/{id}/follower-counts",
    tag = "users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Accepted-edge counts", body = FollowerCountsResponse),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn follower_counts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServerResult<Json<FollowerCountsResponse>> {
    let queries = state.service.queries();
    let followers = queries.follower_count(UserId(id)).await?;
    let following = queries.following_count(UserId(id)).await?;
    Ok(Json(FollowerCountsResponse {
        followers,
        following,
    }))
}

/// Whether the caller may view a user's protected content
#[utoipa::path(
    get,
    path = "/api/users/{id}/can-view",
    tag = "users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Visibility decision", body = CanViewResponse),
        (status = 404, description = "User not found"),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn can_view(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<Json<CanViewResponse>> {
    let can_view = state
        .service
        .visibility()
        .can_view(actor, UserId(id))
        .await?;
    Ok(Json(CanViewResponse { can_view }))
}
