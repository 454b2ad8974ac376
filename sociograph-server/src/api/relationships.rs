//! Relationship action and status endpoints

use std::sync::Arc;

use axum::{
    Extension, Json as JsonExtractor,
    extract::{Path, State},
    response::Json,
};

use sociograph::engine::Verb;
use sociograph::models::UserId;

use crate::{
    api::auth::CurrentUser,
    api::dto::{ActionRequest, MessageResponse, PendingRequestDto, RelationshipStatusDto},
    error::{ServerResult, bad_request},
    state::AppState,
};

/// Both directions of the pair between the caller and a target
#[utoipa::path(
    get,
    path = "/api/relationships/{target}/status",
    tag = "relationships",
    params(
        ("target" = u64, Path, description = "Target user ID")
    ),
    responses(
        (status = 200, description = "Relationship status in both directions", body = RelationshipStatusDto),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn follow_status(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(target): Path<u64>,
) -> ServerResult<Json<RelationshipStatusDto>> {
    let status = state
        .service
        .queries()
        .dual_status(actor, UserId(target))
        .await?;
    Ok(Json(status.into()))
}

/// Execute a relationship action against a target user
#[utoipa::path(
    post,
    path = "/api/relationships/{target}/action",
    tag = "relationships",
    params(
        ("target" = u64, Path, description = "Target user ID")
    ),
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Action applied", body = MessageResponse),
        (status = 400, description = "Invalid action for the current state"),
        (status = 404, description = "Target user not found"),
        (status = 409, description = "A concurrent request created the relationship first"),
    )
)]
pub async fn relationship_action(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(target): Path<u64>,
    JsonExtractor(request): JsonExtractor<ActionRequest>,
) -> ServerResult<Json<MessageResponse>> {
    let verb: Verb = request
        .action
        .parse()
        .map_err(|_| bad_request("Invalid action."))?;

    let outcome = state
        .service
        .engine()
        .execute(actor, UserId(target), verb)
        .await?;

    Ok(Json(MessageResponse {
        message: outcome.message().to_string(),
    }))
}

/// Inbound pending follow requests for the caller
#[utoipa::path(
    get,
    path = "/api/relationships/pending",
    tag = "relationships",
    responses(
        (status = 200, description = "Pending inbound requests, oldest first", body = Vec<PendingRequestDto>),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn pending_requests(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ServerResult<Json<Vec<PendingRequestDto>>> {
    let requests = state.service.queries().pending_incoming(user).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// Outbound pending follow requests from the caller
#[utoipa::path(
    get,
    path = "/api/relationships/outgoing",
    tag = "relationships",
    responses(
        (status = 200, description = "Pending outbound requests, oldest first", body = Vec<PendingRequestDto>),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn outgoing_requests(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ServerResult<Json<Vec<PendingRequestDto>>> {
    let requests = state.service.queries().pending_outgoing(user).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}
