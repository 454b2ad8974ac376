//! API implementation for the Sociograph HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod dto;
pub mod relationships;
pub mod sessions;
pub mod users;

use auth::auth_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        relationships::follow_status,
        relationships::relationship_action,
        relationships::pending_requests,
        relationships::outgoing_requests,
        users::followers,
        users::following,
        users::follower_counts,
        users::can_view,
    ),
    components(
        schemas(
            dto::UserSummaryDto,
            dto::RelationshipStatusDto,
            dto::ActionRequest,
            dto::MessageResponse,
            dto::PendingRequestDto,
            dto::FollowEntryDto,
            dto::CanViewResponse,
            dto::FollowerCountsResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "relationships", description = "Relationship actions, status, and pending queues"),
        (name = "users", description = "Follower listings, counts, and visibility checks"),
    ),
    info(
        title = "Sociograph Relationship Service API",
        version = "1.0.0",
        description = "RESTful API over the Sociograph asymmetric relationship graph engine: directed follow edges, pending request queues, and profile visibility.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        // Relationship endpoints
        .route(
            "/relationships/{target}/status",
            get(relationships::follow_status),
        )
        .route(
            "/relationships/{target}/action",
            post(relationships::relationship_action),
        )
        .route("/relationships/pending", get(relationships::pending_requests))
        .route(
            "/relationships/outgoing",
            get(relationships::outgoing_requests),
        )
        // User endpoints
        .route("/users/{id}/followers", get(users::followers))
        .route("/users/{id}/following", get(users::following))
        .route("/users/{id}/follower-counts", get(users::follower_counts))
        .route("/users/{id}/can-view", get(users::can_view))
        // Health check endpoint
        .route("/health", get(health_check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    // Main router with API prefix and documentation
    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "version": sociograph::VERSION,
        "capabilities": {
            "relationship_actions": true,
            "pending_queues": true,
            "visibility_checks": true,
            "session_ttl_hours": state.config.session_ttl_hours,
        }
    }))
}
