//! Error handling for the Sociograph server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sociograph::RelationshipError;

/// API error response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Relationship engine error
    #[error("{0}")]
    Relationship(#[from] RelationshipError),

    /// Authentication error
    #[error("Authentication required. Please log in.")]
    Auth,

    /// Bad request error
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Relationship(err) => match err {
                RelationshipError::SelfAction | RelationshipError::InvalidTransition { .. } => {
                    StatusCode::BAD_REQUEST
                }
                RelationshipError::UserNotFound(_) => StatusCode::NOT_FOUND,
                RelationshipError::Conflict => StatusCode::CONFLICT,
                RelationshipError::Directory(_)
                | RelationshipError::Storage(_)
                | RelationshipError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Auth => StatusCode::UNAUTHORIZED,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Relationship(err) => match err {
                RelationshipError::SelfAction => "self_action",
                RelationshipError::UserNotFound(_) => "not_found",
                RelationshipError::InvalidTransition { .. } => "invalid_transition",
                RelationshipError::Conflict => "conflict",
                _ => "internal_error",
            },
            ServerError::Auth => "authentication_error",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
