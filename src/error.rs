// HTTP boundary error translation. Domain errors from the lifecycle and
// contract services are converted here into status codes and a uniform
// JSON error body; remote-dependency failures never reach this layer.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::repository::RepositoryError;
use crate::services::application_service::ApplicationError;
use crate::services::contract_service::ContractError;

#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    // 401 Unauthorized
    Unauthorized(String),
    // 403 Forbidden
    Forbidden(String),
    // 404 Not Found
    NotFound(String),
    // 409 Conflict
    Conflict(String),
    // 500 Internal Server Error
    InternalServerError(String),
    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructors
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::QuotaExceeded(_) => ApiError::forbidden(err.to_string()),
            ApplicationError::CourseNotFound(_) => ApiError::not_found(err.to_string()),
            ApplicationError::InvalidGrade(_) => ApiError::forbidden(err.to_string()),
            ApplicationError::Duplicate { .. } => ApiError::conflict(err.to_string()),
            ApplicationError::NotFound { .. } => ApiError::not_found(err.to_string()),
            ApplicationError::NotAllowed => ApiError::forbidden(err.to_string()),
            ApplicationError::NotPending => ApiError::conflict(err.to_string()),
            ApplicationError::NotLecturer { .. } => ApiError::forbidden(err.to_string()),
            ApplicationError::ContractRefused => ApiError::conflict(err.to_string()),
            ApplicationError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::NotFound { .. } => ApiError::not_found(err.to_string()),
            ContractError::DeclarationNotFound(_) => ApiError::not_found(err.to_string()),
            ContractError::Duplicate { .. } => ApiError::conflict(err.to_string()),
            ContractError::AlreadyReviewed(_) => ApiError::conflict(err.to_string()),
            ContractError::InvalidRating(_) => ApiError::bad_request(err.to_string()),
            ContractError::InvalidWorkedHours(_) => ApiError::bad_request(err.to_string()),
            ContractError::InvalidWorkedTime(_) => ApiError::bad_request(err.to_string()),
            ContractError::InvalidMaxHours(_) => ApiError::bad_request(err.to_string()),
            ContractError::NotLecturer { .. } => ApiError::forbidden(err.to_string()),
            ContractError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        // Log the backend detail but keep the client message generic
        tracing::error!("repository error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
