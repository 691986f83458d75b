use std::fmt::{Display, Formatter};

use activities_core::RegistryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, warn};

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client facing failure: a status plus the `detail` text sent back.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    UnprocessableEntity(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::UnprocessableEntity(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::InternalServerError(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::NotFound(detail)
            | ApiError::BadRequest(detail)
            | ApiError::UnprocessableEntity(detail)
            | ApiError::InternalServerError(detail) => detail,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(detail) => write!(f, "Status=404, NotFound: {}", detail),
            ApiError::BadRequest(detail) => write!(f, "Status=400, BadRequest: {}", detail),
            ApiError::UnprocessableEntity(detail) => {
                write!(f, "Status=422, UnprocessableEntity: {}", detail)
            }
            ApiError::InternalServerError(detail) => {
                write!(f, "Status=500, InternalServerError: {}", detail)
            }
        }
    }
}

impl From<&RegistryError> for ApiError {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::ActivityNotFound(_) => ApiError::not_found("Activity not found"),
            RegistryError::AlreadySignedUp { .. } => {
                ApiError::bad_request("Student is already signed up")
            }
            RegistryError::NotSignedUp { .. } => {
                ApiError::not_found("Student is not signed up for this activity")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        #[derive(serde::Serialize)]
        struct ErrorResponse {
            detail: String,
        }

        let api_error = match self {
            ServerError::ApiError(e) => e,
            ServerError::Registry(e) => {
                debug!(kind = %e.kind(), "{}", e);
                ApiError::from(&e)
            }
            ServerError::Io(e) => {
                error!(%e, "Unexpected IO error while handling request");
                ApiError::internal("Unexpected Error")
            }
        };

        if api_error.status().is_client_error() {
            warn!("{}", api_error);
        }

        let status = api_error.status();
        let detail = api_error.detail().to_string();

        (status, axum::Json(ErrorResponse { detail })).into_response()
    }
}
