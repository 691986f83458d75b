use std::collections::BTreeMap;
use std::sync::Arc;

use activities_core::Activity;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ApiError, ServerResult},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    email: String,
}

impl EmailQuery {
    fn from_request(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<Self, ApiError> {
        query
            .map(|Query(query)| query)
            .map_err(|rejection| ApiError::unprocessable(rejection.body_text()))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Activity>> {
    Json(state.registry.list())
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Path(activity): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let query = EmailQuery::from_request(query)?;
    state.registry.signup(&activity, &query.email)?;

    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", query.email, activity),
    }))
}

pub async fn unregister(
    State(state): State<Arc<AppState>>,
    Path(activity): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let query = EmailQuery::from_request(query)?;
    state.registry.unregister(&activity, &query.email)?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", query.email, activity),
    }))
}
