// Plugin request handlers - the host drives the dashboard resource through these
use crate::application::dashboard_repository::RepositoryError;
use crate::application::dashboard_resource::{ResourceError, ResourceState};
use crate::application::plan::{AttributeChange, PlanAction};
use crate::application::schema::{dashboard_schema, ResourceSchema};
use crate::application::validation::ValidationError;
use crate::domain::attributes::DashboardAttributes;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ConfigRequest {
    pub config: Value,
}

#[derive(Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub prior_state: Option<Value>,
    pub config: Value,
}

#[derive(Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub config: Value,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub diagnostics: Vec<ValidationError>,
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub action: PlanAction,
    pub requires_update: bool,
    pub changes: Vec<AttributeChange>,
    pub planned_state: DashboardAttributes,
}

/// Error body returned to the host: `{"error": "..."}`.
#[derive(Debug)]
pub struct HandlerError {
    status: StatusCode,
    message: String,
}

impl HandlerError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ResourceError> for HandlerError {
    fn from(error: ResourceError) -> Self {
        let status = match &error {
            ResourceError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ResourceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ResourceError::ImportNotFound(_) => StatusCode::NOT_FOUND,
            ResourceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ResourceError::Repository(_) => StatusCode::BAD_GATEWAY,
        };

        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), error = %self.message, "request failed");
        } else {
            tracing::debug!(
                status = self.status.as_u16(),
                error = %self.message,
                "request rejected"
            );
        }

        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn decode_attributes(value: Value) -> Result<DashboardAttributes, HandlerError> {
    serde_json::from_value(value)
        .map_err(|e| HandlerError::bad_request(format!("invalid config: {}", e)))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_schema() -> Json<ResourceSchema> {
    Json(dashboard_schema())
}

pub async fn validate_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigRequest>,
) -> Result<Json<ValidateResponse>, HandlerError> {
    let config = decode_attributes(request.config)?;

    let diagnostics = match state.dashboard_resource.validate(&config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.0,
    };

    Ok(Json(ValidateResponse { diagnostics }))
}

pub async fn plan_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, HandlerError> {
    let config = decode_attributes(request.config)?;
    let prior = match request.prior_state {
        Some(Value::Null) | None => None,
        Some(value) => Some(decode_attributes(value)?),
    };

    let result = state.dashboard_resource.plan(prior.as_ref(), &config)?;

    Ok(Json(PlanResponse {
        action: result.action,
        requires_update: result.requires_update(),
        changes: result.changes,
        planned_state: result.planned_state,
    }))
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigRequest>,
) -> Result<Json<ResourceState>, HandlerError> {
    let config = decode_attributes(request.config)?;
    Ok(Json(state.dashboard_resource.create(&config).await?))
}

pub async fn read_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IdRequest>,
) -> Result<Json<ResourceState>, HandlerError> {
    Ok(Json(state.dashboard_resource.read(&request.id).await?))
}

pub async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<ResourceState>, HandlerError> {
    let config = decode_attributes(request.config)?;
    Ok(Json(
        state.dashboard_resource.update(&request.id, &config).await?,
    ))
}

pub async fn delete_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IdRequest>,
) -> Result<StatusCode, HandlerError> {
    state.dashboard_resource.delete(&request.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn import_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IdRequest>,
) -> Result<Json<ResourceState>, HandlerError> {
    Ok(Json(state.dashboard_resource.import(&request.id).await?))
}
