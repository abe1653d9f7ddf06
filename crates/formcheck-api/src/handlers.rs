//! Request handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use formcheck_agents::{
    MSG_COMPARE_REQUIRED, MSG_FEEDBACK_REQUIRED, MSG_POSE_NAME_REQUIRED,
};
use formcheck_core::{DeviationReport, Pose};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComparePoseRequest {
    pub pose_type: Option<String>,
    /// Parsed separately so joint errors reach the client
    pub user_pose: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub pose_type: Option<String>,
    pub category: Option<String>,
    pub user_pose: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub angle_differences: DeviationReport,
}

#[derive(Debug, Deserialize)]
pub struct CurrentPoseParams {
    pub pose_type: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentPoseResponse {
    pub pose_name: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /compare-pose/`
pub async fn compare_pose(
    State(state): State<AppState>,
    payload: Result<Json<ComparePoseRequest>, JsonRejection>,
) -> Result<Json<DeviationReport>, ApiError> {
    let Json(request) = payload.map_err(|e| rejected(MSG_COMPARE_REQUIRED, &e.body_text()))?;

    let pose_type = request.pose_type.unwrap_or_default();
    let user_pose = parse_pose(request.user_pose)?;

    let report = state
        .orchestrator
        .compute_deviations(&pose_type, &user_pose)
        .await?;

    Ok(Json(report))
}

/// `POST /feedback/`
pub async fn feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejected(MSG_FEEDBACK_REQUIRED, &e.body_text()))?;

    let pose_type = request.pose_type.unwrap_or_default();
    let category = request.category.unwrap_or_default();
    let user_pose = parse_pose(request.user_pose)?;

    let outcome = state
        .orchestrator
        .compute_feedback(&pose_type, &category, &user_pose)
        .await?;

    Ok(Json(FeedbackResponse {
        feedback: outcome.feedback.text,
        angle_differences: outcome.angle_differences,
    }))
}

/// `GET /current-pose/?pose_type=&category=`
pub async fn current_pose(
    State(state): State<AppState>,
    params: Result<Query<CurrentPoseParams>, QueryRejection>,
) -> Result<Json<CurrentPoseResponse>, ApiError> {
    let Query(params) = params.map_err(|e| rejected(MSG_POSE_NAME_REQUIRED, &e.body_text()))?;

    let pose_name = state.orchestrator.current_pose_name(
        params.pose_type.as_deref().unwrap_or_default(),
        params.category.as_deref().unwrap_or_default(),
    )?;

    Ok(Json(CurrentPoseResponse { pose_name }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Absent or null poses come back empty and fail validation downstream
fn parse_pose(value: Option<Value>) -> Result<Pose, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(Pose::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string())),
    }
}

fn rejected(message: &str, detail: &str) -> ApiError {
    tracing::debug!("Unparseable request: {}", detail);
    ApiError::BadRequest(message.to_string())
}
