use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerSet, UserId};
use super::repository::{CheckinRepository, ReminderScheduler};
use super::service::{CheckinService, CheckinServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) answers: AnswerSet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompleteRequest {
    pub(crate) answers: AnswerSet,
    #[serde(default)]
    pub(crate) at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AvailabilityQuery {
    #[serde(default)]
    pub(crate) at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PromptsQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

/// Router builder exposing the catalog, live scoring, and the daily check-in flow.
pub fn checkin_router<R, N>(service: Arc<CheckinService<R, N>>) -> Router
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    Router::new()
        .route("/api/v1/checkin/questions", get(questions_handler::<R, N>))
        .route("/api/v1/checkin/score", post(score_handler::<R, N>))
        .route(
            "/api/v1/checkin/:user_id/availability",
            get(availability_handler::<R, N>),
        )
        .route("/api/v1/checkin/:user_id", post(complete_handler::<R, N>))
        .route(
            "/api/v1/checkin/:user_id/prompts",
            get(prompts_handler::<R, N>),
        )
        .with_state(service)
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) async fn questions_handler<R, N>(
    State(service): State<Arc<CheckinService<R, N>>>,
) -> Response
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    let questions = service.scorer().catalog().questions();
    (StatusCode::OK, axum::Json(json!({ "questions": questions }))).into_response()
}

pub(crate) async fn score_handler<R, N>(
    State(service): State<Arc<CheckinService<R, N>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    let preview = service.preview(&request.answers);
    (StatusCode::OK, axum::Json(preview)).into_response()
}

pub(crate) async fn availability_handler<R, N>(
    State(service): State<Arc<CheckinService<R, N>>>,
    Path(user_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Response
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    let user_id = UserId(user_id);
    let now = query.at.unwrap_or_else(local_now);
    match service.availability(&user_id, now) {
        Ok(availability) => {
            let payload = json!({
                "user_id": user_id,
                "availability": availability,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn complete_handler<R, N>(
    State(service): State<Arc<CheckinService<R, N>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<CompleteRequest>,
) -> Response
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    let user_id = UserId(user_id);
    let now = request.at.unwrap_or_else(local_now);
    let result = service
        .finalize(request.answers)
        .and_then(|answers| service.complete(&user_id, answers, now));

    match result {
        Ok(completion) => (StatusCode::CREATED, axum::Json(completion)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn prompts_handler<R, N>(
    State(service): State<Arc<CheckinService<R, N>>>,
    Path(user_id): Path<String>,
    Query(query): Query<PromptsQuery>,
) -> Response
where
    R: CheckinRepository + 'static,
    N: ReminderScheduler + 'static,
{
    let user_id = UserId(user_id);
    let today = query.today.unwrap_or_else(|| local_now().date());
    match service.prompts(&user_id, today) {
        Ok(prompts) => {
            let payload = json!({
                "user_id": user_id,
                "prompts": prompts,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: CheckinServiceError) -> Response {
    let status = match &err {
        CheckinServiceError::Locked { .. } | CheckinServiceError::AlreadyCompleted { .. } => {
            StatusCode::CONFLICT
        }
        CheckinServiceError::Session(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckinServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let mut payload = json!({ "error": err.to_string() });
    if status == StatusCode::SERVICE_UNAVAILABLE {
        payload["retryable"] = json!(true);
    }
    (status, axum::Json(payload)).into_response()
}
