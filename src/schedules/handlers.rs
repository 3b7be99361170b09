use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{ScheduleRequest, ScheduleResponse};
use crate::{
    auth::extractors::AuthUser,
    common::{
        extract::{JsonBody, PathParam},
        MessageResponse,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/schedules", get(list_schedules).post(create_schedule))
        .route(
            "/schedules/:id",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
}

// Someone else's schedule looks exactly like a missing one.
fn not_found() -> AppError {
    AppError::NotFound("Schedule not found or access denied".into())
}

#[instrument(skip(state, user, body))]
pub async fn create_schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody<ScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleResponse>)> {
    let input = body.validate()?;
    let schedule = state.schedules.create(user.id, input).await?;
    info!(schedule_id = schedule.id, user_id = user.id, "schedule created");
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

#[instrument(skip(state, user))]
pub async fn list_schedules(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<ScheduleResponse>>> {
    let rows = state.schedules.list(user.id).await?;
    Ok(Json(rows.into_iter().map(ScheduleResponse::from).collect()))
}

#[instrument(skip(state, user))]
pub async fn get_schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ScheduleResponse>> {
    let schedule = state.schedules.get(user.id, id).await?.ok_or_else(not_found)?;
    Ok(Json(schedule.into()))
}

#[instrument(skip(state, user, body))]
pub async fn update_schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<ScheduleRequest>,
) -> AppResult<Json<ScheduleResponse>> {
    let input = body.validate()?;
    let schedule = state
        .schedules
        .update(user.id, id, input)
        .await?
        .ok_or_else(not_found)?;
    info!(schedule_id = id, user_id = user.id, "schedule updated");
    Ok(Json(schedule.into()))
}

#[instrument(skip(state, user))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !state.schedules.soft_delete(user.id, id).await? {
        return Err(not_found());
    }
    info!(schedule_id = id, user_id = user.id, "schedule soft deleted");
    Ok(Json(MessageResponse::new(format!("Schedule {} soft deleted", id))))
}
