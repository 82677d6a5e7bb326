//! Axum route handlers for the watering scheduler.
//!
//! Toggle and delete answer with the full list, like the page re-rendering
//! after a click; an unknown id simply leaves the list as it was.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::alarm::WateringAlarm;
use crate::scheduler::calendar::{month_calendar, CalendarDay};
use crate::scheduler::store::NewAlarm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/v1/alarms
pub async fn handle_list_alarms(
    State(state): State<AppState>,
) -> Result<Json<Vec<WateringAlarm>>, AppError> {
    Ok(Json(state.alarms.list().await?))
}

/// POST /api/v1/alarms
pub async fn handle_create_alarm(
    State(state): State<AppState>,
    Json(req): Json<NewAlarm>,
) -> Result<(StatusCode, Json<WateringAlarm>), AppError> {
    let alarm = state.alarms.create(req).await?;
    Ok((StatusCode::CREATED, Json(alarm)))
}

/// POST /api/v1/alarms/:id/toggle
pub async fn handle_toggle_alarm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<WateringAlarm>>, AppError> {
    state.alarms.toggle(&id).await?;
    Ok(Json(state.alarms.list().await?))
}

/// DELETE /api/v1/alarms/:id
pub async fn handle_delete_alarm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<WateringAlarm>>, AppError> {
    state.alarms.delete(&id).await?;
    Ok(Json(state.alarms.list().await?))
}

/// GET /api/v1/alarms/calendar?year=&month=
///
/// Defaults to the current local month.
pub async fn handle_calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let today = Local::now().date_naive();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());

    let alarms = state.alarms.list().await?;
    let days = month_calendar(&alarms, year, month)
        .ok_or_else(|| AppError::Validation(format!("{year}-{month} is not a valid month")))?;
    Ok(Json(days))
}
