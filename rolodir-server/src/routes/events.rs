//! Calendar event endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use rolodir_core::schedule::{events_in_hour, events_on_day};
use rolodir_core::{CalendarEvent, EventDraft, RolodirError};

use crate::routes::{AppError, session_user};
use crate::routes::contacts::CreatedResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", delete(delete_event))
}

#[derive(Deserialize)]
pub struct EventsQuery {
    /// Restrict to events on this calendar day
    pub day: Option<NaiveDate>,
    /// With `day`: restrict to this hour slot (0-23)
    pub hour: Option<u32>,
    /// IANA zone the day/hour bucketing is evaluated in; defaults to UTC
    pub tz: Option<String>,
}

/// GET /events - List events, optionally bucketed by day and hour
async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let store = state.store(session_user(&headers));
    let events = store.events().await?;

    let Some(day) = query.day else {
        return Ok(Json(events));
    };

    let tz: Tz = match query.tz.as_deref() {
        Some(name) => name.parse().map_err(|_| RolodirError::Validation {
            field: "tz",
            reason: format!("Unknown time zone '{}'", name),
        })?,
        None => Tz::UTC,
    };

    let bucket: Vec<CalendarEvent> = match query.hour {
        Some(hour) => events_in_hour(&events, day, hour, &tz),
        None => events_on_day(&events, day, &tz),
    }
    .into_iter()
    .cloned()
    .collect();

    Ok(Json(bucket))
}

/// POST /events - Schedule an event
async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<EventDraft>,
) -> Result<Json<CreatedResponse>, AppError> {
    let store = state.store(session_user(&headers));
    let id = store.add_event(draft).await?;

    Ok(Json(CreatedResponse { id }))
}

/// DELETE /events/:id - Cancel a single event
async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let store = state.store(session_user(&headers));
    store.delete_event(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
