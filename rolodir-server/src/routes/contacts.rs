//! Contact endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};

use rolodir_core::{Contact, ContactDraft, ContactPatch, search};

use crate::routes::{AppError, session_user};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/{id}", patch(update_contact).delete(delete_contact))
}

#[derive(Deserialize)]
pub struct ListQuery {
    /// Substring search over name, email, and phone
    #[serde(default)]
    pub q: String,
}

/// GET /contacts - List (optionally search) the caller's contacts
async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let store = state.store(session_user(&headers));
    let contacts = store.contacts().await?;

    let matches: Vec<Contact> = search::filter_contacts(&contacts, &query.q)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(matches))
}

/// Response for record creation
#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /contacts - Validate and create a contact
async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<ContactDraft>,
) -> Result<Json<CreatedResponse>, AppError> {
    draft.validate()?;

    let store = state.store(session_user(&headers));
    let id = store.add_contact(draft).await?;

    Ok(Json(CreatedResponse { id }))
}

/// PATCH /contacts/:id - Merge fields into a contact
async fn update_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> Result<StatusCode, AppError> {
    let store = state.store(session_user(&headers));
    store.update_contact(&id, patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /contacts/:id - Remove a contact and cascade to its events
async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let store = state.store(session_user(&headers));
    store.delete_contact(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
