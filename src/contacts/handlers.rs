use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AdminSession,
    contacts::dto::{
        Ack, ContactListQuery, ContactListResponse, ContactSubmission, StatsResponse,
        SubmitResponse, UpdateContactRequest,
    },
    contacts::repo::{Contact, ContactChanges, ContactFilter, ContactStatus},
    error::ApiError,
    state::AppState,
    validation::validate_submission,
};

const SUBMIT_THANKS: &str = "Thank you for your message! We'll get back to you soon.";

/// POST /api/contact — public intake. Validation failures come back as
/// 400s naming the violated rule; nothing is inserted on failure.
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactSubmission>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let new = validate_submission(
        &payload.name,
        &payload.email,
        payload.phone.as_deref(),
        &payload.message,
    )
    .map_err(|e| {
        warn!(error = %e, "contact submission rejected");
        e
    })?;

    let contact = Contact::insert(&state.db, &new).await?;
    info!(id = contact.id, "contact submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: SUBMIT_THANKS,
            id: contact.id,
        }),
    ))
}

/// GET /api/admin/contacts — filtered, searched, paginated listing.
/// `total` counts every matching row regardless of the page window.
#[instrument(skip(state, _session))]
pub async fn list_contacts(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ContactListResponse>, ApiError> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            ContactStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request("Invalid status filter"))?,
        ),
    };
    let filter = ContactFilter {
        status,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };
    let limit = if query.limit < 0 { 20 } else { query.limit };
    let offset = query.offset.max(0);

    let contacts = Contact::list(&state.db, &filter, limit, offset).await?;
    let total = Contact::count(&state.db, &filter).await?;

    Ok(Json(ContactListResponse {
        contacts,
        total,
        limit,
        offset,
    }))
}

/// PATCH /api/admin/contacts/:id — partial status/notes update.
#[instrument(skip(state, _session, payload))]
pub async fn update_contact(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let status = match payload.status.as_deref() {
        Some(raw) => {
            Some(ContactStatus::parse(raw).ok_or_else(|| ApiError::bad_request("Invalid status"))?)
        }
        None => None,
    };
    let changes = ContactChanges {
        status,
        notes: payload.notes,
    };
    if changes.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let contact = Contact::update(&state.db, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    info!(id, status = ?changes.status, "contact updated");
    Ok(Json(contact))
}

/// DELETE /api/admin/contacts/:id — hard delete.
#[instrument(skip(state, _session))]
pub async fn delete_contact(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    if !Contact::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Contact not found"));
    }
    info!(id, "contact deleted");
    Ok(Json(Ack {
        success: true,
        message: "Contact deleted",
    }))
}

/// GET /api/admin/stats — dashboard counters.
#[instrument(skip(state, _session))]
pub async fn get_stats(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = Contact::stats(&state.db).await?;
    Ok(Json(stats))
}
