use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

fn rehearsal_json(r: &bandroom_core::Rehearsal) -> serde_json::Value {
    serde_json::json!({
        "id": r.id,
        "band": r.band_slug,
        "start": r.interval.start(),
        "end": r.interval.end(),
        "location": r.location,
        "description": r.description,
        "created_at": r.created_at,
        "updated_at": r.updated_at,
    })
}

/// Load everything the conflict detector needs for one band.
fn load_band_snapshot(
    root: &std::path::Path,
    slug: &str,
) -> bandroom_core::Result<(
    bandroom_core::Band,
    Vec<bandroom_core::Member>,
    Vec<bandroom_core::Rehearsal>,
    bandroom_core::DefaultPolicy,
)> {
    let band = bandroom_core::Band::load(root, slug)?;
    let members = band
        .roster
        .iter()
        .map(|id| bandroom_core::Member::load(root, *id))
        .collect::<bandroom_core::Result<Vec<_>>>()?;
    let existing = bandroom_core::Rehearsal::list_for_band(root, slug)?;
    let policy = bandroom_core::Config::load_or_default(root).default_policy;
    Ok((band, members, existing, policy))
}

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub band: String,
}

/// GET /api/rehearsals?band=slug — a band's rehearsals, chronological.
pub async fn list_rehearsals(
    State(app): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        // Surface a 404 for unknown bands rather than an empty list.
        bandroom_core::Band::load(&root, &query.band)?;
        let rehearsals = bandroom_core::Rehearsal::list_for_band(&root, &query.band)?;
        let list: Vec<serde_json::Value> = rehearsals.iter().map(rehearsal_json).collect();
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateRehearsalBody {
    pub band: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/rehearsals — book a rehearsal.
///
/// Runs the conflict detector against a fresh storage snapshot; a non-empty
/// report is returned as a 409 with the report in the body and nothing is
/// persisted. The state write lock is held across check and commit so two
/// overlapping requests cannot both pass.
pub async fn create_rehearsal(
    State(app): State<AppState>,
    Json(body): Json<CreateRehearsalBody>,
) -> Result<Response, AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let proposed = bandroom_core::TimeInterval::from_datetimes(body.start, body.end)?;
        let (band, members, existing, policy) = load_band_snapshot(&root, &body.band)?;
        let report =
            bandroom_core::check_conflicts(&band, &members, proposed, &existing, None, policy)?;
        if !report.is_clear() {
            return Ok::<_, bandroom_core::BandroomError>(Err(report));
        }

        let mut rehearsal = bandroom_core::Rehearsal::new(band.slug, proposed);
        rehearsal.location = body.location;
        rehearsal.description = body.description;
        rehearsal.save(&root)?;
        Ok(Ok(rehearsal))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(match result {
        Ok(rehearsal) => {
            tracing::info!(band = %rehearsal.band_slug, id = %rehearsal.id, "rehearsal booked");
            (StatusCode::CREATED, Json(rehearsal_json(&rehearsal))).into_response()
        }
        Err(report) => conflict_response(&report),
    })
}

#[derive(serde::Deserialize)]
pub struct RescheduleBody {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// PUT /api/rehearsals/:id — move a rehearsal to a new slot.
///
/// Same contract as create, except the rehearsal's own id is excluded from
/// the overlap check so it never collides with itself.
pub async fn reschedule_rehearsal(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RescheduleBody>,
) -> Result<Response, AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut rehearsal = bandroom_core::Rehearsal::load(&root, id)?;
        let proposed = bandroom_core::TimeInterval::from_datetimes(body.start, body.end)?;
        let (band, members, existing, policy) = load_band_snapshot(&root, &rehearsal.band_slug)?;
        let report = bandroom_core::check_conflicts(
            &band,
            &members,
            proposed,
            &existing,
            Some(id),
            policy,
        )?;
        if !report.is_clear() {
            return Ok::<_, bandroom_core::BandroomError>(Err(report));
        }

        rehearsal.interval = proposed;
        if body.location.is_some() {
            rehearsal.location = body.location;
        }
        if body.description.is_some() {
            rehearsal.description = body.description;
        }
        rehearsal.updated_at = Utc::now();
        rehearsal.save(&root)?;
        Ok(Ok(rehearsal))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(match result {
        Ok(rehearsal) => Json(rehearsal_json(&rehearsal)).into_response(),
        Err(report) => conflict_response(&report),
    })
}

/// DELETE /api/rehearsals/:id — cancel a rehearsal.
pub async fn delete_rehearsal(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || {
        let rehearsal = bandroom_core::Rehearsal::load(&root, id)?;
        bandroom_core::Rehearsal::delete(&root, &rehearsal.band_slug, id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

fn conflict_response(report: &bandroom_core::ConflictReport) -> Response {
    (
        StatusCode::CONFLICT,
        Json(serde_json::json!({
            "error": "scheduling conflict",
            "conflict": report,
        })),
    )
        .into_response()
}
