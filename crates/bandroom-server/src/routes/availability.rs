use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct WindowQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// GET /api/availability/:member_id?from&to — a member's free time.
pub async fn member_free_intervals(
    State(app): State<AppState>,
    Path(member_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<bandroom_core::TimeInterval>>, AppError> {
    let root = app.root.clone();
    let free = tokio::task::spawn_blocking(move || {
        let window = bandroom_core::TimeInterval::from_datetimes(query.from, query.to)?;
        let member = bandroom_core::Member::load(&root, member_id)?;
        let policy = bandroom_core::Config::load_or_default(&root).default_policy;
        Ok::<_, bandroom_core::BandroomError>(bandroom_core::free_intervals(
            &member.rules,
            &window,
            policy,
        ))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(free))
}

#[derive(serde::Deserialize)]
pub struct SuggestionsQuery {
    pub band: String,
    pub duration: i64,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// GET /api/availability/suggestions?band&duration&from&to&limit —
/// feasible rehearsal slots for the whole roster, earliest first.
pub async fn suggestions(
    State(app): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<Vec<bandroom_core::TimeInterval>>, AppError> {
    let root = app.root.clone();
    let slots = tokio::task::spawn_blocking(move || {
        let band = bandroom_core::Band::load(&root, &query.band)?;
        let members = band
            .roster
            .iter()
            .map(|id| bandroom_core::Member::load(&root, *id))
            .collect::<bandroom_core::Result<Vec<_>>>()?;
        let existing = bandroom_core::Rehearsal::list_for_band(&root, &band.slug)?;
        let config = bandroom_core::Config::load_or_default(&root);
        bandroom_core::suggest_slots(
            &band,
            &members,
            query.duration,
            query.from,
            query.to,
            &existing,
            query.limit.unwrap_or(config.suggestion_limit),
            config.default_policy,
        )
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(slots))
}
