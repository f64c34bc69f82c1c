use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

fn band_json(band: &bandroom_core::Band) -> serde_json::Value {
    serde_json::json!({
        "slug": band.slug,
        "name": band.name,
        "description": band.description,
        "roster": band.roster,
        "created_at": band.created_at,
        "updated_at": band.updated_at,
    })
}

/// GET /api/bands — list all bands.
pub async fn list_bands(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let bands = bandroom_core::Band::list(&root)?;
        let list: Vec<serde_json::Value> = bands.iter().map(band_json).collect();
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateBandBody {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/bands — create a new band.
pub async fn create_band(
    State(app): State<AppState>,
    Json(body): Json<CreateBandBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut band = bandroom_core::Band::create(&root, body.slug, body.name)?;
        if body.description.is_some() {
            band.description = body.description;
            band.save(&root)?;
        }
        Ok::<_, bandroom_core::BandroomError>(band_json(&band))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/bands/:slug — band detail with roster member names.
pub async fn get_band(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let band = bandroom_core::Band::load(&root, &slug)?;
        let members: Vec<serde_json::Value> = band
            .roster
            .iter()
            .filter_map(|id| bandroom_core::Member::load(&root, *id).ok())
            .map(|m| serde_json::json!({ "id": m.id, "name": m.name, "email": m.email }))
            .collect();
        let mut value = band_json(&band);
        value["members"] = serde_json::json!(members);
        Ok::<_, bandroom_core::BandroomError>(value)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/bands/:slug — remove a band and its rehearsals and songs.
pub async fn delete_band(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || bandroom_core::Band::delete(&root, &slug))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(serde::Deserialize)]
pub struct AddMemberBody {
    pub member_id: Uuid,
}

/// POST /api/bands/:slug/members — attach an existing member to the roster.
pub async fn add_band_member(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<AddMemberBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut band = bandroom_core::Band::load(&root, &slug)?;
        // Verify the member exists before putting it on a roster.
        bandroom_core::Member::load(&root, body.member_id)?;
        band.add_member(body.member_id)?;
        band.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!({
            "slug": band.slug,
            "roster": band.roster,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/bands/:slug/members/:id — drop a member from the roster.
pub async fn remove_band_member(
    State(app): State<AppState>,
    Path((slug, member_id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut band = bandroom_core::Band::load(&root, &slug)?;
        band.remove_member(member_id)?;
        band.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(serde_json::json!({
            "slug": band.slug,
            "roster": band.roster,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
