use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/bands/:slug/songs — a band's repertoire, sorted by title.
pub async fn list_songs(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<bandroom_core::Song>>, AppError> {
    let root = app.root.clone();
    let songs = tokio::task::spawn_blocking(move || {
        bandroom_core::Band::load(&root, &slug)?;
        bandroom_core::Song::list_for_band(&root, &slug)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(songs))
}

#[derive(serde::Deserialize)]
pub struct CreateSongBody {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/bands/:slug/songs — add a song to the repertoire.
pub async fn create_song(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateSongBody>,
) -> Result<(StatusCode, Json<bandroom_core::Song>), AppError> {
    let root = app.root.clone();
    let song = tokio::task::spawn_blocking(move || {
        let band = bandroom_core::Band::load(&root, &slug)?;
        let mut song = bandroom_core::Song::new(band.slug, body.title);
        song.artist = body.artist;
        song.duration_seconds = body.duration_seconds;
        song.notes = body.notes;
        song.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(song)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(song)))
}

#[derive(serde::Deserialize)]
pub struct UpdateSongBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<bandroom_core::SongStatus>,
}

/// PUT /api/songs/:id — update song details or rotation status.
pub async fn update_song(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSongBody>,
) -> Result<Json<bandroom_core::Song>, AppError> {
    let root = app.root.clone();
    let song = tokio::task::spawn_blocking(move || {
        let mut song = bandroom_core::Song::load(&root, id)?;
        if let Some(title) = body.title {
            song.title = title;
        }
        if body.artist.is_some() {
            song.artist = body.artist;
        }
        if body.duration_seconds.is_some() {
            song.duration_seconds = body.duration_seconds;
        }
        if body.notes.is_some() {
            song.notes = body.notes;
        }
        if let Some(status) = body.status {
            song.status = status;
        }
        song.updated_at = Utc::now();
        song.save(&root)?;
        Ok::<_, bandroom_core::BandroomError>(song)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(song))
}

/// DELETE /api/songs/:id — drop a song from the repertoire.
pub async fn delete_song(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || {
        let song = bandroom_core::Song::load(&root, id)?;
        bandroom_core::Song::delete(&root, &song.band_slug, id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
