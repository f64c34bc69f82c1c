use crate::error::{BandroomError, Result};
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// SongStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongStatus {
    #[default]
    Suggested,
    InRotation,
    Retired,
}

impl fmt::Display for SongStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SongStatus::Suggested => "suggested",
            SongStatus::InRotation => "in_rotation",
            SongStatus::Retired => "retired",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Song
// ---------------------------------------------------------------------------

/// A song in a band's repertoire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub band_slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: SongStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Song {
    pub fn new(band_slug: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            band_slug: band_slug.into(),
            title: title.into(),
            artist: None,
            duration_seconds: None,
            notes: None,
            status: SongStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::write_yaml(&paths::song_path(root, &self.band_slug, self.id), self)
    }

    /// Load a song by id, searching every band.
    pub fn load(root: &Path, id: Uuid) -> Result<Self> {
        for band in crate::band::Band::list(root)? {
            let path = paths::song_path(root, &band.slug, id);
            if path.exists() {
                return io::read_yaml(&path);
            }
        }
        Err(BandroomError::SongNotFound(id.to_string()))
    }

    /// A band's repertoire, sorted by title.
    pub fn list_for_band(root: &Path, slug: &str) -> Result<Vec<Song>> {
        let mut songs: Vec<Song> = io::read_yaml_dir(&paths::songs_dir(root, slug))?;
        songs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(songs)
    }

    pub fn delete(root: &Path, slug: &str, id: Uuid) -> Result<()> {
        let path = paths::song_path(root, slug, id);
        if !path.exists() {
            return Err(BandroomError::SongNotFound(id.to_string()));
        }
        std::fs::remove_file(path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
