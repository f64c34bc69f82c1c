use crate::error::{BandroomError, Result};
use crate::interval::TimeInterval;
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Rehearsal
// ---------------------------------------------------------------------------

/// A booked rehearsal slot for a band.
///
/// Persisted state is authoritative; the scheduling engine only ever sees the
/// current set as input and never holds rehearsals of its own. The
/// no-overlap-per-band invariant is enforced by running the conflict detector
/// before any create or reschedule is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rehearsal {
    pub id: Uuid,
    pub band_slug: String,
    pub interval: TimeInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rehearsal {
    pub fn new(band_slug: impl Into<String>, interval: TimeInterval) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            band_slug: band_slug.into(),
            interval,
            location: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn save(&self, root: &Path) -> Result<()> {
        io::write_yaml(
            &paths::rehearsal_path(root, &self.band_slug, self.id),
            self,
        )
    }

    /// Load a rehearsal by id, searching every band.
    pub fn load(root: &Path, id: Uuid) -> Result<Self> {
        for band in crate::band::Band::list(root)? {
            let path = paths::rehearsal_path(root, &band.slug, id);
            if path.exists() {
                return io::read_yaml(&path);
            }
        }
        Err(BandroomError::RehearsalNotFound(id.to_string()))
    }

    /// All rehearsals for one band, chronological.
    pub fn list_for_band(root: &Path, slug: &str) -> Result<Vec<Rehearsal>> {
        let mut rehearsals: Vec<Rehearsal> = io::read_yaml_dir(&paths::rehearsals_dir(root, slug))?;
        rehearsals.sort_by_key(|r| r.interval);
        Ok(rehearsals)
    }

    pub fn delete(root: &Path, slug: &str, id: Uuid) -> Result<()> {
        let path = paths::rehearsal_path(root, slug, id);
        if !path.exists() {
            return Err(BandroomError::RehearsalNotFound(id.to_string()));
        }
        std::fs::remove_file(path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
