use crate::error::{BandroomError, Result};
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// A band and its roster of member ids.
///
/// Membership is a flat set with no history; append and remove are the only
/// roster operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub roster: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Band {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            name: name.into(),
            description: None,
            roster: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn create(root: &Path, slug: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        if !crate::config::is_initialized(root) {
            return Err(BandroomError::NotInitialized);
        }
        let slug = slug.into();
        paths::validate_slug(&slug)?;
        if paths::band_manifest(root, &slug).exists() {
            return Err(BandroomError::BandExists(slug));
        }
        let band = Self::new(slug, name);
        band.save(root)?;
        Ok(band)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let path = paths::band_manifest(root, slug);
        if !path.exists() {
            return Err(BandroomError::BandNotFound(slug.to_string()));
        }
        io::read_yaml(&path)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::write_yaml(&paths::band_manifest(root, &self.slug), self)
    }

    pub fn list(root: &Path) -> Result<Vec<Band>> {
        let dir = paths::bands_dir(root);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut slugs: Vec<_> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        slugs.sort();
        slugs.iter().map(|slug| Band::load(root, slug)).collect()
    }

    pub fn delete(root: &Path, slug: &str) -> Result<()> {
        let dir = paths::band_dir(root, slug);
        if !dir.exists() {
            return Err(BandroomError::BandNotFound(slug.to_string()));
        }
        std::fs::remove_dir_all(dir)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    pub fn add_member(&mut self, member_id: Uuid) -> Result<()> {
        if self.roster.contains(&member_id) {
            return Err(BandroomError::DuplicateMember(member_id.to_string()));
        }
        self.roster.push(member_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn remove_member(&mut self, member_id: Uuid) -> Result<()> {
        let before = self.roster.len();
        self.roster.retain(|id| *id != member_id);
        if self.roster.len() == before {
            return Err(BandroomError::MemberNotFound(member_id.to_string()));
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn initialized_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        crate::config::init(dir.path()).unwrap();
        dir
    }

    #[test]
    fn create_load_roundtrip() {
        let dir = initialized_root();
        let band = Band::create(dir.path(), "the-strokes", "The Strokes").unwrap();
        let loaded = Band::load(dir.path(), "the-strokes").unwrap();
        assert_eq!(loaded, band);
    }

    #[test]
    fn create_rejects_duplicate_slug() {
        let dir = initialized_root();
        Band::create(dir.path(), "the-strokes", "The Strokes").unwrap();
        assert!(matches!(
            Band::create(dir.path(), "the-strokes", "Again"),
            Err(BandroomError::BandExists(_))
        ));
    }

    #[test]
    fn create_rejects_bad_slug() {
        let dir = initialized_root();
        assert!(matches!(
            Band::create(dir.path(), "The Strokes", "The Strokes"),
            Err(BandroomError::InvalidSlug(_))
        ));
    }

    #[test]
    fn roster_add_remove() {
        let dir = initialized_root();
        let mut band = Band::create(dir.path(), "trio", "Trio").unwrap();
        let id = Uuid::new_v4();
        band.add_member(id).unwrap();
        assert!(matches!(
            band.add_member(id),
            Err(BandroomError::DuplicateMember(_))
        ));
        band.remove_member(id).unwrap();
        assert!(matches!(
            band.remove_member(id),
            Err(BandroomError::MemberNotFound(_))
        ));
    }

    #[test]
    fn list_is_sorted_by_slug() {
        let dir = initialized_root();
        Band::create(dir.path(), "zebra", "Zebra").unwrap();
        Band::create(dir.path(), "alpha", "Alpha").unwrap();
        let bands = Band::list(dir.path()).unwrap();
        let slugs: Vec<_> = bands.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zebra"]);
    }

    #[test]
    fn delete_removes_band_dir() {
        let dir = initialized_root();
        Band::create(dir.path(), "gone", "Gone").unwrap();
        Band::delete(dir.path(), "gone").unwrap();
        assert!(matches!(
            Band::load(dir.path(), "gone"),
            Err(BandroomError::BandNotFound(_))
        ));
    }
}
