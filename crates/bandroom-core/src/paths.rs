use crate::error::{BandroomError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BANDROOM_DIR: &str = ".bandroom";
pub const BANDS_DIR: &str = ".bandroom/bands";
pub const MEMBERS_DIR: &str = ".bandroom/members";

pub const CONFIG_FILE: &str = ".bandroom/config.yaml";
pub const BAND_MANIFEST: &str = "band.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn bandroom_dir(root: &Path) -> PathBuf {
    root.join(BANDROOM_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn bands_dir(root: &Path) -> PathBuf {
    root.join(BANDS_DIR)
}

pub fn band_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(BANDS_DIR).join(slug)
}

pub fn band_manifest(root: &Path, slug: &str) -> PathBuf {
    band_dir(root, slug).join(BAND_MANIFEST)
}

pub fn members_dir(root: &Path) -> PathBuf {
    root.join(MEMBERS_DIR)
}

pub fn member_path(root: &Path, id: Uuid) -> PathBuf {
    members_dir(root).join(format!("{id}.yaml"))
}

pub fn rehearsals_dir(root: &Path, slug: &str) -> PathBuf {
    band_dir(root, slug).join("rehearsals")
}

pub fn rehearsal_path(root: &Path, slug: &str, id: Uuid) -> PathBuf {
    rehearsals_dir(root, slug).join(format!("{id}.yaml"))
}

pub fn songs_dir(root: &Path, slug: &str) -> PathBuf {
    band_dir(root, slug).join("songs")
}

pub fn song_path(root: &Path, slug: &str, id: Uuid) -> PathBuf {
    songs_dir(root, slug).join(format!("{id}.yaml"))
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(BandroomError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
