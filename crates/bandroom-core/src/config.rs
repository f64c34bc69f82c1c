use crate::availability::DefaultPolicy;
use crate::error::Result;
use crate::io;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Deployment-wide settings, stored at `.bandroom/config.yaml`.
///
/// Loaded once per request by the HTTP layer and passed explicitly into the
/// engine; the engine itself never reads configuration ambiently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base calendar assumed before availability rules apply.
    #[serde(default)]
    pub default_policy: DefaultPolicy,
    /// Cap on suggestion results when the caller does not pass a limit.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_suggestion_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_policy: DefaultPolicy::default(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        io::read_yaml(&paths::config_path(root))
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(root).unwrap_or_default()
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::write_yaml(&paths::config_path(root), self)
    }
}

/// Scaffold the `.bandroom/` data root with a default config.
/// Idempotent: an existing config file is left untouched.
pub fn init(root: &Path) -> Result<Config> {
    io::ensure_dir(&paths::bandroom_dir(root))?;
    io::ensure_dir(&paths::bands_dir(root))?;
    io::ensure_dir(&paths::members_dir(root))?;
    let config_file = paths::config_path(root);
    if config_file.exists() {
        return Config::load(root);
    }
    let config = Config::default();
    config.save(root)?;
    Ok(config)
}

/// True once `init` has run for this root.
pub fn is_initialized(root: &Path) -> bool {
    paths::config_path(root).exists()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
