use std::path::{Path, PathBuf};

/// Resolve the Bandroom data root.
///
/// Priority:
/// 1. `--root` flag / `BANDROOM_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.bandroom/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(".bandroom").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_bandroom_dir_upward() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".bandroom")).unwrap();
        let subdir = dir.path().join("nested/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(&subdir).unwrap();
        let result = resolve_root(None);
        std::env::set_current_dir(prev).unwrap();

        assert_eq!(
            result.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
