use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
///
/// `write_lock` serializes every check-then-persist sequence against the
/// rehearsal store. The engine only detects conflicts over a snapshot; without
/// this lock two simultaneous creates for overlapping slots could both pass
/// their checks and both commit.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(PathBuf::from("/tmp/test"));
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
    }

    #[test]
    fn clones_share_the_write_lock() {
        let state = AppState::new(PathBuf::from("/tmp/test"));
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.write_lock, &clone.write_lock));
    }
}
