use crate::availability::{AvailabilityRule, RuleKind};
use crate::error::{BandroomError, Result};
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A musician with a personal set of free/busy rules.
///
/// Rules belong to their member; who may edit them is an authorization
/// question settled upstream of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub rules: Vec<AvailabilityRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn create(root: &Path, name: impl Into<String>) -> Result<Self> {
        if !crate::config::is_initialized(root) {
            return Err(BandroomError::NotInitialized);
        }
        let member = Self::new(name);
        member.save(root)?;
        Ok(member)
    }

    pub fn load(root: &Path, id: Uuid) -> Result<Self> {
        let path = paths::member_path(root, id);
        if !path.exists() {
            return Err(BandroomError::MemberNotFound(id.to_string()));
        }
        io::read_yaml(&path)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::write_yaml(&paths::member_path(root, self.id), self)
    }

    pub fn list(root: &Path) -> Result<Vec<Member>> {
        io::read_yaml_dir(&paths::members_dir(root))
    }

    // -----------------------------------------------------------------------
    // Rules
    // -----------------------------------------------------------------------

    /// Validate and attach a rule, returning its generated id.
    pub fn add_rule(&mut self, kind: RuleKind) -> Result<Uuid> {
        let rule = AvailabilityRule::new(kind)?;
        let id = rule.id;
        self.rules.push(rule);
        self.updated_at = Utc::now();
        Ok(id)
    }

    pub fn remove_rule(&mut self, rule_id: Uuid) -> Result<()> {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != rule_id);
        if self.rules.len() == before {
            return Err(BandroomError::RuleNotFound(rule_id.to_string()));
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
    use crate::interval::TimeInterval;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn initialized_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        crate::config::init(dir.path()).unwrap();
        dir
    }

    fn sample_one_off() -> RuleKind {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 21, 0, 0).unwrap();
        RuleKind::OneOff {
            interval: TimeInterval::from_datetimes(start, end).unwrap(),
            busy: false,
        }
    }

    #[test]
    fn create_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Member::create(dir.path(), "Alice"),
            Err(BandroomError::NotInitialized)
        ));
    }

    #[test]
    fn create_load_roundtrip() {
        let dir = initialized_root();
        let member = Member::create(dir.path(), "Alice").unwrap();
        let loaded = Member::load(dir.path(), member.id).unwrap();
        assert_eq!(loaded, member);
    }

    #[test]
    fn load_missing_member_fails() {
        let dir = initialized_root();
        assert!(matches!(
            Member::load(dir.path(), Uuid::new_v4()),
            Err(BandroomError::MemberNotFound(_))
        ));
    }

    #[test]
    fn add_and_remove_rule() {
        let dir = initialized_root();
        let mut member = Member::create(dir.path(), "Bob").unwrap();
        let rule_id = member.add_rule(sample_one_off()).unwrap();
        assert_eq!(member.rules.len(), 1);
        member.save(dir.path()).unwrap();

        let mut loaded = Member::load(dir.path(), member.id).unwrap();
        loaded.remove_rule(rule_id).unwrap();
        assert!(loaded.rules.is_empty());
    }

    #[test]
    fn remove_unknown_rule_fails() {
        let dir = initialized_root();
        let mut member = Member::create(dir.path(), "Bob").unwrap();
        assert!(matches!(
            member.remove_rule(Uuid::new_v4()),
            Err(BandroomError::RuleNotFound(_))
        ));
    }

    #[test]
    fn list_returns_all_members() {
        let dir = initialized_root();
        Member::create(dir.path(), "Alice").unwrap();
        Member::create(dir.path(), "Bob").unwrap();
        let members = Member::list(dir.path()).unwrap();
        assert_eq!(members.len(), 2);
    }
}
