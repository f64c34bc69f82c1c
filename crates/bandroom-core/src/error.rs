use thiserror::Error;

#[derive(Debug, Error)]
pub enum BandroomError {
    #[error("not initialized: run 'bandroom init'")]
    NotInitialized,

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("intervals neither overlap nor touch")]
    NotMergeable,

    #[error("invalid band '{0}': roster is empty")]
    InvalidBand(String),

    #[error("invalid duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("invalid search window: start must precede end")]
    InvalidWindow,

    #[error("invalid availability rule: {0}")]
    InvalidRule(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("band not found: {0}")]
    BandNotFound(String),

    #[error("band already exists: {0}")]
    BandExists(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("member already on roster: {0}")]
    DuplicateMember(String),

    #[error("availability rule not found: {0}")]
    RuleNotFound(String),

    #[error("rehearsal not found: {0}")]
    RehearsalNotFound(String),

    #[error("song not found: {0}")]
    SongNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BandroomError>;
