pub mod availability;
pub mod band;
pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod io;
pub mod member;
pub mod paths;
pub mod rehearsal;
pub mod song;
pub mod suggest;

pub use availability::{free_intervals, AvailabilityRule, DefaultPolicy, RuleKind};
pub use band::Band;
pub use config::Config;
pub use conflict::{check_conflicts, ConflictReport};
pub use error::{BandroomError, Result};
pub use interval::TimeInterval;
pub use member::Member;
pub use rehearsal::Rehearsal;
pub use song::{Song, SongStatus};
pub use suggest::suggest_slots;
