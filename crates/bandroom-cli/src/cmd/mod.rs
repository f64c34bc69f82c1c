pub mod band;
pub mod init;
pub mod member;
pub mod rehearsal;
