pub mod availability;
pub mod bands;
pub mod health;
pub mod members;
pub mod rehearsals;
pub mod songs;
