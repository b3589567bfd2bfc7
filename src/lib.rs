//! Holocron-RS: A Star Wars character explorer written in Rust
//!
//! Searches the public swapi.tech catalog for a character by name and
//! aggregates the character's attributes, home planet, species, and film
//! appearances into one consolidated view.

pub mod config;
pub mod network;
pub mod search;
pub mod swapi;
pub mod web;

pub use config::Settings;
pub use search::{Lookup, Phase, SearchState};
pub use swapi::{ArchiveError, CharacterArchive, SwapiClient};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for upstream requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 30;
