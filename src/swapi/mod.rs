//! Data access layer for the swapi.tech catalog
//!
//! Four independent query operations, each a stateless wrapper over one or
//! more GET requests against the catalog service. Exposed behind the
//! [`CharacterArchive`] trait so the orchestrator and tests can swap in
//! alternative backends.

mod client;
mod types;

pub use client::SwapiClient;
pub use types::{Character, Film, FilmProperties, Planet, Species, SpeciesSummary};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by catalog lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArchiveError {
    /// Character lookup failed. Every root cause (no match, missing
    /// properties, transport failure, malformed body) collapses into this
    /// one generic kind; no technical detail reaches the user.
    #[error("Character not found")]
    NotFound,
    /// An enrichment request (planet, species, films) failed. The message
    /// propagates to the error region.
    #[error("{0}")]
    Upstream(String),
}

/// Read-only access to the character catalog
#[async_trait]
pub trait CharacterArchive: Send + Sync {
    /// Search the catalog by name and return the first matching character.
    async fn find_character_by_name(&self, name: &str) -> Result<Character, ArchiveError>;

    /// Resolve a planet from a homeworld reference URL.
    async fn fetch_homeworld(&self, homeworld_url: &str) -> Result<Planet, ArchiveError>;

    /// Reverse lookup: the first species (in catalog order) whose `people`
    /// collection contains the character URL, or `None`.
    async fn find_species_for_character(
        &self,
        character_url: &str,
    ) -> Result<Option<Species>, ArchiveError>;

    /// Reverse lookup: every film whose `characters` collection contains the
    /// character URL, in catalog order.
    async fn find_films_for_character(
        &self,
        character_url: &str,
    ) -> Result<Vec<Film>, ArchiveError>;
}
