//! swapi.tech catalog client
//!
//! Request building and response reshaping for the four catalog lookups.
//! Response parsing lives in free functions so the wire handling can be
//! tested without a live server.

use super::types::{Character, Film, Planet, Species, SpeciesSummary};
use super::{ArchiveError, CharacterArchive};
use crate::network::{ApiResponse, HttpClient};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Literal used when a character record carries no description
const NO_DESCRIPTION: &str = "No description available";

/// Envelope of the character search endpoint: `{ "result": [ ... ] }`
#[derive(Debug, Deserialize)]
struct CharacterSearchEnvelope {
    #[serde(default)]
    result: Vec<CharacterRecord>,
}

#[derive(Debug, Deserialize)]
struct CharacterRecord {
    properties: Option<Character>,
    description: Option<String>,
}

/// Envelope of single-record endpoints: `{ "result": { "properties": ... } }`
#[derive(Debug, Deserialize)]
struct DetailEnvelope<T> {
    result: Option<DetailRecord<T>>,
}

#[derive(Debug, Deserialize)]
struct DetailRecord<T> {
    properties: Option<T>,
}

/// Envelope of the species catalog listing: `{ "results": [ ... ] }`
#[derive(Debug, Deserialize)]
struct SpeciesListEnvelope {
    #[serde(default)]
    results: Vec<SpeciesSummary>,
}

/// Envelope of the film catalog: `{ "result": [ ... ] }`
#[derive(Debug, Deserialize)]
struct FilmCatalogEnvelope {
    #[serde(default)]
    result: Vec<Film>,
}

/// Catalog client over the swapi.tech REST API
#[derive(Clone)]
pub struct SwapiClient {
    client: HttpClient,
    base_url: String,
}

impl SwapiClient {
    /// Create a client against a catalog base URL (no trailing slash needed)
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Raw pass-through of the character search, for the `/api/characters`
    /// proxy endpoint.
    pub async fn search_characters(&self, name: &str) -> Result<serde_json::Value, ArchiveError> {
        let mut params = HashMap::new();
        params.insert("name".to_string(), name.to_string());

        let response = self
            .client
            .get_with_params(&self.endpoint("people/"), params)
            .await
            .map_err(upstream)?;
        if !response.is_success() {
            return Err(ArchiveError::Upstream(format!(
                "character search failed with status {}",
                response.status
            )));
        }
        response.json().map_err(upstream)
    }
}

#[async_trait]
impl CharacterArchive for SwapiClient {
    async fn find_character_by_name(&self, name: &str) -> Result<Character, ArchiveError> {
        let mut params = HashMap::new();
        params.insert("name".to_string(), name.to_string());

        debug!("Searching catalog for character '{}'", name);

        // Every failure mode collapses into NotFound; only the generic
        // message reaches the user.
        let response = self
            .client
            .get_with_params(&self.endpoint("people/"), params)
            .await
            .map_err(|e| {
                warn!("Character search request failed: {}", e);
                ArchiveError::NotFound
            })?;

        parse_character_search(&response)
    }

    async fn fetch_homeworld(&self, homeworld_url: &str) -> Result<Planet, ArchiveError> {
        debug!("Fetching homeworld {}", homeworld_url);

        let response = self.client.get(homeworld_url).await.map_err(upstream)?;
        if !response.is_success() {
            return Err(ArchiveError::Upstream(format!(
                "homeworld request failed with status {}",
                response.status
            )));
        }

        parse_planet(&response)
    }

    async fn find_species_for_character(
        &self,
        character_url: &str,
    ) -> Result<Option<Species>, ArchiveError> {
        let response = self
            .client
            .get(&self.endpoint("species"))
            .await
            .map_err(upstream)?;
        if !response.is_success() {
            return Err(ArchiveError::Upstream(format!(
                "species catalog request failed with status {}",
                response.status
            )));
        }

        let catalog: SpeciesListEnvelope = response.json().map_err(upstream)?;

        // One dependent detail request per catalog entry, in catalog order,
        // short-circuiting on the first match. O(N) requests worst case.
        for entry in catalog.results {
            debug!("Checking species '{}'", entry.name);

            let detail = self.client.get(&entry.url).await.map_err(upstream)?;
            if !detail.is_success() {
                return Err(ArchiveError::Upstream(format!(
                    "species detail request failed with status {}",
                    detail.status
                )));
            }

            let envelope: DetailEnvelope<Species> = detail.json().map_err(upstream)?;
            let Some(species) = envelope.result.and_then(|r| r.properties) else {
                continue;
            };

            if species.people.iter().any(|p| p == character_url) {
                info!("Species match found: {}", species.name);
                return Ok(Some(species));
            }
        }

        Ok(None)
    }

    async fn find_films_for_character(
        &self,
        character_url: &str,
    ) -> Result<Vec<Film>, ArchiveError> {
        let response = self
            .client
            .get(&self.endpoint("films"))
            .await
            .map_err(upstream)?;
        if !response.is_success() {
            return Err(ArchiveError::Upstream(format!(
                "film catalog request failed with status {}",
                response.status
            )));
        }

        parse_film_catalog(&response, character_url)
    }
}

fn upstream(e: anyhow::Error) -> ArchiveError {
    ArchiveError::Upstream(e.to_string())
}

/// First entry of the search result, properties merged with description
fn parse_character_search(response: &ApiResponse) -> Result<Character, ArchiveError> {
    if !response.is_success() {
        return Err(ArchiveError::NotFound);
    }

    let envelope: CharacterSearchEnvelope = response.json().map_err(|_| ArchiveError::NotFound)?;
    let record = envelope
        .result
        .into_iter()
        .next()
        .ok_or(ArchiveError::NotFound)?;

    let mut character = record.properties.ok_or(ArchiveError::NotFound)?;
    character.description = record
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    Ok(character)
}

/// The planet properties group, or an empty record when the shape is
/// missing. Optional enrichment data soft-fails rather than erroring.
fn parse_planet(response: &ApiResponse) -> Result<Planet, ArchiveError> {
    let envelope: DetailEnvelope<Planet> = response.json().map_err(upstream)?;
    Ok(envelope
        .result
        .and_then(|r| r.properties)
        .unwrap_or_default())
}

/// Films whose characters collection contains the URL, in catalog order
fn parse_film_catalog(
    response: &ApiResponse,
    character_url: &str,
) -> Result<Vec<Film>, ArchiveError> {
    let envelope: FilmCatalogEnvelope = response.json().map_err(upstream)?;
    Ok(envelope
        .result
        .into_iter()
        .filter(|film| film.properties.characters.iter().any(|c| c == character_url))
        .collect())
}
