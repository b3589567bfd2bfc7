//! Catalog record definitions
//!
//! Transient, read-only projections of swapi.tech responses. The upstream
//! serves nearly everything as strings; missing fields default to empty so a
//! partial properties group still deserializes.

use serde::{Deserialize, Serialize};

/// The searched-for entity; aggregation key for all related lookups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    /// Lives beside the properties group on the wire; merged in by the
    /// client with a literal fallback when absent.
    pub description: String,
    pub gender: String,
    pub height: String,
    pub mass: String,
    pub eye_color: String,
    pub skin_color: String,
    pub hair_color: String,
    pub birth_year: String,
    /// Reference URL of the character's origin planet, when known
    pub homeworld: Option<String>,
    /// Canonical identifier, cross-referenced by species and film records
    pub url: String,
}

impl Character {
    /// Homeworld reference, treating an empty string like an absent one
    pub fn homeworld_ref(&self) -> Option<&str> {
        self.homeworld.as_deref().filter(|h| !h.is_empty())
    }
}

/// A character's origin planet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub population: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub orbital_period: String,
    pub rotation_period: String,
}

/// A species record, matched by reverse lookup through `people`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Species {
    pub name: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub classification: String,
    pub designation: String,
    pub language: String,
    pub skin_colors: String,
    pub hair_colors: String,
    pub eye_colors: String,
    /// Character URLs belonging to this species
    pub people: Vec<String>,
}

/// Catalog listing entry for a species; the detail record is a separate fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesSummary {
    pub uid: String,
    pub name: String,
    pub url: String,
}

/// A film record as listed in the film catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    pub uid: String,
    pub description: String,
    pub properties: FilmProperties,
}

/// The properties group of a film record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmProperties {
    pub title: String,
    pub episode_id: u32,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub opening_crawl: String,
    /// Character URLs appearing in this film
    pub characters: Vec<String>,
}
