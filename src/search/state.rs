//! Lookup state and its phase machine

use crate::swapi::{Character, Film, Planet, Species};
use serde::Serialize;

/// Phase of the lookup state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Populated,
    Errored,
}

/// All state behind one lookup cycle: the query text, a loading flag, an
/// error message, and the four result slots. Slots are cleared before every
/// new search and whenever the query becomes empty; exactly one of loading,
/// populated, errored, or all-empty holds at a time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub loading: bool,
    /// Empty when no error is being shown
    pub error: String,
    pub character: Option<Character>,
    pub homeworld: Option<Planet>,
    pub species: Option<Species>,
    pub films: Vec<Film>,
}

impl SearchState {
    /// Derive the current phase
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if !self.error.is_empty() {
            Phase::Errored
        } else if self.character.is_some() {
            Phase::Populated
        } else {
            Phase::Idle
        }
    }

    /// Clear the four result slots and the error message
    pub fn clear_results(&mut self) {
        self.character = None;
        self.homeworld = None;
        self.species = None;
        self.films.clear();
        self.error.clear();
    }

    /// Whether any result slot is filled
    pub fn has_results(&self) -> bool {
        self.character.is_some()
            || self.homeworld.is_some()
            || self.species.is_some()
            || !self.films.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_idle() {
        let state = SearchState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.has_results());
    }

    #[test]
    fn test_phase_precedence() {
        let mut state = SearchState {
            loading: true,
            error: "boom".to_string(),
            character: Some(Character::default()),
            ..Default::default()
        };
        // Loading wins over everything else
        assert_eq!(state.phase(), Phase::Loading);

        state.loading = false;
        assert_eq!(state.phase(), Phase::Errored);

        state.error.clear();
        assert_eq!(state.phase(), Phase::Populated);
    }

    #[test]
    fn test_clear_results() {
        let mut state = SearchState {
            character: Some(Character::default()),
            homeworld: Some(Default::default()),
            species: Some(Default::default()),
            films: vec![Default::default()],
            error: "boom".to_string(),
            ..Default::default()
        };
        state.clear_results();
        assert!(!state.has_results());
        assert!(state.error.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }
}
