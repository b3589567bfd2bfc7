//! Lookup execution
//!
//! Drives the fetch sequence behind one submission: character first, then
//! homeworld if referenced, then species and films as independent tasks
//! joined before leaving the loading phase. Each commit carries a generation
//! token so a sequence overtaken by a newer submission (or a query clear)
//! abandons its writes instead of overwriting newer state.

use super::state::SearchState;
use crate::swapi::{ArchiveError, CharacterArchive};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Shown when a failed step carries no message of its own
pub const FALLBACK_ERROR: &str = "Character or related data not found.";

/// Orchestrator for one lookup surface
pub struct Lookup {
    archive: Arc<dyn CharacterArchive>,
    state: Mutex<SearchState>,
    generation: AtomicU64,
}

impl Lookup {
    /// Create an idle lookup over a catalog backend
    pub fn new(archive: Arc<dyn CharacterArchive>) -> Self {
        Self {
            archive,
            state: Mutex::new(SearchState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    /// Track query text edits. An empty or whitespace-only query resets the
    /// result slots and the error, and invalidates any in-flight sequence.
    pub async fn set_query(&self, query: &str) {
        let mut state = self.state.lock().await;
        state.query = query.to_string();

        if query.trim().is_empty() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.clear_results();
            state.loading = false;
        }
    }

    /// Submit a query and run the fetch sequence to completion, returning a
    /// snapshot of the resulting state. A blank submission behaves like a
    /// query clear.
    pub async fn submit(&self, query: &str) -> SearchState {
        if query.trim().is_empty() {
            self.set_query(query).await;
            return self.state().await;
        }

        // A new submission owns the state from here on; any older sequence
        // still in flight fails its token checks and stops committing. The
        // generation only moves while the state lock is held, so the bump
        // and the clear-then-load write are one atomic step.
        let token = {
            let mut state = self.state.lock().await;
            let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.query = query.to_string();
            state.clear_results();
            state.loading = true;
            token
        };

        info!("Lookup submitted for '{}'", query);
        let outcome = self.run_sequence(query, token).await;

        {
            // Token check and write happen under the same lock; a newer
            // submission bumps the generation only while holding it.
            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) == token {
                state.loading = false;
                if let Err(e) = outcome {
                    warn!("Lookup for '{}' failed: {}", query, e);
                    let message = e.to_string();
                    state.error = if message.is_empty() {
                        FALLBACK_ERROR.to_string()
                    } else {
                        message
                    };
                }
            }
        }

        self.state().await
    }

    /// The fetch sequence. Character failure aborts everything; a failure in
    /// an enrichment step surfaces while slots already committed stay filled.
    async fn run_sequence(&self, query: &str, token: u64) -> Result<(), ArchiveError> {
        let character = self.archive.find_character_by_name(query).await?;
        let character_url = character.url.clone();
        let homeworld_url = character.homeworld_ref().map(str::to_string);

        if !self.commit(token, |s| s.character = Some(character)).await {
            return Ok(());
        }

        // Skipped silently when the character carries no reference
        if let Some(url) = homeworld_url {
            let planet = self.archive.fetch_homeworld(&url).await?;
            if !self.commit(token, |s| s.homeworld = Some(planet)).await {
                return Ok(());
            }
        }

        // Species and films only depend on the character URL, not on each
        // other; run them joined, either failure surfaces.
        let (species, films) = futures::try_join!(
            self.archive.find_species_for_character(&character_url),
            self.archive.find_films_for_character(&character_url),
        )?;

        self.commit(token, |s| {
            s.species = species;
            s.films = films;
        })
        .await;

        Ok(())
    }

    /// Apply a state change unless a newer submission has taken over. The
    /// token is compared while holding the state lock, so a clear or newer
    /// submission cannot slip between the check and the write.
    async fn commit(&self, token: u64, apply: impl FnOnce(&mut SearchState)) -> bool {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != token {
            debug!("Discarding stale lookup result");
            return false;
        }
        apply(&mut state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Phase;
    use crate::swapi::{Character, Film, FilmProperties, Planet, Species};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    /// Scriptable catalog backend for orchestrator tests
    #[derive(Default)]
    struct StubArchive {
        character: Option<Character>,
        homeworld_error: Option<String>,
        species: Option<Species>,
        films: Vec<Film>,
        /// When set, the first homeworld fetch blocks until notified and
        /// then returns a marker planet; later fetches pass straight through
        homeworld_gate: Option<Arc<Notify>>,
        gate_taken: AtomicBool,
    }

    #[async_trait]
    impl CharacterArchive for StubArchive {
        async fn find_character_by_name(&self, _name: &str) -> Result<Character, ArchiveError> {
            self.character.clone().ok_or(ArchiveError::NotFound)
        }

        async fn fetch_homeworld(&self, _url: &str) -> Result<Planet, ArchiveError> {
            if let Some(gate) = &self.homeworld_gate {
                if !self.gate_taken.swap(true, Ordering::SeqCst) {
                    gate.notified().await;
                    return Ok(Planet {
                        name: "Dagobah".to_string(),
                        ..Default::default()
                    });
                }
            }
            match &self.homeworld_error {
                Some(message) => Err(ArchiveError::Upstream(message.clone())),
                None => Ok(Planet {
                    name: "Tatooine".to_string(),
                    ..Default::default()
                }),
            }
        }

        async fn find_species_for_character(
            &self,
            _url: &str,
        ) -> Result<Option<Species>, ArchiveError> {
            Ok(self.species.clone())
        }

        async fn find_films_for_character(&self, _url: &str) -> Result<Vec<Film>, ArchiveError> {
            Ok(self.films.clone())
        }
    }

    fn luke() -> Character {
        Character {
            name: "Luke Skywalker".to_string(),
            homeworld: Some("P1".to_string()),
            url: "C1".to_string(),
            ..Default::default()
        }
    }

    fn film(title: &str) -> Film {
        Film {
            uid: "1".to_string(),
            properties: FilmProperties {
                title: title.to_string(),
                characters: vec!["C1".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_successful_sequence_populates_all_slots() {
        let archive = StubArchive {
            character: Some(luke()),
            species: Some(Species {
                name: "Human".to_string(),
                ..Default::default()
            }),
            films: vec![film("A New Hope")],
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        let state = lookup.submit("Luke").await;
        assert_eq!(state.phase(), Phase::Populated);
        assert_eq!(state.character.as_ref().unwrap().name, "Luke Skywalker");
        assert_eq!(state.homeworld.as_ref().unwrap().name, "Tatooine");
        assert_eq!(state.species.as_ref().unwrap().name, "Human");
        assert_eq!(state.films.len(), 1);
    }

    #[tokio::test]
    async fn test_character_not_found_aborts_sequence() {
        let lookup = Lookup::new(Arc::new(StubArchive::default()));

        let state = lookup.submit("Nobody").await;
        assert_eq!(state.phase(), Phase::Errored);
        assert_eq!(state.error, "Character not found");
        assert!(!state.has_results());
    }

    #[tokio::test]
    async fn test_homeworld_failure_keeps_character() {
        let archive = StubArchive {
            character: Some(luke()),
            homeworld_error: Some("homeworld request failed with status 500".to_string()),
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        let state = lookup.submit("Yoda").await;
        assert_eq!(state.phase(), Phase::Errored);
        assert_eq!(state.error, "homeworld request failed with status 500");
        // Slots filled by completed steps are not rolled back
        assert!(state.character.is_some());
        assert!(state.homeworld.is_none());
        assert!(state.species.is_none());
        assert!(state.films.is_empty());
    }

    #[tokio::test]
    async fn test_empty_error_message_uses_fallback() {
        let archive = StubArchive {
            character: Some(luke()),
            homeworld_error: Some(String::new()),
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        let state = lookup.submit("Luke").await;
        assert_eq!(state.error, FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn test_character_without_homeworld_skips_planet() {
        let archive = StubArchive {
            character: Some(Character {
                homeworld: None,
                url: "C1".to_string(),
                ..luke()
            }),
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        let state = lookup.submit("Luke").await;
        assert_eq!(state.phase(), Phase::Populated);
        assert!(state.homeworld.is_none());
    }

    #[tokio::test]
    async fn test_clearing_query_resets_everything() {
        let archive = StubArchive {
            character: Some(luke()),
            films: vec![film("A New Hope")],
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        let state = lookup.submit("Luke").await;
        assert!(state.has_results());

        lookup.set_query("   ").await;
        let state = lookup.state().await;
        assert!(!state.has_results());
        assert!(state.error.is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_blank_submission_behaves_like_clear() {
        let archive = StubArchive {
            character: Some(luke()),
            ..Default::default()
        };
        let lookup = Lookup::new(Arc::new(archive));

        lookup.submit("Luke").await;
        let state = lookup.submit("  ").await;
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.has_results());
    }

    #[tokio::test]
    async fn test_stale_sequence_does_not_overwrite_newer_state() {
        let gate = Arc::new(Notify::new());
        let archive = StubArchive {
            character: Some(luke()),
            homeworld_gate: Some(gate.clone()),
            ..Default::default()
        };
        let lookup = Arc::new(Lookup::new(Arc::new(archive)));

        let inflight = {
            let lookup = lookup.clone();
            tokio::spawn(async move { lookup.submit("Luke").await })
        };

        // Let the sequence reach the gated homeworld fetch
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        // Clearing the query invalidates the in-flight sequence
        lookup.set_query("").await;
        gate.notify_one();
        inflight.await.unwrap();

        let state = lookup.state().await;
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.has_results());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_new_submission_invalidates_inflight_one() {
        let gate = Arc::new(Notify::new());
        let archive = StubArchive {
            character: Some(luke()),
            species: Some(Species {
                name: "Human".to_string(),
                ..Default::default()
            }),
            films: vec![film("A New Hope")],
            homeworld_gate: Some(gate.clone()),
            ..Default::default()
        };
        let lookup = Arc::new(Lookup::new(Arc::new(archive)));

        // First submission blocks inside its homeworld fetch
        let first = {
            let lookup = lookup.clone();
            tokio::spawn(async move { lookup.submit("Luke").await })
        };
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        // Second submission overtakes and completes; its homeworld passes
        // the gate and resolves to Tatooine
        let state = lookup.submit("Luke Skywalker").await;
        assert_eq!(state.phase(), Phase::Populated);
        assert_eq!(state.homeworld.as_ref().unwrap().name, "Tatooine");

        // Release the first sequence; its marker planet must be discarded
        gate.notify_one();
        first.await.unwrap();

        let state = lookup.state().await;
        assert_eq!(state.phase(), Phase::Populated);
        assert_eq!(state.query, "Luke Skywalker");
        assert_eq!(state.homeworld.as_ref().unwrap().name, "Tatooine");
        assert_eq!(state.species.as_ref().unwrap().name, "Human");
        assert_eq!(state.films.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_clear_never_leaves_partial_state() {
        // A clear racing a submission must never let a stale slot write
        // land after the reset: afterwards the state is either fully
        // cleared or a complete result set, never a mix.
        for _ in 0..200 {
            let archive = StubArchive {
                character: Some(luke()),
                films: vec![film("A New Hope")],
                ..Default::default()
            };
            let lookup = Arc::new(Lookup::new(Arc::new(archive)));

            let submitting = {
                let lookup = lookup.clone();
                tokio::spawn(async move { lookup.submit("Luke").await })
            };
            let clearing = {
                let lookup = lookup.clone();
                tokio::spawn(async move { lookup.set_query("").await })
            };

            submitting.await.unwrap();
            clearing.await.unwrap();

            let state = lookup.state().await;
            assert!(!state.loading);
            match state.phase() {
                Phase::Idle => assert!(
                    !state.has_results(),
                    "cleared state retained a stale slot"
                ),
                Phase::Populated => {
                    assert!(state.character.is_some());
                    assert!(state.homeworld.is_some());
                }
                other => panic!("unexpected phase {:?}", other),
            }
        }
    }
}
