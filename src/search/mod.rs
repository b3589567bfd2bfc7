//! Search orchestration
//!
//! Owns the UI-facing lookup state and drives the fixed sequence of
//! dependent catalog calls behind a submission.

mod executor;
mod state;

pub use executor::{Lookup, FALLBACK_ERROR};
pub use state::{Phase, SearchState};
