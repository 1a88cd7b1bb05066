//! Domain types for defendant identity resolution.
//!
//! Inputs (the observed defendant), the unified search wire format, candidate
//! matches, run outcomes and the events persisted to a case stream.

mod candidate;
mod events;
mod observation;
mod outcome;

pub use candidate::{Address, CandidateMatch, CaseResult, DefendantResult, SearchPage};
pub use events::{EventPage, MatchEvent, MatchedDefendant, CASE_DOMAIN};
pub use observation::{is_blank, DefendantObservation, PersonDetails};
pub use outcome::{Outcome, Resolution, RunStats};
