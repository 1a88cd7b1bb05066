//! Defendant search escalation.
//!
//! An observed defendant is resolved against the unified search index by
//! running the ordered [`STAGES`] table: exact stages first, stopping on the
//! first hit, then every partial stage, accumulating the deduplicated union
//! of their candidates.
//!
//! ```text
//! DefendantObservation
//!        |
//!        v
//!   [query::build] --per stage--> [SearchClient::fetch] --per page--+
//!                                                                   |
//!   Outcome <-- [Resolver decision] <-- [CandidateAggregator] <------+
//! ```

pub mod aggregator;
pub mod pagination;
pub mod query;
pub mod sequencer;
pub mod stages;

pub use aggregator::CandidateAggregator;
pub use query::QueryParameters;
pub use sequencer::Resolver;
pub use stages::{Attribute, SearchStage, StageKind, STAGES};
