//! Services that turn match commands into recorded case events.

pub mod emitter;
pub mod match_handler;

pub use emitter::OutcomeEmitter;
pub use match_handler::{HandledMatch, MatchDefendant, MatchDefendantHandler, MatchError};
