//! Scheduled match entities.

pub mod model;
pub mod status;

pub use model::GameMatch;
pub use status::MatchStatus;
