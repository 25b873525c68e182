//! Shared value types used across the MatchDay crates.

pub mod limit;

pub use limit::{LimitCheck, PlanLimit};
