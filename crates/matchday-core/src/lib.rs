//! # matchday-core
//!
//! Core crate for the MatchDay booking platform. Contains traits,
//! configuration schemas, domain events, plan-limit types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other MatchDay crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
