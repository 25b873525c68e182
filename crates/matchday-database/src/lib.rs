//! # matchday-database
//!
//! PostgreSQL pool construction, the store traits the service layer
//! depends on, and their concrete PostgreSQL implementations.
//!
//! Store traits live next to their implementations so the service layer
//! can be exercised against in-memory doubles in tests.

pub mod connection;
pub mod inventory;
pub mod repositories;

pub use connection::connect;
