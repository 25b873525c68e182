//! PostgreSQL-backed seat inventory.

pub mod postgres;

pub use postgres::PgSeatInventory;
