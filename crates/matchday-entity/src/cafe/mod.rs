//! Cafe (tenant) entities.

pub mod model;
pub mod status;

pub use model::Cafe;
pub use status::CafeStatus;
