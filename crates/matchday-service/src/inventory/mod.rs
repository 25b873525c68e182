//! In-memory seat inventory for single-node deployments and tests.

pub mod memory;

pub use memory::MemorySeatInventory;
