//! Check-in scan log entities.

pub mod model;

pub use model::{CreateScanLog, ScanLog, ScanOutcome};
