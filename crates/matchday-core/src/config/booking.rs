//! Booking lifecycle configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Fixed service fee added to every booking total.
    #[serde(default = "default_service_fee")]
    pub service_fee: Decimal,
    /// Length of the random portion of the human-readable booking code.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Number of random bytes in the scannable QR token (hex-encoded).
    #[serde(default = "default_qr_token_bytes")]
    pub qr_token_bytes: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            service_fee: default_service_fee(),
            code_length: default_code_length(),
            qr_token_bytes: default_qr_token_bytes(),
        }
    }
}

fn default_service_fee() -> Decimal {
    Decimal::new(250, 2)
}

fn default_code_length() -> usize {
    6
}

fn default_qr_token_bytes() -> usize {
    16
}
