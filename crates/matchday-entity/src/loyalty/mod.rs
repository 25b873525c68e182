//! Loyalty card, tier, and transaction entities.

pub mod card;
pub mod tier;
pub mod transaction;

pub use card::LoyaltyCard;
pub use tier::LoyaltyTier;
pub use transaction::{CreateLoyaltyTransaction, LoyaltyTransaction, LoyaltyTransactionKind};
