//! Subscription plan and assignment entities.

pub mod model;
pub mod plan;

pub use model::{ActiveSubscription, CafeSubscription};
pub use plan::SubscriptionPlan;
