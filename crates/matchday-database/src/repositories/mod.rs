//! Store traits and their PostgreSQL repository implementations.

pub mod booking;
pub mod cafe;
pub mod game_match;
pub mod loyalty;
pub mod payment;
pub mod scan_log;
pub mod seat;
pub mod subscription;

pub use booking::{BookingCreateOutcome, BookingStore, PgBookingRepository, TransitionOutcome};
pub use cafe::{CafeStore, PgCafeRepository};
pub use game_match::{CreateMatch, MatchStore, PgMatchRepository};
pub use loyalty::{LoyaltyStore, PgLoyaltyRepository};
pub use payment::{PaymentStore, PgPaymentRepository};
pub use scan_log::{PgScanLogRepository, ScanLogStore};
pub use seat::{PgSeatRepository, SeatStore};
pub use subscription::{PgSubscriptionRepository, PgUsageRepository, SubscriptionStore, UsageStore};
