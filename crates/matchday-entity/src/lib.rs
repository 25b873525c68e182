//! # matchday-entity
//!
//! Domain entity models for MatchDay. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`; persisted enums derive
//! `sqlx::Type`.

pub mod booking;
pub mod branch;
pub mod cafe;
pub mod game_match;
pub mod loyalty;
pub mod payment;
pub mod scan;
pub mod staff;
pub mod subscription;
