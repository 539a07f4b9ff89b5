//! # cascade-types
//!
//! Shared domain types for the Cascade purchase and revenue core.
//!
//! ## Modules
//!
//! - [`tier`] — Challenge pricing tiers and price bounds
//! - [`records`] — Persistent record types (challenges, participants, ledger)

pub mod records;
pub mod tier;

pub use records::{
    Challenge, DistributionEntry, DistributionKind, ParticipantEntry, PurchaseRecord,
    PurchaseStatus,
};
pub use tier::Tier;

/// Challenge identifier (database rowid).
pub type ChallengeId = i64;

/// User identifier, assigned by the (out-of-scope) identity layer.
pub type UserId = i64;

/// Micro-credits per credit. All monetary amounts are held as integer
/// micro-credits; fractional currency never appears in the core.
pub const MICRO_CREDITS_PER_CREDIT: u64 = 1_000_000;
