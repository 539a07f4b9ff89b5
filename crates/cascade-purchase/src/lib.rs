//! # cascade-purchase
//!
//! The transactional boundary of the Cascade core. Exposes the two public
//! operations — [`coordinator::purchase`] and [`registry::join`] — each of
//! which runs as one IMMEDIATE SQLite transaction: every read it bases a
//! decision on and every write it makes commit together or not at all.
//!
//! ## Modules
//!
//! - [`registry`] — Participant roster: access gating and join-order positions
//! - [`coordinator`] — Purchase orchestration: payment record plus payout split

pub mod coordinator;
pub mod registry;

use cascade_db::DbError;
use cascade_revenue::RevenueError;
use cascade_types::ChallengeId;

/// Reason a request was rejected as invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationReason {
    /// Purchase attempted on a free-tier challenge.
    FreeTier,
    /// Creator attempted to purchase their own challenge.
    SelfPurchase,
    /// Join attempted on a paid challenge without a completed purchase.
    AccessRequired,
}

impl ValidationReason {
    /// Stable reason code surfaced to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::FreeTier => "free_tier",
            ValidationReason::SelfPurchase => "self_purchase",
            ValidationReason::AccessRequired => "access_required",
        }
    }
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a request lost a race against a concurrent writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictReason {
    /// A completed purchase already exists for the (challenge, user) pair.
    AlreadyPurchased,
    /// A roster entry already exists for the (challenge, user) pair.
    AlreadyJoined,
}

impl ConflictReason {
    /// Stable reason code surfaced to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::AlreadyPurchased => "already_purchased",
            ConflictReason::AlreadyJoined => "already_joined",
        }
    }
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for the purchase core. Any error aborts and rolls back the
/// enclosing unit of work; validation and conflict errors are expected
/// caller-facing outcomes, the rest are infrastructural.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced challenge does not exist.
    #[error("challenge {0} not found")]
    NotFound(ChallengeId),

    /// The request is disallowed by a business rule.
    #[error("validation failed: {0}")]
    Validation(ValidationReason),

    /// The request lost a race; not retried by the core.
    #[error("conflict: {0}")]
    Conflict(ConflictReason),

    /// The durable store failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] DbError),

    /// The payout computation failed.
    #[error("distribution error: {0}")]
    Distribution(#[from] RevenueError),
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
