//! # cascade-revenue
//!
//! Payout split computation for challenge purchases.
//!
//! Pure integer arithmetic over micro-credits; no I/O. Persisting the
//! resulting entries is the caller's job.
//!
//! ## Modules
//!
//! - [`split`] — The 60/15/25 split and position-weighted participant shares

pub mod split;

/// Error types for revenue computation.
#[derive(Debug, thiserror::Error)]
pub enum RevenueError {
    /// Purchase amount is zero.
    #[error("purchase amount is zero")]
    ZeroAmount,

    /// Arithmetic overflow.
    #[error("arithmetic overflow in revenue calculation")]
    Overflow,
}

/// Convenience result type for revenue operations.
pub type Result<T> = std::result::Result<T, RevenueError>;
