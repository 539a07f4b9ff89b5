//! Challenge pricing tiers.
//!
//! Every challenge is created in one of three tiers. The tier controls both
//! the allowed price range and the access gate: free challenges can be
//! joined by anyone, paid challenges require a completed purchase (or being
//! the creator).

use serde::{Deserialize, Serialize};

use crate::MICRO_CREDITS_PER_CREDIT;

/// Minimum premium price: 0.99 credits.
pub const PREMIUM_MIN_PRICE: u64 = 990_000;

/// Maximum premium price: 2.99 credits.
pub const PREMIUM_MAX_PRICE: u64 = 2_990_000;

/// Minimum exclusive price: 5.00 credits.
pub const EXCLUSIVE_MIN_PRICE: u64 = 5 * MICRO_CREDITS_PER_CREDIT;

/// Maximum exclusive price: 9.99 credits.
pub const EXCLUSIVE_MAX_PRICE: u64 = 9_990_000;

/// Pricing tier of a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Premium,
    Exclusive,
}

/// Tier validation errors.
#[derive(Debug, thiserror::Error)]
pub enum TierError {
    /// The price falls outside the tier's allowed range.
    #[error("price {price} out of range for {tier} tier ({min}..={max} micro-credits)")]
    PriceOutOfRange {
        /// The tier being validated.
        tier: &'static str,
        /// The offending price in micro-credits.
        price: u64,
        /// Minimum allowed price.
        min: u64,
        /// Maximum allowed price.
        max: u64,
    },
}

impl Tier {
    /// Stable string form, used for storage and wire surfaces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Exclusive => "exclusive",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<Tier> {
        match s {
            "free" => Some(Tier::Free),
            "premium" => Some(Tier::Premium),
            "exclusive" => Some(Tier::Exclusive),
            _ => None,
        }
    }

    /// Inclusive price bounds for this tier in micro-credits.
    pub fn price_bounds(&self) -> (u64, u64) {
        match self {
            Tier::Free => (0, 0),
            Tier::Premium => (PREMIUM_MIN_PRICE, PREMIUM_MAX_PRICE),
            Tier::Exclusive => (EXCLUSIVE_MIN_PRICE, EXCLUSIVE_MAX_PRICE),
        }
    }

    /// Validate a price against this tier's bounds.
    ///
    /// # Errors
    ///
    /// - [`TierError::PriceOutOfRange`] if the price is outside the bounds
    pub fn validate_price(&self, price: u64) -> Result<(), TierError> {
        let (min, max) = self.price_bounds();
        if price < min || price > max {
            return Err(TierError::PriceOutOfRange {
                tier: self.as_str(),
                price,
                min,
                max,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
