//! Revenue split for a single purchase event.
//!
//! Proceeds are divided among three parties:
//!
//! - **Creator**: 60%
//! - **Participant pool**: 25%, divided among prior participants
//! - **Platform**: 15%
//!
//! The pool is divided equally into base shares, then each share is scaled
//! by a join-order multiplier: position 1 gets 1.5×, decaying by 0.1 per
//! position down to a floor of 0.5× (position 11 onward). Multipliers are
//! held in hundredths so the whole computation stays in integers.
//!
//! Two properties of this formula are deliberate and load-bearing:
//!
//! - With no participants the pool is simply omitted — no entry is written
//!   for it and neither creator nor platform absorbs it.
//! - Participant shares are **not** renormalized to the pool. The weighted
//!   sum can exceed 25% of the purchase (three participants together draw
//!   ≈35%) or fall short of it (eleven or more, all at the 0.5× floor).
//!   Accounting treats the drift as funded from gross revenue.

use serde::{Deserialize, Serialize};

use cascade_types::{DistributionKind, ParticipantEntry, UserId};

use crate::{Result, RevenueError};

/// Creator share of the purchase amount, percent.
pub const CREATOR_SHARE_PCT: u64 = 60;

/// Platform fee, percent.
pub const PLATFORM_FEE_PCT: u64 = 15;

/// Participant pool, percent.
pub const PARTICIPANT_POOL_PCT: u64 = 25;

/// Multiplier for the first participant, in hundredths (1.5×).
pub const FIRST_MULTIPLIER_X100: u64 = 150;

/// Multiplier decay per position, in hundredths (0.1 per position).
pub const MULTIPLIER_DECAY_X100: u64 = 10;

/// Multiplier floor, in hundredths (0.5×).
pub const MIN_MULTIPLIER_X100: u64 = 50;

/// One computed payout line. The coordinator stamps these into
/// distribution entries with the challenge id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLine {
    pub kind: DistributionKind,
    /// `None` for the platform fee.
    pub user_id: Option<UserId>,
    /// Amount in micro-credits.
    pub amount: u64,
}

/// Join-order multiplier for a 1-based position, in hundredths.
pub fn position_multiplier_x100(position: u32) -> u64 {
    let decay = MULTIPLIER_DECAY_X100 * u64::from(position.saturating_sub(1));
    FIRST_MULTIPLIER_X100
        .saturating_sub(decay)
        .max(MIN_MULTIPLIER_X100)
}

/// Compute the payout split for one purchase.
///
/// `participants` is the ordered roster snapshot at purchase time. The
/// output lines are ordered creator share, participant shares in position
/// order, platform fee.
///
/// # Errors
///
/// - [`RevenueError::ZeroAmount`] if the amount is zero
/// - [`RevenueError::Overflow`] on arithmetic overflow
pub fn distribute(
    amount: u64,
    creator_id: UserId,
    participants: &[ParticipantEntry],
) -> Result<Vec<ShareLine>> {
    if amount == 0 {
        return Err(RevenueError::ZeroAmount);
    }

    let creator_share = amount
        .checked_mul(CREATOR_SHARE_PCT)
        .ok_or(RevenueError::Overflow)?
        / 100;
    let platform_fee = amount
        .checked_mul(PLATFORM_FEE_PCT)
        .ok_or(RevenueError::Overflow)?
        / 100;
    let pool = amount
        .checked_mul(PARTICIPANT_POOL_PCT)
        .ok_or(RevenueError::Overflow)?
        / 100;

    let mut lines = Vec::with_capacity(participants.len() + 2);
    lines.push(ShareLine {
        kind: DistributionKind::CreatorShare,
        user_id: Some(creator_id),
        amount: creator_share,
    });

    if !participants.is_empty() {
        let base_share = pool / participants.len() as u64;
        for participant in participants {
            let multiplier = position_multiplier_x100(participant.position);
            let share = base_share
                .checked_mul(multiplier)
                .ok_or(RevenueError::Overflow)?
                / 100;
            lines.push(ShareLine {
                kind: DistributionKind::ParticipantShare,
                user_id: Some(participant.user_id),
                amount: share,
            });
        }
    }

    lines.push(ShareLine {
        kind: DistributionKind::PlatformFee,
        user_id: None,
        amount: platform_fee,
    });

    tracing::debug!(
        amount,
        creator_share,
        platform_fee,
        pool,
        participants = participants.len(),
        "revenue split computed"
    );

    Ok(lines)
}
