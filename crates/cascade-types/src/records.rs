//! Persistent record types.
//!
//! Challenges are immutable after creation as far as this core is concerned.
//! Participant entries and purchase records are created once and never
//! mutated; distribution entries form a permanent append-only audit trail.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;
use crate::{ChallengeId, UserId};

/// A challenge as seen by the purchase core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub creator_id: UserId,
    pub tier: Tier,
    /// Price in micro-credits; zero for free challenges.
    pub price: u64,
    /// Unix timestamp (seconds).
    pub created_at: u64,
}

/// A participant roster entry. Unique per (challenge, user).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub challenge_id: ChallengeId,
    pub user_id: UserId,
    /// 1-based join-order rank within the challenge. Assigned at commit,
    /// never reassigned or reused.
    pub position: u32,
    /// Unix timestamp (seconds).
    pub joined_at: u64,
}

/// Settlement status of a purchase record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Completed,
    Failed,
}

impl PurchaseStatus {
    /// Stable string form, used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<PurchaseStatus> {
        match s {
            "completed" => Some(PurchaseStatus::Completed),
            "failed" => Some(PurchaseStatus::Failed),
            _ => None,
        }
    }
}

/// A settled purchase of paid challenge access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub challenge_id: ChallengeId,
    pub user_id: UserId,
    /// Amount paid in micro-credits.
    pub amount: u64,
    pub status: PurchaseStatus,
    /// Unix timestamp (seconds).
    pub created_at: u64,
}

/// Kind of a distribution ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    CreatorShare,
    ParticipantShare,
    PlatformFee,
}

impl DistributionKind {
    /// Stable string form, used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::CreatorShare => "creator_share",
            DistributionKind::ParticipantShare => "participant_share",
            DistributionKind::PlatformFee => "platform_fee",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<DistributionKind> {
        match s {
            "creator_share" => Some(DistributionKind::CreatorShare),
            "participant_share" => Some(DistributionKind::ParticipantShare),
            "platform_fee" => Some(DistributionKind::PlatformFee),
            _ => None,
        }
    }
}

/// One row of the payout audit trail for a single purchase event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub challenge_id: ChallengeId,
    /// `None` for the platform fee entry.
    pub user_id: Option<UserId>,
    /// Amount in micro-credits.
    pub amount: u64,
    pub kind: DistributionKind,
    /// Unix timestamp (seconds).
    pub created_at: u64,
}
