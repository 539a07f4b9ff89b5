//! Purchase orchestration.
//!
//! A purchase is one unit of work: validate, record the payment, snapshot
//! the roster, compute the split, append the payout entries, commit. If any
//! step fails the transaction is dropped without commit and SQLite rolls
//! the whole unit back — no purchase record or distribution entry survives
//! a partial failure.

use rusqlite::{Connection, TransactionBehavior};

use cascade_db::queries::{challenges, ledger, participants};
use cascade_db::DbError;
use cascade_revenue::split;
use cascade_types::{ChallengeId, DistributionEntry, PurchaseRecord, Tier, UserId};

use crate::{ConflictReason, CoreError, Result, ValidationReason};

/// Result of a successful purchase: the settled payment record and the
/// payout entries written alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub record: PurchaseRecord,
    pub entries: Vec<DistributionEntry>,
}

/// Purchase paid access to a challenge.
///
/// Runs as one IMMEDIATE transaction. The duplicate check and the insert
/// happen under the same write lock, and the partial unique index on
/// completed purchases backstops the check against a racing connection —
/// exactly one of two concurrent purchasers commits, the other gets
/// `already_purchased`. The roster snapshot is taken inside the same
/// transaction, so a join committing afterwards is never included.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the challenge does not exist
/// - [`CoreError::Validation`] (`free_tier`, `self_purchase`)
/// - [`CoreError::Conflict`] (`already_purchased`)
pub fn purchase(
    conn: &mut Connection,
    challenge_id: ChallengeId,
    buyer_id: UserId,
    now: u64,
) -> Result<PurchaseOutcome> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::from)?;

    let outcome = purchase_in_tx(&tx, challenge_id, buyer_id, now)?;

    tx.commit().map_err(DbError::from)?;

    tracing::info!(
        challenge_id,
        buyer_id,
        amount = outcome.record.amount,
        entries = outcome.entries.len(),
        "purchase completed"
    );

    Ok(outcome)
}

fn purchase_in_tx(
    conn: &Connection,
    challenge_id: ChallengeId,
    buyer_id: UserId,
    now: u64,
) -> Result<PurchaseOutcome> {
    let challenge = challenges::get(conn, challenge_id)?
        .ok_or(CoreError::NotFound(challenge_id))?;

    if challenge.tier == Tier::Free {
        return Err(CoreError::Validation(ValidationReason::FreeTier));
    }
    if buyer_id == challenge.creator_id {
        return Err(CoreError::Validation(ValidationReason::SelfPurchase));
    }
    if ledger::has_completed_purchase(conn, challenge_id, buyer_id)? {
        return Err(CoreError::Conflict(ConflictReason::AlreadyPurchased));
    }

    let record = ledger::insert_purchase(conn, challenge_id, buyer_id, challenge.price, now)
        .map_err(|e| match e {
            DbError::Constraint(_) => CoreError::Conflict(ConflictReason::AlreadyPurchased),
            other => CoreError::Persistence(other),
        })?;

    let snapshot = participants::list_ordered(conn, challenge_id)?;
    let lines = split::distribute(challenge.price, challenge.creator_id, &snapshot)?;

    let entries: Vec<DistributionEntry> = lines
        .into_iter()
        .map(|line| DistributionEntry {
            challenge_id,
            user_id: line.user_id,
            amount: line.amount,
            kind: line.kind,
            created_at: now,
        })
        .collect();

    ledger::insert_distribution(conn, &entries)?;

    Ok(PurchaseOutcome { record, entries })
}
