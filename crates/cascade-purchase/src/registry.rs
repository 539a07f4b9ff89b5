//! Participant registry: access gating and join-order position assignment.
//!
//! A user may hold a roster entry only if the challenge is free, or they
//! have a completed purchase, or they are the creator. The caller passes a
//! precomputed `has_access` flag, but the gate is re-checked against the
//! ledger inside the same transaction — the flag alone never grants access.

use rusqlite::{Connection, TransactionBehavior};

use cascade_db::queries::{challenges, ledger, participants};
use cascade_db::DbError;
use cascade_types::{ChallengeId, ParticipantEntry, Tier, UserId};

use crate::{ConflictReason, CoreError, Result, ValidationReason};

/// Join a challenge, assigning the next position.
///
/// Runs as one IMMEDIATE transaction: the gate check, duplicate check, and
/// position assignment cannot interleave with another writer.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the challenge does not exist
/// - [`CoreError::Validation`] (`access_required`) if the gate fails
/// - [`CoreError::Conflict`] (`already_joined`) on a duplicate entry
pub fn join(
    conn: &mut Connection,
    challenge_id: ChallengeId,
    user_id: UserId,
    has_access: bool,
    joined_at: u64,
) -> Result<ParticipantEntry> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::from)?;

    let entry = join_in_tx(&tx, challenge_id, user_id, has_access, joined_at)?;

    tx.commit().map_err(DbError::from)?;

    tracing::info!(
        challenge_id,
        user_id,
        position = entry.position,
        "participant joined"
    );

    Ok(entry)
}

fn join_in_tx(
    conn: &Connection,
    challenge_id: ChallengeId,
    user_id: UserId,
    has_access: bool,
    joined_at: u64,
) -> Result<ParticipantEntry> {
    let challenge = challenges::get(conn, challenge_id)?
        .ok_or(CoreError::NotFound(challenge_id))?;

    let gated = challenge.tier != Tier::Free && user_id != challenge.creator_id;
    if gated {
        if !has_access {
            return Err(CoreError::Validation(ValidationReason::AccessRequired));
        }
        // Never trust the caller's flag on its own.
        if !ledger::has_completed_purchase(conn, challenge_id, user_id)? {
            return Err(CoreError::Validation(ValidationReason::AccessRequired));
        }
    }

    if participants::exists(conn, challenge_id, user_id)? {
        return Err(CoreError::Conflict(ConflictReason::AlreadyJoined));
    }

    // The primary key backstops the check above against a racing writer.
    participants::insert(conn, challenge_id, user_id, joined_at).map_err(|e| match e {
        DbError::Constraint(_) => CoreError::Conflict(ConflictReason::AlreadyJoined),
        other => CoreError::Persistence(other),
    })
}

/// Ordered roster snapshot for a challenge, ascending by position.
/// Re-reads committed state; never served from a cache.
pub fn list_ordered(conn: &Connection, challenge_id: ChallengeId) -> Result<Vec<ParticipantEntry>> {
    Ok(participants::list_ordered(conn, challenge_id)?)
}
