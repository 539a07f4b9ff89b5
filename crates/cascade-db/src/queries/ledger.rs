//! Purchase and distribution ledger query functions.
//!
//! Both tables are append-only: no update or delete path exists. The partial
//! unique index on completed purchase records makes [`insert_purchase`] a
//! compare-and-insert — a racing writer loses at the index, not at an
//! earlier read. Earnings totals are derived by summation over the ledger,
//! never stored as mutable counters.

use rusqlite::Connection;

use cascade_types::{
    ChallengeId, DistributionEntry, DistributionKind, PurchaseRecord, PurchaseStatus, UserId,
};

use crate::{constraint, DbError, Result};

/// Record a completed purchase.
///
/// # Errors
///
/// - [`DbError::Constraint`] if a completed record already exists for the
///   (challenge, user) pair
pub fn insert_purchase(
    conn: &Connection,
    challenge_id: ChallengeId,
    user_id: UserId,
    amount: u64,
    created_at: u64,
) -> Result<PurchaseRecord> {
    conn.execute(
        "INSERT INTO purchase_records (challenge_id, user_id, amount, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            challenge_id,
            user_id,
            amount as i64,
            PurchaseStatus::Completed.as_str(),
            created_at as i64,
        ],
    )
    .map_err(|e| constraint(e, "purchase already recorded"))?;

    Ok(PurchaseRecord {
        challenge_id,
        user_id,
        amount,
        status: PurchaseStatus::Completed,
        created_at,
    })
}

/// Whether a completed purchase exists for the (challenge, user) pair.
pub fn has_completed_purchase(
    conn: &Connection,
    challenge_id: ChallengeId,
    user_id: UserId,
) -> Result<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM purchase_records
         WHERE challenge_id = ?1 AND user_id = ?2 AND status = 'completed')",
        rusqlite::params![challenge_id, user_id],
        |row| row.get(0),
    )?;
    Ok(found)
}

/// Append a set of distribution entries. Callers hold the enclosing
/// transaction; either every row becomes visible at commit or none do.
pub fn insert_distribution(conn: &Connection, entries: &[DistributionEntry]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO distribution_entries (challenge_id, user_id, amount, entry_kind, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for entry in entries {
        stmt.execute(rusqlite::params![
            entry.challenge_id,
            entry.user_id,
            entry.amount as i64,
            entry.kind.as_str(),
            entry.created_at as i64,
        ])?;
    }

    Ok(())
}

/// List distribution entries for a challenge in insertion order.
pub fn list_distribution(
    conn: &Connection,
    challenge_id: ChallengeId,
) -> Result<Vec<DistributionEntry>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, amount, entry_kind, created_at
         FROM distribution_entries
         WHERE challenge_id = ?1
         ORDER BY id ASC",
    )?;

    let raw = stmt
        .query_map([challenge_id], |row| {
            Ok((
                row.get::<_, Option<i64>>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(user_id, amount, kind, created_at)| {
            Ok(DistributionEntry {
                challenge_id,
                user_id,
                amount: amount as u64,
                kind: DistributionKind::parse(&kind)
                    .ok_or_else(|| DbError::Decode(format!("unknown entry kind: {kind}")))?,
                created_at: created_at as u64,
            })
        })
        .collect()
}

/// Gross revenue for a challenge: sum of completed purchase amounts.
pub fn challenge_revenue(conn: &Connection, challenge_id: ChallengeId) -> Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM purchase_records
         WHERE challenge_id = ?1 AND status = 'completed'",
        [challenge_id],
        |row| row.get(0),
    )?;
    Ok(total as u64)
}

/// Total earnings credited to a user across all challenges, derived from
/// the distribution ledger.
pub fn user_earnings(conn: &Connection, user_id: UserId) -> Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM distribution_entries WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(total as u64)
}

/// Total platform fees collected, derived from the distribution ledger.
pub fn platform_earnings(conn: &Connection) -> Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM distribution_entries WHERE user_id IS NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(total as u64)
}
