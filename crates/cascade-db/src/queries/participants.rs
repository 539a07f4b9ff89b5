//! Participant roster query functions.
//!
//! Positions are 1-based and strictly increasing per challenge. The insert
//! computes `MAX(position) + 1` and writes the row in a single statement,
//! so position assignment cannot interleave with another insert in the same
//! transaction scope. The (challenge, user) primary key rejects duplicates.

use rusqlite::Connection;

use cascade_types::{ChallengeId, ParticipantEntry, UserId};

use crate::{constraint, DbError, Result};

/// Insert a participant with the next position for the challenge.
///
/// # Errors
///
/// - [`DbError::Constraint`] if the user already holds an entry
pub fn insert(
    conn: &Connection,
    challenge_id: ChallengeId,
    user_id: UserId,
    joined_at: u64,
) -> Result<ParticipantEntry> {
    conn.execute(
        "INSERT INTO challenge_participants (challenge_id, user_id, position, joined_at)
         SELECT ?1, ?2, COALESCE(MAX(position), 0) + 1, ?3
         FROM challenge_participants WHERE challenge_id = ?1",
        rusqlite::params![challenge_id, user_id, joined_at as i64],
    )
    .map_err(|e| constraint(e, "participant already joined"))?;

    let position: i64 = conn.query_row(
        "SELECT position FROM challenge_participants
         WHERE challenge_id = ?1 AND user_id = ?2",
        rusqlite::params![challenge_id, user_id],
        |row| row.get(0),
    )?;

    Ok(ParticipantEntry {
        challenge_id,
        user_id,
        position: position as u32,
        joined_at,
    })
}

/// Whether the user already holds a roster entry for the challenge.
pub fn exists(conn: &Connection, challenge_id: ChallengeId, user_id: UserId) -> Result<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM challenge_participants
         WHERE challenge_id = ?1 AND user_id = ?2)",
        rusqlite::params![challenge_id, user_id],
        |row| row.get(0),
    )?;
    Ok(found)
}

/// List the roster for a challenge, ascending by position. Re-reads current
/// committed state on every call.
pub fn list_ordered(conn: &Connection, challenge_id: ChallengeId) -> Result<Vec<ParticipantEntry>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, position, joined_at
         FROM challenge_participants
         WHERE challenge_id = ?1
         ORDER BY position ASC",
    )?;

    let rows = stmt
        .query_map([challenge_id], |row| {
            Ok(ParticipantEntry {
                challenge_id,
                user_id: row.get(0)?,
                position: row.get::<_, i64>(1)? as u32,
                joined_at: row.get::<_, i64>(2)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Number of participants in a challenge.
pub fn count(conn: &Connection, challenge_id: ChallengeId) -> Result<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM challenge_participants WHERE challenge_id = ?1",
            [challenge_id],
            |row| row.get(0),
        )
        .map_err(DbError::Sqlite)?;
    Ok(count as u64)
}
