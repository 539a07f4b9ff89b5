//! Challenge query functions.
//!
//! Challenges are immutable once created; only insert and read paths exist.

use rusqlite::{Connection, OptionalExtension};

use cascade_types::{Challenge, ChallengeId, Tier, UserId};

use crate::{DbError, Result};

/// Insert a new challenge after validating the price against the tier
/// bounds. Returns the stored challenge with its assigned id.
pub fn insert(
    conn: &Connection,
    creator_id: UserId,
    tier: Tier,
    price: u64,
    created_at: u64,
) -> Result<Challenge> {
    tier.validate_price(price)
        .map_err(|e| DbError::Constraint(e.to_string()))?;

    conn.execute(
        "INSERT INTO challenges (creator_id, price_tier, price, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![creator_id, tier.as_str(), price as i64, created_at as i64],
    )?;

    Ok(Challenge {
        id: conn.last_insert_rowid(),
        creator_id,
        tier,
        price,
        created_at,
    })
}

/// Look up a challenge by id. Returns `None` if it does not exist.
pub fn get(conn: &Connection, id: ChallengeId) -> Result<Option<Challenge>> {
    let row = conn
        .query_row(
            "SELECT id, creator_id, price_tier, price, created_at
             FROM challenges WHERE id = ?1",
            [id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((id, creator_id, tier, price, created_at)) => Ok(Some(Challenge {
            id,
            creator_id,
            tier: Tier::parse(&tier)
                .ok_or_else(|| DbError::Decode(format!("unknown price tier: {tier}")))?,
            price: price as u64,
            created_at: created_at as u64,
        })),
    }
}
