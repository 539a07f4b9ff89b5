//! SQL schema definitions.

/// Complete schema for Cascade v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Challenges
-- ============================================================

CREATE TABLE IF NOT EXISTS challenges (
    id INTEGER PRIMARY KEY,
    creator_id INTEGER NOT NULL,
    price_tier TEXT NOT NULL,
    price INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_challenges_creator ON challenges(creator_id);
CREATE INDEX IF NOT EXISTS idx_challenges_tier ON challenges(price_tier);

-- ============================================================
-- Participant roster
-- ============================================================

CREATE TABLE IF NOT EXISTS challenge_participants (
    challenge_id INTEGER NOT NULL REFERENCES challenges(id),
    user_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    joined_at INTEGER NOT NULL,
    PRIMARY KEY (challenge_id, user_id),
    UNIQUE (challenge_id, position)
);

-- ============================================================
-- Purchase & distribution ledger (append-only)
-- ============================================================

CREATE TABLE IF NOT EXISTS purchase_records (
    id INTEGER PRIMARY KEY,
    challenge_id INTEGER NOT NULL REFERENCES challenges(id),
    user_id INTEGER NOT NULL,
    amount INTEGER NOT NULL,
    status TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- At most one settled purchase per (challenge, user), ever.
CREATE UNIQUE INDEX IF NOT EXISTS idx_purchases_completed
    ON purchase_records(challenge_id, user_id) WHERE status = 'completed';

CREATE TABLE IF NOT EXISTS distribution_entries (
    id INTEGER PRIMARY KEY,
    challenge_id INTEGER NOT NULL REFERENCES challenges(id),
    user_id INTEGER,
    amount INTEGER NOT NULL,
    entry_kind TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_distribution_challenge ON distribution_entries(challenge_id);
CREATE INDEX IF NOT EXISTS idx_distribution_user ON distribution_entries(user_id);
"#;
