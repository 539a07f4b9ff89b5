//! Integration test: end-to-end purchase and payout flow.
//!
//! Exercises the complete challenge economy pipeline:
//! 1. Create challenges across all three tiers
//! 2. Join participants through the gated registry
//! 3. Purchase access and verify the payout split line by line
//! 4. Verify the append-only ledger and the derived earnings totals
//! 5. Verify validation and conflict outcomes for disallowed requests
//!
//! This test uses the library crates (cascade-db, cascade-revenue,
//! cascade-purchase) against an in-memory database, single-threaded.
//! Concurrency properties live in `concurrency.rs`.

use rusqlite::Connection;

use cascade_db::queries::{challenges, ledger};
use cascade_purchase::coordinator::{self, PurchaseOutcome};
use cascade_purchase::registry;
use cascade_purchase::{ConflictReason, CoreError, ValidationReason};
use cascade_types::{ChallengeId, DistributionKind, Tier, UserId};

/// Base timestamp for test scenarios.
const BASE_TIME: u64 = 1_700_000_000;

fn setup() -> Connection {
    cascade_db::open_memory().expect("open DB")
}

fn make_challenge(conn: &Connection, creator: UserId, tier: Tier, price: u64) -> ChallengeId {
    challenges::insert(conn, creator, tier, price, BASE_TIME)
        .expect("challenge insertion should succeed")
        .id
}

fn entries_of_kind(outcome: &PurchaseOutcome, kind: DistributionKind) -> Vec<(Option<UserId>, u64)> {
    outcome
        .entries
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| (e.user_id, e.amount))
        .collect()
}

#[test]
fn purchase_lifecycle_with_position_weighted_payout() {
    // =========================================================
    // Setup: premium challenge at 1.00 credit, creator U1;
    // U2, U3, U4 join in that order (positions 1, 2, 3).
    // =========================================================
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Premium, 1_000_000);

    for (i, user) in [2, 3, 4].iter().enumerate() {
        let err = registry::join(&mut conn, challenge_id, *user, false, BASE_TIME + 1 + i as u64)
            .expect_err("paid tier is gated");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationReason::AccessRequired)
        ));

        // Each participant buys access first, then joins.
        coordinator::purchase(&mut conn, challenge_id, *user, BASE_TIME + 10 + i as u64)
            .expect("participant purchase should succeed");
        registry::join(&mut conn, challenge_id, *user, true, BASE_TIME + 20 + i as u64)
            .expect("join after purchase should succeed");
    }

    let roster = registry::list_ordered(&conn, challenge_id).expect("roster");
    let positions: Vec<_> = roster.iter().map(|p| (p.user_id, p.position)).collect();
    assert_eq!(positions, vec![(2, 1), (3, 2), (4, 3)]);

    // =========================================================
    // U5 purchases: 60% creator, 15% platform, weighted pool
    // =========================================================
    let outcome =
        coordinator::purchase(&mut conn, challenge_id, 5, BASE_TIME + 100).expect("purchase");
    assert_eq!(outcome.record.amount, 1_000_000);

    assert_eq!(
        entries_of_kind(&outcome, DistributionKind::CreatorShare),
        vec![(Some(1), 600_000)]
    );
    assert_eq!(
        entries_of_kind(&outcome, DistributionKind::PlatformFee),
        vec![(None, 150_000)]
    );
    // pool = 250_000, base = 83_333, multipliers 1.5 / 1.4 / 1.3.
    // The weighted sum (349_997) deliberately exceeds the pool.
    assert_eq!(
        entries_of_kind(&outcome, DistributionKind::ParticipantShare),
        vec![(Some(2), 124_999), (Some(3), 116_666), (Some(4), 108_332)]
    );

    // =========================================================
    // Ledger and derived totals
    // =========================================================
    // Four purchases total (U2, U3, U4 bought before joining, then U5).
    assert_eq!(
        ledger::challenge_revenue(&conn, challenge_id).expect("revenue"),
        4_000_000
    );

    // U2 bought at an empty roster, so U1 earned 60% four times.
    assert_eq!(ledger::user_earnings(&conn, 1).expect("creator earnings"), 2_400_000);
    assert_eq!(ledger::platform_earnings(&conn).expect("platform fees"), 600_000);

    // U2 holds position 1 in every later snapshot: 1.5x of a 1-share pool
    // (250_000 base) for U3's purchase, 1.5x of a 2-share pool (125_000
    // base) for U4's, 1.5x of a 3-share pool (83_333 base) for U5's.
    assert_eq!(
        ledger::user_earnings(&conn, 2).expect("U2 earnings"),
        375_000 + 187_500 + 124_999
    );

    // U5 can now join; the next position is 4, never a reused one.
    let entry = registry::join(&mut conn, challenge_id, 5, true, BASE_TIME + 200).expect("join");
    assert_eq!(entry.position, 4);
}

#[test]
fn creator_cannot_purchase_own_challenge() {
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Premium, 1_990_000);

    let err = coordinator::purchase(&mut conn, challenge_id, 1, BASE_TIME).expect_err("self");
    assert!(matches!(
        err,
        CoreError::Validation(ValidationReason::SelfPurchase)
    ));
    assert!(!ledger::has_completed_purchase(&conn, challenge_id, 1).expect("check"));
}

#[test]
fn free_tier_join_bypasses_gate() {
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Free, 0);

    let entry = registry::join(&mut conn, challenge_id, 2, false, BASE_TIME).expect("join");
    assert_eq!(entry.position, 1);
}

#[test]
fn free_tier_cannot_be_purchased() {
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Free, 0);

    let err = coordinator::purchase(&mut conn, challenge_id, 2, BASE_TIME).expect_err("free");
    assert!(matches!(
        err,
        CoreError::Validation(ValidationReason::FreeTier)
    ));
}

#[test]
fn paid_join_gate_matrix() {
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Exclusive, 5_000_000);

    // No access, not creator: rejected.
    assert!(matches!(
        registry::join(&mut conn, challenge_id, 2, false, BASE_TIME).expect_err("gated"),
        CoreError::Validation(ValidationReason::AccessRequired)
    ));

    // Claimed access without a ledger purchase: still rejected.
    assert!(matches!(
        registry::join(&mut conn, challenge_id, 2, true, BASE_TIME).expect_err("gated"),
        CoreError::Validation(ValidationReason::AccessRequired)
    ));

    // Creator: allowed regardless of the flag.
    registry::join(&mut conn, challenge_id, 1, false, BASE_TIME).expect("creator joins");

    // Purchaser: allowed.
    coordinator::purchase(&mut conn, challenge_id, 2, BASE_TIME + 1).expect("purchase");
    registry::join(&mut conn, challenge_id, 2, true, BASE_TIME + 2).expect("join");

    // Duplicate: conflict.
    assert!(matches!(
        registry::join(&mut conn, challenge_id, 2, true, BASE_TIME + 3).expect_err("dup"),
        CoreError::Conflict(ConflictReason::AlreadyJoined)
    ));
}

#[test]
fn repeat_purchase_is_a_conflict_and_writes_nothing() {
    let mut conn = setup();
    let challenge_id = make_challenge(&conn, 1, Tier::Premium, 990_000);

    coordinator::purchase(&mut conn, challenge_id, 2, BASE_TIME).expect("first");
    let err = coordinator::purchase(&mut conn, challenge_id, 2, BASE_TIME + 1).expect_err("second");
    assert!(matches!(
        err,
        CoreError::Conflict(ConflictReason::AlreadyPurchased)
    ));

    assert_eq!(
        ledger::challenge_revenue(&conn, challenge_id).expect("revenue"),
        990_000
    );
    // Exactly one entry set: one creator share, one platform fee.
    let entries = ledger::list_distribution(&conn, challenge_id).expect("list");
    assert_eq!(entries.len(), 2);
}

#[test]
fn earnings_accumulate_across_challenges() {
    let mut conn = setup();
    let challenge_a = make_challenge(&conn, 1, Tier::Premium, 1_000_000);
    let challenge_b = make_challenge(&conn, 1, Tier::Exclusive, 8_000_000);

    coordinator::purchase(&mut conn, challenge_a, 2, BASE_TIME).expect("buy a");
    coordinator::purchase(&mut conn, challenge_b, 2, BASE_TIME + 1).expect("buy b");

    // Creator earns 60% of each purchase; the same buyer may purchase
    // any number of distinct challenges.
    assert_eq!(
        ledger::user_earnings(&conn, 1).expect("creator earnings"),
        600_000 + 4_800_000
    );
    assert_eq!(
        ledger::platform_earnings(&conn).expect("platform fees"),
        150_000 + 1_200_000
    );
}

#[test]
fn distribution_failure_voids_the_purchase() {
    let mut conn = setup();
    // Bypass tier validation to force a zero-price paid challenge; the
    // payout computation rejects a zero amount after the purchase insert.
    conn.execute(
        "INSERT INTO challenges (id, creator_id, price_tier, price, created_at)
         VALUES (7, 1, 'premium', 0, ?1)",
        [BASE_TIME as i64],
    )
    .expect("raw insert");

    let err = coordinator::purchase(&mut conn, 7, 2, BASE_TIME + 1).expect_err("fails");
    assert!(matches!(err, CoreError::Distribution(_)));

    // Full rollback: no purchase record, no distribution entries.
    assert!(!ledger::has_completed_purchase(&conn, 7, 2).expect("check"));
    assert!(ledger::list_distribution(&conn, 7).expect("list").is_empty());
    assert_eq!(ledger::challenge_revenue(&conn, 7).expect("revenue"), 0);
}
