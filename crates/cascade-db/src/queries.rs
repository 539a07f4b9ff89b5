//! Database query functions organized by domain.

pub mod challenges;
pub mod ledger;
pub mod participants;
