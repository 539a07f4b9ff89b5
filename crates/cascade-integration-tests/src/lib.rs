//! Integration test crate for the Cascade purchase core.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end purchase and join flows across the workspace
//! crates, including the concurrency properties against a shared
//! file-backed database.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p cascade-integration-tests
//! ```
