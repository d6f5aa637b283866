//! Domain logic for the hours tracker.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and
//! `api` crates call into these functions to derive week records, split
//! hours across months, check invoice arithmetic, and map identity claims.

pub mod error;
pub mod identity;
pub mod invariants;
pub mod invoice;
pub mod types;
pub mod week;
