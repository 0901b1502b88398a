//! audiora-core
//!
//! Pure domain types and storage key conventions. No computation beyond
//! trivial accessors; this is the shared vocabulary of the Audiora system.

pub mod error;
pub mod keys;
pub mod models;
pub mod numeric;
