//! audiora-diagnosis
//!
//! Clinical decision logic over audiometry records. Pure functions with no
//! I/O: pure-tone averages, provisional hearing-loss diagnosis, tympanogram
//! typing, and the synchronization of derived report fields.
//!
//! Every classification is total. Missing or unparseable input degrades to
//! a sentinel ("Unable to Determine", "Al", an empty interpretation) rather
//! than an error.

pub mod classify;
pub mod curve;
pub mod pta;
pub mod sync;
pub mod tymp;
pub mod weber;

pub use classify::compute_diagnosis;
pub use pta::compute_pta;
pub use sync::{SessionEvent, apply, synchronize};
pub use tymp::classify_tymp_type;
