//! # FormCheck-Reference
//!
//! Access to the pre-recorded, correct-form poses each exercise is compared
//! against.
//!
//! ## Reference Data
//!
//! 1. **Records**: one [`ReferencePoseRecord`] per exercise, naming the CSV
//!    file and row that holds the canonical pose
//! 2. **Store**: keyed lookup of records by pose type and, optionally,
//!    category; the first matching record wins
//! 3. **Column Maps**: per-exercise table from joint to CSV column prefix,
//!    since each recording tool names its columns differently
//! 4. **Loader**: reads one CSV row into a [`formcheck_core::Pose`]

pub mod columns;
pub mod loader;
pub mod record;
pub mod store;

pub use columns::*;
pub use loader::*;
pub use record::*;
pub use store::*;
