//! Set-difference diffing of identifier snapshots.
//!
//! # Example
//!
//! ```
//! use ig_tracker::diff::compute;
//! use ig_tracker::model::IdentifierSet;
//!
//! let old: IdentifierSet = ["a", "b"].into_iter().collect();
//! let new: IdentifierSet = ["b", "c"].into_iter().collect();
//!
//! let diff = compute(&new, &old);
//! assert_eq!(diff.added.to_sorted_vec(), vec!["c"]);
//! assert_eq!(diff.removed.to_sorted_vec(), vec!["a"]);
//! assert_eq!(diff.net(), 0);
//! ```

mod engine;
mod result;

pub use engine::{compute, compute_lists};
pub use result::DiffResult;
