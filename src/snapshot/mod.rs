//! Persistent follower/following snapshots.
//!
//! Each category is stored as a pretty-printed, sorted JSON array of handles
//! under the data directory:
//!
//! ```text
//! <data_dir>/
//!   followers.json
//!   following.json
//!   history/
//!     2024-05-01_12-00-00_<target>.md
//! ```

mod atomic;
mod store;

pub use atomic::atomic_write;
pub use store::{MalformedSnapshotPolicy, SnapshotStore, HISTORY_DIR_NAME};
