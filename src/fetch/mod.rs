//! Follower/following retrieval.
//!
//! Sources implement [`FollowSource`]. The pipeline drains each list into a
//! [`FetchOutcome`], so a failure in one category never aborts the other.

pub mod instagram;
mod outcome;
pub mod session;
mod traits;

pub use instagram::{InstagramClient, InstagramClientConfig};
pub use outcome::FetchOutcome;
pub use session::{default_session_path, Session};
pub use traits::{FollowSource, IdentifierStream, StaticSource};
