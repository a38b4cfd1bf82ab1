//! Instagram web API source.
//!
//! Authenticates with a saved browser session, resolves the target through
//! `web_profile_info`, and pages through `friendships/{id}/followers` and
//! `friendships/{id}/following` lazily. Pages are not retried; a failed page
//! fails the whole category.

mod client;
pub mod response;

pub use client::{InstagramClient, InstagramClientConfig};
