//! Follow-list source trait.
//!
//! The pipeline only talks to a [`FollowSource`]; the Instagram client and
//! the in-memory [`StaticSource`] both implement it.

use crate::error::{FetchErrorKind, Result, TrackerError};
use crate::model::{Category, Identifier, Profile};
use std::collections::HashMap;

/// Lazy sequence of identifiers produced by a source.
///
/// An `Err` item ends the useful part of the sequence.
pub type IdentifierStream<'a> = Box<dyn Iterator<Item = Result<Identifier>> + 'a>;

/// Trait for follower/following data sources.
///
/// # Example
///
/// ```ignore
/// let mut source = InstagramClient::new(client_config)?;
/// source.authenticate("my_account")?;
/// let profile = source.lookup_profile("target")?;
/// for id in source.followers(&profile) {
///     println!("{}", id?);
/// }
/// ```
pub trait FollowSource {
    /// Name of this source (e.g., "instagram").
    fn name(&self) -> &'static str;

    /// Establish an authenticated session for `account`.
    fn authenticate(&mut self, account: &str) -> Result<()>;

    /// Resolve a public handle to a profile.
    fn lookup_profile(&self, username: &str) -> Result<Profile>;

    /// Stream one follow list of `profile`.
    fn list<'a>(&'a self, profile: &'a Profile, category: Category) -> IdentifierStream<'a>;

    /// Accounts following `profile`.
    fn followers<'a>(&'a self, profile: &'a Profile) -> IdentifierStream<'a> {
        self.list(profile, Category::Followers)
    }

    /// Accounts `profile` follows.
    fn following<'a>(&'a self, profile: &'a Profile) -> IdentifierStream<'a> {
        self.list(profile, Category::Following)
    }
}

/// What a [`StaticSource`] yields for one category.
#[derive(Debug, Clone)]
enum StaticList {
    Items(Vec<String>),
    /// Yield `items`, then fail with `reason`.
    FailAfter { items: Vec<String>, reason: String },
}

/// An in-memory source with fixed lists.
///
/// Useful for offline runs and tests. Authentication always succeeds and
/// every username resolves to the configured profile.
#[derive(Debug, Clone)]
pub struct StaticSource {
    profile: Profile,
    lists: HashMap<Category, StaticList>,
    missing_profile: bool,
}

impl StaticSource {
    /// Create a source that resolves to `profile` and has empty lists.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            lists: HashMap::new(),
            missing_profile: false,
        }
    }

    /// Set the list returned for `category`.
    #[must_use]
    pub fn with_list<I, S>(mut self, category: Category, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.lists.insert(category, StaticList::Items(items));
        self
    }

    /// Make `category` fail immediately.
    #[must_use]
    pub fn failing(self, category: Category, reason: impl Into<String>) -> Self {
        self.failing_after(category, Vec::<String>::new(), reason)
    }

    /// Make `category` yield `items` and then fail.
    #[must_use]
    pub fn failing_after<I, S>(
        mut self,
        category: Category,
        items: I,
        reason: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.lists.insert(
            category,
            StaticList::FailAfter {
                items,
                reason: reason.into(),
            },
        );
        self
    }

    /// Make every profile lookup fail.
    #[must_use]
    pub const fn without_profile(mut self) -> Self {
        self.missing_profile = true;
        self
    }
}

impl FollowSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn authenticate(&mut self, _account: &str) -> Result<()> {
        Ok(())
    }

    fn lookup_profile(&self, username: &str) -> Result<Profile> {
        if self.missing_profile {
            return Err(TrackerError::profile_lookup(username, "profile does not exist"));
        }
        Ok(self.profile.clone())
    }

    fn list<'a>(&'a self, _profile: &'a Profile, category: Category) -> IdentifierStream<'a> {
        match self.lists.get(&category) {
            None => Box::new(std::iter::empty()),
            Some(StaticList::Items(items)) => {
                Box::new(items.iter().map(|s| Ok(Identifier::new(s.as_str()))))
            }
            Some(StaticList::FailAfter { items, reason }) => Box::new(
                items
                    .iter()
                    .map(|s| Ok(Identifier::new(s.as_str())))
                    .chain(std::iter::once_with(move || {
                        Err(TrackerError::fetch(
                            category,
                            "static source",
                            FetchErrorKind::ApiError(reason.clone()),
                        ))
                    })),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "1".to_string(),
            username: "target".to_string(),
            full_name: None,
            follower_count: None,
            following_count: None,
            is_private: false,
        }
    }

    #[test]
    fn test_static_source_lists() {
        let source = StaticSource::new(profile()).with_list(Category::Followers, ["a", "b"]);
        let p = source.lookup_profile("target").unwrap();

        let followers: Vec<_> = source.followers(&p).map(|r| r.unwrap().to_string()).collect();
        assert_eq!(followers, vec!["a", "b"]);
        assert_eq!(source.following(&p).count(), 0);
    }

    #[test]
    fn test_static_source_fails_after_items() {
        let source =
            StaticSource::new(profile()).failing_after(Category::Following, ["a"], "rate limited");
        let p = profile();

        let items: Vec<_> = source.following(&p).collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(TrackerError::Fetch {
                category: Category::Following,
                ..
            })
        ));
    }

    #[test]
    fn test_static_source_missing_profile() {
        let source = StaticSource::new(profile()).without_profile();
        let err = source.lookup_profile("ghost").unwrap_err();
        assert!(err.is_fatal_precondition());
    }
}
