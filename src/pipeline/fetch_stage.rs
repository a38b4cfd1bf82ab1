//! Fetch stage: session, profile, and both follow lists.

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::fetch::{FetchOutcome, FollowSource};
use crate::model::{Category, IdentifierSet, Profile};

/// Current list of one category after merging its fetch outcome.
#[derive(Debug, Clone)]
pub struct FetchedCategory {
    pub category: Category,
    /// Fetched identifiers, or an empty set if the fetch failed
    pub current: IdentifierSet,
    /// Failure reason, if the fetch failed
    pub failure: Option<String>,
}

impl FetchedCategory {
    fn from_outcome(category: Category, outcome: FetchOutcome) -> Self {
        let failure = outcome.reason().map(str::to_string);
        Self {
            category,
            current: outcome.into_set(),
            failure,
        }
    }
}

/// Everything retrieved from the source in one run.
#[derive(Debug, Clone)]
pub struct FetchedLists {
    pub profile: Profile,
    pub categories: Vec<FetchedCategory>,
}

impl FetchedLists {
    /// Warnings for categories that could not be fetched.
    pub fn warnings(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter_map(|c| {
                c.failure
                    .as_ref()
                    .map(|reason| format!("Could not fetch {}: {reason}", c.category))
            })
            .collect()
    }
}

/// Authenticate, resolve the target, and fetch both lists.
///
/// A failed category is replaced by an empty set. The run is aborted with
/// [`TrackerError::NoData`] when both lists end up empty.
pub fn fetch_lists(
    source: &mut dyn FollowSource,
    config: &TrackerConfig,
) -> Result<FetchedLists> {
    tracing::info!("Loading saved session for @{}", config.account);
    source.authenticate(&config.account)?;

    tracing::info!("Fetching profile for @{}", config.target);
    let profile = source.lookup_profile(&config.target)?;
    tracing::info!("Profile found: {}", profile.display_name());
    if profile.is_private {
        tracing::debug!("@{} is private; lists require an approved follow", profile.username);
    }

    let categories: Vec<_> = Category::ALL
        .iter()
        .map(|&category| {
            tracing::info!("Getting {category} from {}", source.name());
            let outcome = FetchOutcome::collect(category, source.list(&profile, category));
            FetchedCategory::from_outcome(category, outcome)
        })
        .collect();

    if categories.iter().all(|c| c.current.is_empty()) {
        return Err(TrackerError::NoData);
    }

    Ok(FetchedLists {
        profile,
        categories,
    })
}
