//! This module projects a flat release collection through the current
//! version and early-access flag into the visible release history, and
//! identifies the "new" release (if any).

//		Packages

use crate::{release::Release, version::Version};



//		Structs

//		ReleasesView
/// The result of projecting a release collection through
/// `(current_version, early_access_enabled)`.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ReleasesView {
	//		Public properties
	/// The visible release history, ordered descending by version.
	pub history: Vec<Release>,

	/// The highest-version installable release strictly above the current
	/// version, consistent with the early-access flag, if any.
	pub new:     Option<Release>,
}



//		Functions

//		project
/// Projects a flat release collection into a [`ReleasesView`].
///
/// With `early_access_enabled = true`, every release is visible. With
/// `early_access_enabled = false`, stable releases are always visible;
/// an early-access release is visible only if its version is at least
/// `current` and at most the newest stable release — this is what the user
/// would traverse on their way to stable, including the special case where
/// the early-access release *is* the version currently running.
///
/// Ties (equal versions from different source positions) retain their
/// original relative order, because the sort below is stable.
#[must_use]
pub fn project(releases: &[Release], current: &Version, early_access_enabled: bool) -> ReleasesView {
	let newest_stable = releases.iter()
		.filter(|release| !release.early_access)
		.map(|release| release.version)
		.max()
	;
	let visible: Vec<Release> = releases.iter()
		.filter(|release| {
			early_access_enabled
				|| !release.early_access
				|| newest_stable.is_some_and(|newest| release.version >= *current && release.version <= newest)
		})
		.cloned()
		.collect()
	;
	let mut history = visible;
	history.sort_by(|left, right| right.version.cmp(&left.version));

	let mut new_candidates: Vec<&Release> = releases.iter()
		.filter(|release| release.is_new(current))
		.filter(|release| early_access_enabled || !release.early_access)
		.collect()
	;
	new_candidates.sort_by_key(|release| release.version);
	let new = new_candidates.last().map(|release| (*release).clone());

	ReleasesView { history, new }
}



//		Tests
