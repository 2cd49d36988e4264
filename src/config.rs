//! This module provides the configuration options recognized by the
//! updater.

//		Packages

use crate::version::Version;
use std::{path::PathBuf, sync::Arc};
use url::Url;



//		Structs

//		Config
/// The configuration options for an [`crate::state::Updater`].
#[derive(Clone)]
#[non_exhaustive]
pub struct Config {
	//		Public properties
	/// The HTTP client instance used to fetch the feed and to download
	/// installers.
	pub http_client:                reqwest::Client,

	/// A resolver that returns the feed URL to use, called afresh on every
	/// [`crate::state::UpdateState::latest`] call.
	pub feed_uri_provider:           Arc<dyn Fn() -> Url + Send + Sync>,

	/// The directory that downloaded installers are cached in.
	pub updates_path:               PathBuf,

	/// The current running version of the application.
	pub current_version:            Version,

	/// The name of the feed category that represents the early-access
	/// channel. Matched case-insensitively.
	pub early_access_category_name: String,
}

//󰭅		Debug
impl core::fmt::Debug for Config {
	//		fmt
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Config")
			.field("http_client", &self.http_client)
			.field("feed_uri_provider", &"<fn>")
			.field("updates_path", &self.updates_path)
			.field("current_version", &self.current_version)
			.field("early_access_category_name", &self.early_access_category_name)
			.finish()
	}
}



//		Tests
