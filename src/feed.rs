//! This module decodes the raw release feed document into a list of
//! category records.
//!
//! It knows nothing about versions, channels, or release history — it is
//! strictly a byte-stream-to-structured-data step. [`crate::collection`]
//! turns its output into [`crate::release::Release`]s.

//		Packages

use crate::error::UpdateError;
use rubedo::sugar::s;
use serde::{Deserialize, Deserializer};



//		Structs

//		RawFile
/// A release's installer file, as it appears in the feed document.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct RawFile {
	//		Public properties
	/// The URL to download the installer from.
	#[serde(rename = "Url")]
	pub url:    String,

	/// The SHA-512 checksum of the installer, as hex.
	#[serde(rename = "Sha512CheckSum")]
	pub sha512: String,
}

//		RawRelease
/// A single release, as it appears in the feed document.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct RawRelease {
	//		Public properties
	/// The dotted version string, e.g. `1.5.2` or `1.5.2.1`.
	#[serde(rename = "Version")]
	pub version:    String,

	/// The changelog lines for this release.
	#[serde(rename = "ChangeLog", default)]
	pub change_log: Vec<String>,

	/// The installer file for this release, if one has been published.
	#[serde(rename = "File", default)]
	pub file:       Option<RawFile>,
}

//		RawCategory
/// A named bucket of releases, as it appears in the feed document.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct RawCategory {
	//		Public properties
	/// The category name, e.g. `Stable` or `EarlyAccess`.
	#[serde(rename = "Name")]
	pub name:     String,

	/// The releases in this category. A `null` array in the feed decodes to
	/// an empty list here.
	#[serde(rename = "Releases", default, deserialize_with = "null_as_default")]
	pub releases: Vec<RawRelease>,
}

//		RawFeed
/// The top-level shape of the feed document.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct RawFeed {
	//		Private properties
	/// The categories of releases contained in the feed.
	#[serde(rename = "Categories")]
	categories: Vec<RawCategory>,
}



//		Functions

//		null_as_default
/// Treats an explicit JSON `null` the same as a missing field, falling back
/// to `T::default()` in both cases.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

//		decode
/// Decodes a release feed document into its constituent categories.
///
/// # Errors
///
/// * [`UpdateError::FeedMalformed`] if the body is empty, is not valid
///   JSON, or lacks a `Categories` field.
///
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<RawCategory>, UpdateError> {
	if bytes.is_empty() {
		return Err(UpdateError::FeedMalformed(s!("response body was empty")));
	}
	let feed: RawFeed = serde_json::from_slice(bytes).map_err(|err|
		UpdateError::FeedMalformed(err.to_string())
	)?;
	Ok(feed.categories)
}



//		Tests
