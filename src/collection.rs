//! This module flattens decoded feed categories into a tagged sequence of
//! [`Release`]s.
//!
//! It does not sort or filter by version — that projection happens in
//! [`crate::history`]. This stage only resolves which channel each release
//! belongs to and parses its version string.

//		Packages

use crate::{
	error::UpdateError,
	feed::RawCategory,
	release::{FileDescriptor, Release},
	version::Version,
};



//		Functions

//		collect
/// Flattens feed categories into a sequence of releases, each tagged with
/// whether it came from the early-access channel.
///
/// Category name comparison against `early_access_category` is
/// case-insensitive. Releases within a category keep their feed order;
/// categories are concatenated in feed order.
///
/// # Errors
///
/// * [`UpdateError::FeedMalformed`] if any release's version string cannot
///   be parsed.
///
pub(crate) fn collect(categories: Vec<RawCategory>, early_access_category: &str) -> Result<Vec<Release>, UpdateError> {
	let mut releases = Vec::new();
	for category in categories {
		let early_access = category.name.eq_ignore_ascii_case(early_access_category);
		for raw in category.releases {
			let version: Version = raw.version.parse().map_err(|_err|
				UpdateError::FeedMalformed(format!("invalid version string: {:?}", raw.version))
			)?;
			let file = raw.file.map(|raw_file| {
				let url = raw_file.url.parse().map_err(|_err|
					UpdateError::FeedMalformed(format!("invalid file URL: {:?}", raw_file.url))
				)?;
				Ok::<_, UpdateError>(FileDescriptor { url, sha512: raw_file.sha512.trim().to_lowercase() })
			}).transpose()?;
			releases.push(Release {
				version,
				change_log: raw.change_log.into_iter().filter(|line| !line.trim().is_empty()).collect(),
				file,
				early_access,
			});
		}
	}
	Ok(releases)
}



//		Tests

#[cfg(test)]
mod tests {
	use super::*;
	use crate::feed::{RawFile, RawRelease};

	//		category
	fn category(name: &str, releases: Vec<RawRelease>) -> RawCategory {
		RawCategory { name: name.to_owned(), releases }
	}

	//		raw_release
	fn raw_release(version: &str, file: Option<RawFile>) -> RawRelease {
		RawRelease { version: version.to_owned(), change_log: vec![], file }
	}

	//		collect_tags_early_access_case_insensitively
	#[test]
	fn collect_tags_early_access_case_insensitively() {
		let categories = vec![
			category("Stable", vec![raw_release("1.0.0", None)]),
			category("earlyaccess", vec![raw_release("2.0.0", None)]),
		];
		let releases = collect(categories, "EarlyAccess").unwrap();
		assert!(!releases[0].early_access);
		assert!(releases[1].early_access);
	}

	//		collect_preserves_order_within_and_across_categories
	#[test]
	fn collect_preserves_order_within_and_across_categories() {
		let categories = vec![
			category("Stable", vec![raw_release("1.0.0", None), raw_release("1.1.0", None)]),
			category("EarlyAccess", vec![raw_release("2.0.0", None)]),
		];
		let releases = collect(categories, "EarlyAccess").unwrap();
		let versions: Vec<String> = releases.iter().map(|release| release.version.to_string()).collect();
		assert_eq!(versions, vec!["1.0.0.0", "1.1.0.0", "2.0.0.0"]);
	}

	//		collect_skips_categories_with_no_releases
	#[test]
	fn collect_skips_categories_with_no_releases() {
		let categories = vec![category("Stable", vec![])];
		assert!(collect(categories, "EarlyAccess").unwrap().is_empty());
	}

	//		collect_rejects_malformed_version
	#[test]
	fn collect_rejects_malformed_version() {
		let categories = vec![category("Stable", vec![raw_release("not-a-version", None)])];
		assert!(matches!(collect(categories, "EarlyAccess"), Err(UpdateError::FeedMalformed(_))));
	}

	//		collect_normalizes_checksum_case_and_whitespace
	#[test]
	fn collect_normalizes_checksum_case_and_whitespace() {
		let file = RawFile { url: "https://example.com/a.exe".to_owned(), sha512: "  ABCDEF  ".to_owned() };
		let categories = vec![category("Stable", vec![raw_release("1.0.0", Some(file))])];
		let releases = collect(categories, "EarlyAccess").unwrap();
		assert_eq!(releases[0].file.as_ref().unwrap().sha512, "abcdef");
	}
}
