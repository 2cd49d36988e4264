//! This module provides the [`Release`] and [`FileDescriptor`] value types.

//		Packages

use crate::version::Version;
use url::Url;



//		Structs

//		FileDescriptor
/// A release's installer file: where to get it, and how to verify it.
///
/// Constructing one directly (rather than via [`crate::collection`]) is
/// intentionally not validated — callers such as tests may want to build an
/// incomplete descriptor to exercise the "not installable" edge cases. The
/// installability check lives on [`Release`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct FileDescriptor {
	//		Public properties
	/// The URL to download the installer from.
	pub url:    Url,

	/// The SHA-512 checksum of the installer, as 128 lowercase hex
	/// characters.
	pub sha512: String,
}

//󰭅		FileDescriptor
impl FileDescriptor {
	//		is_valid
	/// Whether this descriptor is complete enough to be downloaded and
	/// verified: a non-empty URL, and a checksum that is exactly 128 hex
	/// characters.
	#[must_use]
	pub fn is_valid(&self) -> bool {
		!self.url.as_str().is_empty()
			&& self.sha512.len() == 128
			&& self.sha512.bytes().all(|byte| byte.is_ascii_hexdigit())
	}
}

//		Release
/// A single publishable build: its version, changelog, optional installer,
/// and the channel it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Release {
	//		Public properties
	/// The version of this release.
	pub version:      Version,

	/// The changelog lines for this release, in feed order.
	pub change_log:   Vec<String>,

	/// The installer file for this release, if one has been published.
	pub file:         Option<FileDescriptor>,

	/// Whether this release came from the early-access channel.
	pub early_access: bool,
}

//󰭅		Release
impl Release {
	//		is_installable
	/// Whether this release has a complete, valid installer file.
	#[must_use]
	pub fn is_installable(&self) -> bool {
		self.file.as_ref().is_some_and(FileDescriptor::is_valid)
	}

	//		is_new
	/// Whether this release is installable and strictly newer than
	/// `current`.
	#[must_use]
	pub fn is_new(&self, current: &Version) -> bool {
		self.is_installable() && self.version > *current
	}

	//		file
	/// The installer file for this release, if any.
	#[must_use]
	pub const fn file(&self) -> Option<&FileDescriptor> {
		self.file.as_ref()
	}
}



//		Tests

#[cfg(test)]
mod tests {
	use super::*;

	//		descriptor
	fn descriptor(url: &str, sha512: &str) -> FileDescriptor {
		FileDescriptor { url: url.parse().unwrap(), sha512: sha512.to_owned() }
	}

	//		valid_sha512
	const VALID_SHA512: &str = "961103aaf283cd90bfacb73e6cb97e2069bfa5bd9015b8f91ffd0bc1e8c791eb089e07a7df63a7da12dbb461b0777f5106819009f7a16bfaeff45f8ca941dab5";

	//		release
	fn release(version: &str, file: Option<FileDescriptor>, early_access: bool) -> Release {
		Release {
			version: version.parse().unwrap(),
			change_log: vec![],
			file,
			early_access,
		}
	}

	//		file_descriptor_is_valid
	#[test]
	fn file_descriptor_is_valid() {
		assert!(descriptor("https://example.com/a.exe", VALID_SHA512).is_valid());
		assert!(!descriptor("https://example.com/a.exe", "deadbeef").is_valid());
		assert!(!descriptor("https://example.com/a.exe", "not-hex-but-128-chars-long-00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000").is_valid());
	}

	//		release_without_file_is_not_installable
	#[test]
	fn release_without_file_is_not_installable() {
		let release = release("1.0.0", None, false);
		assert!(!release.is_installable());
		assert!(!release.is_new(&"0.0.0".parse().unwrap()));
	}

	//		release_with_invalid_file_is_not_installable
	#[test]
	fn release_with_invalid_file_is_not_installable() {
		let release = release("1.0.0", Some(descriptor("https://example.com/a.exe", "")), false);
		assert!(!release.is_installable());
	}

	//		release_is_new_only_when_strictly_newer
	#[test]
	fn release_is_new_only_when_strictly_newer() {
		let release = release("1.5.2", Some(descriptor("https://example.com/a.exe", VALID_SHA512)), false);
		assert!(release.is_new(&"1.5.1".parse().unwrap()));
		assert!(!release.is_new(&"1.5.2".parse().unwrap()));
		assert!(!release.is_new(&"1.6.0".parse().unwrap()));
	}
}
