//! This module provides the four-component version numbering used by the
//! release feed.
//!
//! Releases are numbered `major.minor.build[.revision]`, following the
//! `System.Version`-style scheme used by the feed producer. This is
//! deliberately not [SemVer](https://semver.org/) — there is no
//! `major.minor.patch` plus pre-release/build-metadata axis, just up to four
//! plain integer components, with any missing trailing component treated as
//! zero. The [`semver`](https://crates.io/crates/semver) crate enforces the
//! three-component shape and so cannot represent this format.

//		Packages

use core::{
	fmt::{Display, self},
	str::FromStr,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};



//		Structs

//		Version
/// A four-component version number: `major.minor.build.revision`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub struct Version {
	//		Public properties
	/// The major version component.
	pub major:    u64,

	/// The minor version component.
	pub minor:    u64,

	/// The build version component. Absent in the source string, this is `0`.
	pub build:    u64,

	/// The revision version component. Absent in the source string, this is `0`.
	pub revision: u64,
}

//󰭅		Version
impl Version {
	//		new
	/// Creates a new version from its four numeric components.
	#[must_use]
	pub const fn new(major: u64, minor: u64, build: u64, revision: u64) -> Self {
		Self { major, minor, build, revision }
	}
}

//󰭅		Display
impl Display for Version {
	//		fmt
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
	}
}

//		VersionParseError
/// An error returned when a version string cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct VersionParseError(pub String);

//󰭅		Display
impl Display for VersionParseError {
	//		fmt
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid version string: {:?}", self.0)
	}
}

//󰭅		Error
impl core::error::Error for VersionParseError {}

//󰭅		FromStr
impl FromStr for Version {
	type Err = VersionParseError;

	//		from_str
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		let parts: Vec<&str> = trimmed.split('.').collect();
		if parts.is_empty() || parts.len() > 4 || trimmed.is_empty() {
			return Err(VersionParseError(s.to_owned()));
		}
		let mut components = [0_u64; 4];
		for (i, part) in parts.iter().enumerate() {
			components[i] = part.parse().map_err(|_err| VersionParseError(s.to_owned()))?;
		}
		Ok(Self {
			major:    components[0],
			minor:    components[1],
			build:    components[2],
			revision: components[3],
		})
	}
}

//󰭅		Serialize
impl Serialize for Version {
	//		serialize
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

//󰭅		Deserialize
impl<'de> Deserialize<'de> for Version {
	//		deserialize
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(D::Error::custom)
	}
}



//		Tests
