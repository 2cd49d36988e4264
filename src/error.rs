//! This module provides the single domain error used throughout the crate.
//!
//! Every fallible operation exposed by [`crate::state`] and [`crate::cache`]
//! returns [`UpdateError`]. Transport, I/O, decoding, and cancellation faults
//! are all collapsed into one of its variants — callers inspect the `kind`
//! via pattern matching if they need to distinguish a transport failure from
//! a user-initiated cancellation, but they never see a `reqwest` or
//! `std::io` type directly.

//		Packages

use reqwest::StatusCode;



//		Enums

//		UpdateError
/// Errors that can occur when checking for, downloading, or validating an
/// update.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UpdateError {
	/// Cancellation of an in-flight request or download.
	#[error("the operation was cancelled")]
	Cancelled,

	/// A release file could not be written to, read from, or renamed into
	/// the local cache.
	#[error("a filesystem operation failed: {0}")]
	FilesystemFailed(String),

	/// The release feed could not be parsed into categories and releases.
	#[error("the update feed could not be parsed: {0}")]
	FeedMalformed(String),

	/// The response body was empty where content was expected.
	#[error("the server returned an empty response body")]
	ResponseEmpty,

	/// The server responded with a non-success HTTP status.
	#[error("the server returned an unsuccessful status: {0}")]
	ResponseUnsuccessful(StatusCode),

	/// The underlying HTTP request could not be completed at all, e.g. a
	/// connection, DNS, or TLS failure.
	#[error("the request could not be completed: {0}")]
	TransportFailed(String),
}

//󰭅		UpdateError
impl UpdateError {
	//		from_reqwest
	/// Normalizes a [`reqwest::Error`] into an [`UpdateError`].
	///
	/// A cancelled request reaching this point is indistinguishable from a
	/// timeout in `reqwest`'s own error taxonomy, so cancellation is instead
	/// detected by the caller checking a [`tokio_util::sync::CancellationToken`]
	/// and returning [`UpdateError::Cancelled`] directly — this conversion
	/// only ever produces [`UpdateError::TransportFailed`].
	#[must_use]
	pub fn from_reqwest(err: &reqwest::Error) -> Self {
		Self::TransportFailed(err.to_string())
	}
}



//		Tests

#[cfg(test)]
mod tests {
	use super::*;

	//		display_does_not_panic
	#[test]
	fn display_does_not_panic() {
		assert_eq!(UpdateError::Cancelled.to_string(), "the operation was cancelled");
		assert_eq!(UpdateError::ResponseEmpty.to_string(), "the server returned an empty response body");
		assert_eq!(
			UpdateError::ResponseUnsuccessful(StatusCode::NOT_FOUND).to_string(),
			"the server returned an unsuccessful status: 404 Not Found",
		);
	}
}
