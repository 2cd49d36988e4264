//! This module maps a release's installer file to a local cache path,
//! streams it down, and verifies its checksum.

//		Packages

use crate::{error::UpdateError, release::FileDescriptor};
use futures_util::StreamExt as _;
use sha2::{Digest, Sha512};
use std::path::{Path, PathBuf};
use tokio::{
	fs::File,
	io::{AsyncReadExt as _, AsyncWriteExt as _},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};



//		Constants

/// The size of the buffer used when streaming a file off disk to compute
/// its checksum.
const HASH_CHUNK_SIZE: usize = 64 * 1024;



//		Structs

//		FileCache
/// Maps release installer files to a local cache directory, downloads them,
/// and verifies their checksums.
#[derive(Clone, Debug)]
pub struct FileCache {
	//		Private properties
	/// The directory that downloaded installers are stored in.
	updates_path: PathBuf,

	/// The HTTP client used to stream downloads.
	http:         reqwest::Client,
}

//󰭅		FileCache
impl FileCache {
	//		new
	/// Creates a new file cache rooted at `updates_path`.
	#[must_use]
	pub const fn new(updates_path: PathBuf, http: reqwest::Client) -> Self {
		Self { updates_path, http }
	}

	//		local_path
	/// The local path that `file` would be, or is, downloaded to.
	///
	/// This is a pure function of the URL's final path segment — it does
	/// not touch the filesystem.
	#[must_use]
	pub fn local_path(&self, file: &FileDescriptor) -> PathBuf {
		let name = file.url.path_segments()
			.and_then(Iterator::last)
			.filter(|segment| !segment.is_empty())
			.unwrap_or("download")
		;
		self.updates_path.join(name)
	}

	//		exists
	/// Whether `file` has already been downloaded to its local path.
	#[must_use]
	pub async fn exists(&self, file: &FileDescriptor) -> bool {
		tokio::fs::metadata(self.local_path(file)).await.is_ok()
	}

	//		download
	/// Streams `file` from its URL into the local cache, overwriting any
	/// existing copy.
	///
	/// The response body is streamed into a temporary file in
	/// `updates_path` and only renamed into the canonical local path once
	/// the whole body has been written successfully, so a failed or
	/// cancelled download never leaves a partial file at
	/// [`local_path`](Self::local_path).
	///
	/// # Errors
	///
	/// * [`UpdateError::TransportFailed`] if the request could not be sent
	///   or the body could not be read.
	/// * [`UpdateError::ResponseUnsuccessful`] if the server returned a
	///   non-success status.
	/// * [`UpdateError::FilesystemFailed`] if the directory could not be
	///   created, or the temporary file could not be written or renamed.
	/// * [`UpdateError::Cancelled`] if `cancellation` is tripped before the
	///   download completes.
	///
	pub async fn download(&self, file: &FileDescriptor, cancellation: &CancellationToken) -> Result<PathBuf, UpdateError> {
		tokio::fs::create_dir_all(&self.updates_path).await.map_err(|err|
			UpdateError::FilesystemFailed(err.to_string())
		)?;
		let destination = self.local_path(file);
		info!(url = %file.url, destination = %destination.display(), "downloading installer");
		let request = self.http.get(file.url.clone()).send();
		let response = tokio::select! {
			biased;
			() = cancellation.cancelled() => return Err(UpdateError::Cancelled),
			result = request                => result.map_err(|err| UpdateError::from_reqwest(&err))?,
		};
		if !response.status().is_success() {
			return Err(UpdateError::ResponseUnsuccessful(response.status()));
		}
		// The temp file name is reserved synchronously (cheap) and then reopened
		// for async writing, so a failed or cancelled body never touches the
		// canonical destination.
		let temp_path = tempfile::Builder::new().prefix(".download-").tempfile_in(&self.updates_path)
			.map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?
			.into_temp_path()
		;
		let result = Self::write_body(response, &temp_path, cancellation).await;
		if let Err(err) = result {
			let _ignored = tokio::fs::remove_file(&temp_path).await;
			return Err(err);
		}
		tokio::fs::rename(&temp_path, &destination).await.map_err(|err|
			UpdateError::FilesystemFailed(err.to_string())
		)?;
		debug!(destination = %destination.display(), "download complete");
		Ok(destination)
	}

	//		write_body
	/// Streams a response body into `temp_path`, honouring `cancellation`.
	async fn write_body(response: reqwest::Response, temp_path: &Path, cancellation: &CancellationToken) -> Result<(), UpdateError> {
		let mut handle = File::create(temp_path).await.map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?;
		let mut stream = response.bytes_stream();
		loop {
			let next = tokio::select! {
				biased;
				() = cancellation.cancelled() => return Err(UpdateError::Cancelled),
				next = stream.next()            => next,
			};
			let Some(chunk) = next else { break };
			let chunk = chunk.map_err(|err| UpdateError::from_reqwest(&err))?;
			handle.write_all(&chunk).await.map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?;
		}
		handle.flush().await.map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?;
		Ok(())
	}

	//		validate
	/// Computes the SHA-512 of the locally-cached copy of `file` and
	/// compares it to `file.sha512`, case-insensitively.
	///
	/// A missing local file returns `Ok(false)` rather than an error.
	///
	/// # Errors
	///
	/// * [`UpdateError::FilesystemFailed`] if the file exists but cannot be
	///   read.
	///
	pub async fn validate(&self, file: &FileDescriptor) -> Result<bool, UpdateError> {
		let path = self.local_path(file);
		let mut handle = match File::open(&path).await {
			Ok(handle)                                            => handle,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
			Err(err)                                               => return Err(UpdateError::FilesystemFailed(err.to_string())),
		};
		let mut hasher = Sha512::new();
		let mut buffer  = vec![0_u8; HASH_CHUNK_SIZE];
		loop {
			let count = handle.read(&mut buffer).await.map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?;
			if count == 0 {
				break;
			}
			hasher.update(&buffer[..count]);
		}
		let digest = hex::encode(hasher.finalize());
		Ok(digest.eq_ignore_ascii_case(file.sha512.trim()))
	}

	//		updates_path
	/// The directory that downloaded installers are stored in.
	#[must_use]
	pub fn updates_path(&self) -> &Path {
		&self.updates_path
	}
}



//		Tests

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;
	use wiremock::{
		Mock, MockServer, ResponseTemplate,
		matchers::{method, path},
	};

	//		descriptor
	fn descriptor(url: String, sha512: &str) -> FileDescriptor {
		FileDescriptor { url: url.parse().unwrap(), sha512: sha512.to_owned() }
	}

	//		local_path_uses_url_basename
	#[test]
	fn local_path_uses_url_basename() {
		let cache = FileCache::new(PathBuf::from("/tmp/updates"), reqwest::Client::new());
		let file  = descriptor("https://example.com/releases/app-2.0.0.exe".to_owned(), "");
		assert_eq!(cache.local_path(&file), PathBuf::from("/tmp/updates/app-2.0.0.exe"));
	}

	//		exists_is_false_for_missing_file
	#[tokio::test]
	async fn exists_is_false_for_missing_file() {
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor("https://example.com/app.exe".to_owned(), "");
		assert!(!cache.exists(&file).await);
	}

	//		download_writes_and_validates
	#[tokio::test]
	async fn download_writes_and_validates() {
		let server = MockServer::start().await;
		let body   = b"installer-bytes";
		let digest = hex::encode(Sha512::digest(body));
		Mock::given(method("GET")).and(path("/app.exe"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_slice()))
			.mount(&server).await
		;
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor(format!("{}/app.exe", server.uri()), &digest);

		assert!(!cache.exists(&file).await);
		let path = cache.download(&file, &CancellationToken::new()).await.unwrap();
		assert_eq!(path, cache.local_path(&file));
		assert!(cache.exists(&file).await);
		assert!(cache.validate(&file).await.unwrap());
	}

	//		download_overwrites_existing_file
	#[tokio::test]
	async fn download_overwrites_existing_file() {
		let server = MockServer::start().await;
		Mock::given(method("GET")).and(path("/app.exe"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"new-bytes".as_slice()))
			.mount(&server).await
		;
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor(format!("{}/app.exe", server.uri()), "");
		tokio::fs::write(cache.local_path(&file), b"old-bytes").await.unwrap();

		let _path = cache.download(&file, &CancellationToken::new()).await.unwrap();
		assert_eq!(tokio::fs::read(cache.local_path(&file)).await.unwrap(), b"new-bytes");
	}

	//		download_leaves_no_partial_file_on_failure
	#[tokio::test]
	async fn download_leaves_no_partial_file_on_failure() {
		let server = MockServer::start().await;
		Mock::given(method("GET")).and(path("/app.exe"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server).await
		;
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor(format!("{}/app.exe", server.uri()), "");

		let result = cache.download(&file, &CancellationToken::new()).await;
		assert!(matches!(result, Err(UpdateError::ResponseUnsuccessful(_))));
		assert!(!cache.exists(&file).await);
		assert!(tokio::fs::read_dir(dir.path()).await.unwrap().next_entry().await.unwrap().is_none());
	}

	//		download_is_cancellable
	#[tokio::test]
	async fn download_is_cancellable() {
		let server = MockServer::start().await;
		Mock::given(method("GET")).and(path("/app.exe"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".as_slice()).set_delay(std::time::Duration::from_secs(5)))
			.mount(&server).await
		;
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor(format!("{}/app.exe", server.uri()), "");
		let token = CancellationToken::new();
		token.cancel();

		let result = cache.download(&file, &token).await;
		assert!(matches!(result, Err(UpdateError::Cancelled)));
	}

	//		validate_mismatched_checksum_fails
	#[tokio::test]
	async fn validate_mismatched_checksum_fails() {
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor("https://example.com/app.exe".to_owned(), "a".repeat(128).as_str());
		tokio::fs::write(cache.local_path(&file), b"some bytes").await.unwrap();
		assert!(!cache.validate(&file).await.unwrap());
	}

	//		validate_missing_file_is_false_not_error
	#[tokio::test]
	async fn validate_missing_file_is_false_not_error() {
		let dir   = tempdir().unwrap();
		let cache = FileCache::new(dir.path().to_owned(), reqwest::Client::new());
		let file  = descriptor("https://example.com/app.exe".to_owned(), "a".repeat(128).as_str());
		assert!(!cache.validate(&file).await.unwrap());
	}
}
