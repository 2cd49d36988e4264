//! This module provides the update state machine: the immutable
//! `UpdateState` value, and the `Updater` collaborator that performs the
//! network and filesystem work needed to move from one state to the next.

//		Packages

use crate::{
	cache::FileCache,
	collection,
	config::Config,
	error::UpdateError,
	feed,
	history,
	release::{FileDescriptor, Release},
	version::Version,
};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};



//		Structs

//		Updater
/// The stateful collaborator that [`UpdateState`] transitions call to reach
/// the network and filesystem.
///
/// `UpdateState` itself holds no reference to this — every transition takes
/// an `Updater` explicitly, so that the transition methods remain ordinary
/// value-to-value functions and concurrent callers can share one `Updater`
/// (behind an `Arc`, if required) without any locking inside this crate.
#[derive(Clone, Debug)]
pub struct Updater {
	//		Private properties
	/// The updater's configuration.
	config: Config,

	/// The local installer cache.
	cache:  FileCache,
}

//󰭅		Updater
impl Updater {
	//		new
	/// Creates a new updater collaborator from its configuration.
	#[must_use]
	pub fn new(config: Config) -> Self {
		let cache = FileCache::new(config.updates_path.clone(), config.http_client.clone());
		Self { config, cache }
	}

	//		config
	/// The updater's configuration.
	#[must_use]
	pub const fn config(&self) -> &Config {
		&self.config
	}

	//		cache
	/// The local installer cache.
	#[must_use]
	pub const fn cache(&self) -> &FileCache {
		&self.cache
	}

	//		fetch_releases
	/// Fetches and decodes the release feed.
	async fn fetch_releases(&self) -> Result<Vec<Release>, UpdateError> {
		let url      = (self.config.feed_uri_provider)();
		info!(%url, "fetching release feed");
		let response = self.config.http_client.get(url).send().await.map_err(|err| UpdateError::from_reqwest(&err))?;
		if !response.status().is_success() {
			return Err(UpdateError::ResponseUnsuccessful(response.status()));
		}
		let bytes      = response.bytes().await.map_err(|err| UpdateError::from_reqwest(&err))?;
		if bytes.is_empty() {
			return Err(UpdateError::ResponseEmpty);
		}
		let categories = feed::decode(&bytes)?;
		collection::collect(categories, &self.config.early_access_category_name)
	}
}

//		UpdateState
/// The immutable update state: a snapshot of the release history, the
/// identified new release (if any), and the progress made towards
/// downloading and validating it.
///
/// Every transition below returns a new `UpdateState` rather than mutating
/// `self` — the caller decides which value to keep.
#[derive(Clone, Debug)]
pub struct UpdateState {
	//		Private properties
	/// All releases seen on the last `Latest` call, unfiltered.
	raw_releases:         Vec<Release>,

	/// The current version used to produce `history`/`new` on the last
	/// projection (either from `Latest`, or carried over by
	/// `CachedLatest`/`Downloaded`/`Validated`).
	current_version:      Version,

	/// Whether the early-access channel is included in `history`/`new`.
	early_access_enabled: bool,

	/// The projected, descending-by-version release history.
	history:              Vec<Release>,

	/// The identified new release, if any.
	new:                  Option<Release>,

	/// The local path of the downloaded installer, if any.
	file_path:            Option<PathBuf>,

	/// Whether `file_path`'s checksum has been verified against
	/// `downloaded_file`.
	validated:            bool,

	/// The file descriptor that `file_path`/`validated` currently
	/// correspond to, if any. Used to detect a stale download/validation
	/// when a channel toggle changes which release is "new".
	downloaded_file:      Option<FileDescriptor>,
}

//󰭅		UpdateState
impl UpdateState {
	//		empty
	/// The initial state: no releases have been fetched yet.
	#[must_use]
	pub fn empty(early_access_enabled: bool) -> Self {
		Self {
			raw_releases:         Vec::new(),
			current_version:      Version::default(),
			early_access_enabled,
			history:              Vec::new(),
			new:                  None,
			file_path:            None,
			validated:            false,
			downloaded_file:      None,
		}
	}

	//		latest
	/// Fetches the release feed and projects a fresh state.
	///
	/// This always performs exactly one network request, regardless of
	/// `self`'s prior contents — it overwrites the prior release history.
	///
	/// Concurrent calls on the same receiver are not synchronized in any
	/// way; each produces its own independent result, and it is the
	/// caller's responsibility to decide which one to keep.
	///
	/// # Errors
	///
	/// Returns [`UpdateError`] if the feed could not be fetched or parsed.
	/// On error, `self` is left untouched, since states are plain values.
	///
	pub async fn latest(&self, updater: &Updater, early_access_enabled: bool) -> Result<Self, UpdateError> {
		let raw_releases = updater.fetch_releases().await?;
		let current      = updater.config.current_version;
		let view         = history::project(&raw_releases, &current, early_access_enabled);
		debug!(available = view.new.is_some(), history_len = view.history.len(), "projected release history");
		Ok(Self {
			raw_releases,
			current_version: current,
			early_access_enabled,
			history:         view.history,
			new:             view.new,
			file_path:       None,
			validated:       false,
			downloaded_file: None,
		})
	}

	//		cached_latest
	/// Reprojects the already-fetched release history with a new
	/// early-access flag, without performing any I/O.
	///
	/// If the newly-identified "new" release's installer differs from the
	/// one `self` had downloaded/validated, `validated` is reset to
	/// `false` — the old download is no longer known to match the release
	/// now in view. `file_path` is left untouched; it may still be reused
	/// by a subsequent `Downloaded` call if the bytes on disk turn out to
	/// be correct after all.
	#[must_use]
	pub fn cached_latest(&self, early_access_enabled: bool) -> Self {
		let view = history::project(&self.raw_releases, &self.current_version, early_access_enabled);
		let stale = match (&view.new, &self.downloaded_file) {
			(Some(new), Some(downloaded)) => new.file() != Some(downloaded),
			(Some(_), None)                => true,
			(None, _)                      => false,
		};
		Self {
			raw_releases:         self.raw_releases.clone(),
			current_version:      self.current_version,
			early_access_enabled,
			history:              view.history,
			new:                  view.new,
			file_path:            self.file_path.clone(),
			validated:            self.validated && !stale,
			downloaded_file:      self.downloaded_file.clone(),
		}
	}

	//		downloaded
	/// Downloads the new release's installer into the local cache, unless
	/// no new release is available (in which case this is a no-op and
	/// performs no network I/O at all), or the installer is already
	/// present and validated against it.
	///
	/// # Errors
	///
	/// Returns [`UpdateError`] if the download could not be completed.
	///
	pub async fn downloaded(&self, updater: &Updater) -> Result<Self, UpdateError> {
		let Some(new) = self.new.clone() else {
			return Ok(self.clone());
		};
		// `new` only ever comes from `Release::is_new`, which requires
		// `is_installable`, so a file descriptor is always present here; if
		// it somehow were not, there is nothing to download.
		let Some(file) = new.file().cloned() else {
			return Ok(self.clone());
		};

		let already_good = self.validated
			&& self.downloaded_file.as_ref() == Some(&file)
			&& updater.cache().exists(&file).await
		;
		if already_good {
			return Ok(self.clone());
		}

		let path = updater.cache().download(&file, &CancellationToken::new()).await?;
		Ok(Self {
			file_path:       Some(path),
			validated:       false,
			downloaded_file: Some(file),
			..self.clone()
		})
	}

	//		validated
	/// Recomputes whether the locally-cached installer for the new release
	/// matches its checksum, regardless of any prior `validated` value.
	///
	/// If no new release is available, this always yields `validated =
	/// false`.
	///
	/// # Errors
	///
	/// Returns [`UpdateError`] if the local file exists but could not be
	/// read.
	///
	pub async fn validated(&self, updater: &Updater) -> Result<Self, UpdateError> {
		let Some(new) = self.new.clone() else {
			return Ok(Self { validated: false, ..self.clone() });
		};
		let Some(file) = new.file().cloned() else {
			return Ok(Self { validated: false, ..self.clone() });
		};
		let validated = updater.cache().validate(&file).await?;
		// `validated = true` implies `file_path` is populated, per the
		// `UpdateState` invariant — the local file may already have existed
		// on disk from an earlier run even though this value never went
		// through `downloaded`.
		let file_path = if validated { Some(updater.cache().local_path(&file)) } else { self.file_path.clone() };
		Ok(Self {
			validated,
			file_path,
			downloaded_file: Some(file),
			..self.clone()
		})
	}

	//		history
	/// The visible release history, ordered descending by version.
	#[must_use]
	pub fn history(&self) -> &[Release] {
		&self.history
	}

	//		early_access_enabled
	/// Whether the early-access channel is included in `history`/`new`.
	#[must_use]
	pub const fn early_access_enabled(&self) -> bool {
		self.early_access_enabled
	}

	//		new_release
	/// The identified new release, if any.
	#[must_use]
	pub const fn new_release(&self) -> Option<&Release> {
		self.new.as_ref()
	}

	//		available
	/// Whether a new release has been identified.
	#[must_use]
	pub const fn available(&self) -> bool {
		self.new.is_some()
	}

	//		ready
	/// Whether a new release is available and its locally-cached installer
	/// has been checksum-validated.
	#[must_use]
	pub const fn ready(&self) -> bool {
		self.available() && self.validated
	}

	//		file_path
	/// The local path of the downloaded installer, if any.
	#[must_use]
	pub fn file_path(&self) -> Option<&Path> {
		self.file_path.as_deref()
	}
}



//		Tests
