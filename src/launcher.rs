//! This module provides the launcher adapter: the external collaborator
//! that runs a validated installer.
//!
//! The state machine never calls this itself — the host calls it once
//! [`crate::state::UpdateState::ready`] is `true`.

//		Packages

use crate::error::UpdateError;
use std::{fmt, path::Path, process::Command};



//		Traits

//		Launcher
/// Something that can run a validated installer file.
pub trait Launcher: fmt::Debug + Send + Sync {
	//		launch
	/// Spawns the installer at `path`.
	///
	/// This returns as soon as the process has been spawned — it does not
	/// wait for the installer to finish running.
	///
	/// # Errors
	///
	/// * [`UpdateError::FilesystemFailed`] if the process could not be
	///   spawned.
	///
	fn launch(&self, path: &Path) -> Result<(), UpdateError>;
}



//		Structs

//		ProcessLauncher
/// The default [`Launcher`], which spawns the installer as a child process
/// via [`std::process::Command`].
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct ProcessLauncher;

//󰭅		Launcher
impl Launcher for ProcessLauncher {
	//		launch
	fn launch(&self, path: &Path) -> Result<(), UpdateError> {
		drop(Command::new(path).spawn().map_err(|err| UpdateError::FilesystemFailed(err.to_string()))?);
		Ok(())
	}
}



//		Tests
