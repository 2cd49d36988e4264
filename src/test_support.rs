//! Test doubles shared across more than one module's tests.

//		Packages

use crate::{error::UpdateError, launcher::Launcher};
use std::{
	path::{Path, PathBuf},
	sync::Mutex,
};



//		Structs

//		RecordingLauncher
/// A [`Launcher`] test double that records every path it was asked to
/// launch, instead of actually spawning a process.
#[derive(Debug, Default)]
pub(crate) struct RecordingLauncher {
	//		Public properties
	pub(crate) launched: Mutex<Vec<PathBuf>>,
}

//󰭅		Launcher
impl Launcher for RecordingLauncher {
	//		launch
	fn launch(&self, path: &Path) -> Result<(), UpdateError> {
		self.launched.lock().unwrap().push(path.to_owned());
		Ok(())
	}
}
