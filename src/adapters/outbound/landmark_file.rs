use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::{DomainError, DomainResult};
use crate::domains::destinations::LandmarkSource;

/// Landmark file on disk. The path comes from `destinations.landmarks_path`.
pub struct FilesystemLandmarkSource {
    path: PathBuf,
}

impl FilesystemLandmarkSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LandmarkSource for FilesystemLandmarkSource {
    fn read_landmarks(&self) -> DomainResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::InfrastructureError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
