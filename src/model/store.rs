//! File-backed persistence for [`ModelArtifact`].

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use super::{ArtifactRecord, ArtifactRejected, ModelArtifact};

pub const DEFAULT_MODEL_PATH: &str = "models/priority_model.json";
pub const DEFAULT_LEGACY_MODEL_PATH: &str = "priority_model.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no model artifact at {} or the legacy location", primary.display())]
    NotFound {
        primary: PathBuf,
        legacy: Option<PathBuf>,
    },
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode artifact {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode artifact: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("artifact {} rejected: {source}", path.display())]
    Rejected {
        path: PathBuf,
        #[source]
        source: ArtifactRejected,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Primary artifact location plus an optional legacy fallback.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    primary: PathBuf,
    legacy: Option<PathBuf>,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH).with_legacy(DEFAULT_LEGACY_MODEL_PATH)
    }
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(primary: P) -> Self {
        Self {
            primary: primary.into(),
            legacy: None,
        }
    }

    pub fn with_legacy<P: Into<PathBuf>>(mut self, legacy: P) -> Self {
        self.legacy = Some(legacy.into());
        self
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy.as_deref()
    }

    /// Write `artifact` to the primary path.
    ///
    /// The bytes go to a temporary file in the same directory which is then
    /// renamed over the target, so readers see either the old or the new
    /// artifact and never a partial one.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<(), StoreError> {
        let dir = match self.primary.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| StoreError::Io {
            path: self.primary.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, artifact).map_err(StoreError::Encode)?;
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.primary)
            .map_err(|err| io_err(err.error))?;

        info!(
            path = %self.primary.display(),
            vocabulary = artifact.vectorizer().dimension(),
            "saved model artifact"
        );
        Ok(())
    }

    /// Read the primary artifact, falling back to the legacy path when the
    /// primary file does not exist.
    pub fn load(&self) -> Result<ModelArtifact, StoreError> {
        if let Some(artifact) = read_artifact(&self.primary)? {
            info!(path = %self.primary.display(), "loaded model artifact");
            return Ok(artifact);
        }
        if let Some(legacy) = &self.legacy {
            if let Some(artifact) = read_artifact(legacy)? {
                warn!(path = %legacy.display(), "loaded model artifact from legacy location");
                return Ok(artifact);
            }
        }
        Err(StoreError::NotFound {
            primary: self.primary.clone(),
            legacy: self.legacy.clone(),
        })
    }
}

fn read_artifact(path: &Path) -> Result<Option<ModelArtifact>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let record: ArtifactRecord =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    ModelArtifact::try_from(record)
        .map(Some)
        .map_err(|source| StoreError::Rejected {
            path: path.to_path_buf(),
            source,
        })
}
