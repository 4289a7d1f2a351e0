use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::classifier::{Classifier, ClassifierModel};
use super::encoder::OneHotEncoder;
use super::scaler::StandardScaler;

/// Source of fitted artifacts. Loads are expected to be idempotent and the
/// returned artifacts are never mutated by the pipeline.
pub trait ArtifactStore: Send + Sync {
    fn load_encoder(&self) -> Result<OneHotEncoder, ArtifactLoadError>;
    fn load_scaler(&self) -> Result<StandardScaler, ArtifactLoadError>;
    fn load_classifier(&self) -> Result<Arc<dyn Classifier>, ArtifactLoadError>;
}

/// Which fitted model backs the classifier adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    #[default]
    Logistic,
    RandomForest,
}

impl ClassifierKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "logistic" | "logistic_regression" => Some(Self::Logistic),
            "random_forest" | "forest" | "rf" => Some(Self::RandomForest),
            _ => None,
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            ClassifierKind::Logistic => "logistic_model.json",
            ClassifierKind::RandomForest => "random_forest_model.json",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Logistic => write!(f, "logistic"),
            ClassifierKind::RandomForest => write!(f, "random_forest"),
        }
    }
}

pub const ENCODER_FILE: &str = "encoder.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Directory of JSON artifacts: `encoder.json`, `scaler.json`, and one
/// model file per [`ClassifierKind`].
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
    classifier: ClassifierKind,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>, classifier: ClassifierKind) -> Self {
        Self {
            root: root.into(),
            classifier,
        }
    }

    fn read_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T, ArtifactLoadError> {
        let path = self.root.join(file_name);
        let raw = fs::read_to_string(&path).map_err(|source| ArtifactLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let artifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactLoadError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "artifact loaded");
        Ok(artifact)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn load_encoder(&self) -> Result<OneHotEncoder, ArtifactLoadError> {
        self.read_json(ENCODER_FILE)
    }

    fn load_scaler(&self) -> Result<StandardScaler, ArtifactLoadError> {
        self.read_json(SCALER_FILE)
    }

    fn load_classifier(&self) -> Result<Arc<dyn Classifier>, ArtifactLoadError> {
        let model: ClassifierModel = self.read_json(self.classifier.file_name())?;
        info!(
            classifier = %self.classifier,
            input_width = model.input_width(),
            "classifier artifact ready"
        );
        Ok(Arc::new(model))
    }
}

/// Failure to produce a usable artifact. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {artifact} artifact: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactLoadError {
    pub(crate) fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}
