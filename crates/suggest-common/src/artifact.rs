/// Loading of the model and account-map artifacts at startup.
///
/// Missing or broken artifacts never abort the process: the service comes up without a model
/// and reports itself as not ready until it is restarted with valid files.
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::classifier::ClassifierAdapter;
use crate::directory::{CategoryDirectory, DirectoryEntry};
use crate::error::CommonError;
use crate::tfidf::{ModelArtifact, TfidfModel};

/// What the service runs with after startup.
pub struct LoadedArtifacts {
    pub adapter: ClassifierAdapter,
    pub directory: CategoryDirectory,
}

impl LoadedArtifacts {
    fn unloaded() -> Self {
        Self {
            adapter: ClassifierAdapter::unloaded(),
            directory: CategoryDirectory::default(),
        }
    }
}

/// Load both artifacts, degrading to "no model" when either is missing or invalid.
pub fn load_artifacts(model_path: &Path, account_map_path: &Path) -> LoadedArtifacts {
    if !model_path.exists() || !account_map_path.exists() {
        warn!(
            model = %model_path.display(),
            account_map = %account_map_path.display(),
            "model artifacts not found, running without a model"
        );
        return LoadedArtifacts::unloaded();
    }

    let loaded = load_model(model_path).and_then(|model| {
        let directory = load_directory(account_map_path)?;
        Ok((model, directory))
    });

    match loaded {
        Ok((model, directory)) => {
            info!(
                classes = model.classes_len,
                vocabulary = model.model.vocabulary_size(),
                accounts = directory.len(),
                sha256 = %model.digest,
                "model loaded"
            );
            LoadedArtifacts {
                adapter: ClassifierAdapter::new(Arc::new(model.model)),
                directory,
            }
        }
        Err(e) => {
            error!(error = %e, "failed to load model artifacts, running without a model");
            LoadedArtifacts::unloaded()
        }
    }
}

pub struct LoadedModel {
    pub model: TfidfModel,
    pub classes_len: usize,
    /// Hex SHA-256 of the artifact file, for identifying which model is deployed.
    pub digest: String,
}

pub fn load_model(path: &Path) -> Result<LoadedModel, CommonError> {
    let bytes = std::fs::read(path)?;
    let digest = sha256_hex(&bytes);
    let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;
    let classes_len = artifact.classes.len();
    let model = TfidfModel::from_artifact(artifact)?;
    Ok(LoadedModel {
        model,
        classes_len,
        digest,
    })
}

pub fn load_directory(path: &Path) -> Result<CategoryDirectory, CommonError> {
    let bytes = std::fs::read(path)?;
    let entries: Vec<DirectoryEntry> = serde_json::from_slice(&bytes)?;
    Ok(CategoryDirectory::from_entries(entries))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
