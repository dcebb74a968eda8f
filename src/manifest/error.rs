use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Invalid manifest JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Manifest root must be a JSON object")]
    NotAnObject,
}
