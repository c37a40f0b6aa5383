use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during export.
///
/// All variants are recoverable: the exporter reports them to the caller
/// and never terminates the host process.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid destination path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Bones were requested but object '{object}' carries no skeleton data")]
    MissingSkeletonData { object: String },

    #[error("Object '{object}' has {bones} bones; the format stores at most {max}", max = u8::MAX)]
    OversizedSkeleton { object: String, bones: usize },

    #[error("IO error: {0}")]
    Write(#[from] std::io::Error),
}
