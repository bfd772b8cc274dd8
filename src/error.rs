use std::path::PathBuf;
use thiserror::Error;

/// The main error type for layoutscan operations.
///
/// Only loading can fail inside the analysis pipeline itself; every stage
/// after a successful load is total. The remaining variants belong to the
/// surrounding CLI, reporting and job-patch code.
#[derive(Debug, Error)]
pub enum LayoutscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to decode image data: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to walk directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("No images found under {path}")]
    NoImagesFound { path: PathBuf },

    #[error("Failed to write JSON: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid job patch: {0}")]
    InvalidJobPatch(String),
}

impl LayoutscanError {
    /// Returns true if this error means the input could not be turned into a raster.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            LayoutscanError::ImageLoad { .. }
                | LayoutscanError::ImageDecode(_)
                | LayoutscanError::EmptyImage { .. }
        )
    }
}
