//! The analysis pipeline.
//!
//! Loading is the only step that can fail. Once a [`RasterImage`] exists,
//! region extraction, marker detection and classification always produce a
//! complete [`LayoutDescriptor`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::LayoutscanError;
use crate::layout::{classify, LayoutDescriptor};
use crate::marker::{detect_marker_candidate, MarkerOptions};
use crate::raster::{self, RasterImage};
use crate::regions::{extract_text_regions, RegionOptions};

/// File extensions treated as images when scanning a directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Options for the whole pipeline.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeOptions {
    pub regions: RegionOptions,
    pub marker: MarkerOptions,
}

/// A descriptor together with the file it was computed from.
///
/// Serializes as one flat object: `path` followed by the descriptor fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub path: PathBuf,
    #[serde(flatten)]
    pub descriptor: LayoutDescriptor,
}

/// Runs every stage after loading on an in-memory raster.
pub fn analyze_raster(raster: &RasterImage, opts: &AnalyzeOptions) -> LayoutDescriptor {
    let text_regions = extract_text_regions(raster, &opts.regions);
    let marker = detect_marker_candidate(raster, &opts.marker);
    classify(raster, text_regions, marker)
}

/// Loads one image and analyses it.
///
/// # Errors
/// Fails only if the image cannot be loaded; see [`raster::load`].
pub fn analyze_path(path: &Path, opts: &AnalyzeOptions) -> Result<LayoutDescriptor, LayoutscanError> {
    let raster = raster::load(path)?;
    let descriptor = analyze_raster(&raster, opts);

    tracing::info!(
        path = %path.display(),
        regions = descriptor.text_regions.len(),
        marker = descriptor.marker.is_some(),
        layout = %descriptor.layout_type,
        "analyzed image"
    );

    Ok(descriptor)
}

/// Returns true if the path has one of [`IMAGE_EXTENSIONS`] (case-insensitive).
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Recursively lists image files under `dir`, sorted by path.
///
/// # Errors
/// Returns [`LayoutscanError::DirectoryWalk`] if traversal fails and
/// [`LayoutscanError::NoImagesFound`] if nothing matched.
pub fn collect_image_paths(dir: &Path) -> Result<Vec<PathBuf>, LayoutscanError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|source| LayoutscanError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        return Err(LayoutscanError::NoImagesFound {
            path: dir.to_path_buf(),
        });
    }

    paths.sort();
    Ok(paths)
}

/// Analyses a single image file, or every image under a directory.
///
/// A directory is processed in sorted path order and stops at the first
/// image that fails to load; no partial batch is returned.
pub fn analyze_target(target: &Path, opts: &AnalyzeOptions) -> Result<Vec<Analysis>, LayoutscanError> {
    let paths = if target.is_dir() {
        collect_image_paths(target)?
    } else {
        vec![target.to_path_buf()]
    };

    tracing::debug!(count = paths.len(), target = %target.display(), "analysis targets");

    paths
        .into_iter()
        .map(|path| {
            let descriptor = analyze_path(&path, opts)?;
            Ok(Analysis { path, descriptor })
        })
        .collect()
}
