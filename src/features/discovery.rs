//! Recursive discovery of band raster files

use std::path::{Path, PathBuf};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{SurveyError, SurveyResult};

/// Lists every `.tif`/`.tiff` file under `root`, sorted by path
///
/// Finding nothing is an error, kept apart from an empty well region.
pub fn find_raster_files(root: &Path) -> SurveyResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SurveyError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Raster directory {} does not exist", root.display()),
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if is_tiff(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(SurveyError::NoRasterFiles(root.to_path_buf()));
    }

    files.sort();
    debug!("Found {} raster files under {}", files.len(), root.display());
    Ok(files)
}

fn is_tiff(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    ext == "tif" || ext == "tiff"
}
