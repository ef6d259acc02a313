//! File discovery module for finding video files to process.
//!
//! Only the top level of the input directory is searched. Files are matched
//! on a fixed set of container extensions (case-insensitive) and returned in
//! sorted order so batches run in a stable sequence.

use crate::config::VIDEO_EXTENSIONS;
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Returns true when the path has one of the supported video extensions.
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Finds video files eligible for processing in the specified directory.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Sorted paths of the discovered videos
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no video files are present
///
/// # Examples
///
/// ```rust,no_run
/// use hookcut_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("input-videos")) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.is_file() && has_video_extension(&path)).then_some(path)
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    log::debug!(
        "Discovered {} video file(s) in {}",
        files.len(),
        input_dir.display()
    );
    Ok(files)
}
