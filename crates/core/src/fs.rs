//! Filesystem checks used before opening the dataset

use std::path::Path;

use log::debug;

/// Check if a path points at a regular file
///
/// The dataset is opened read-only, so a missing file is reported up front
/// instead of letting SQLite fail on connect.
pub fn is_file(path: &str) -> bool {
    let is_file = Path::new(path).is_file();
    if !is_file {
        debug!("{} is not a regular file", path);
    }
    is_file
}
