use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::DashboardError;

/// The file a refresh pass will read
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub created: SystemTime,
}

/// Picks the newest non-empty data file in `dir`
///
/// Only regular files whose name ends in `.<extension>` and whose size is
/// non-zero are candidates. "Newest" means the latest creation time; when
/// the filesystem does not record creation time the modification time is
/// used instead.
///
/// # Errors
/// * `DirectoryNotFound` if `dir` does not exist or is not a directory
/// * `NoDataFiles` if no file qualifies
/// * `Parse` if the directory cannot be listed
///
/// # Examples
/// ```no_run
/// use flood_monitor::selector::select_latest;
/// use std::path::Path;
///
/// match select_latest(Path::new("flood_risk_outputs"), "geojson") {
///     Ok(file) => println!("latest output: {}", file.file_name),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn select_latest(dir: &Path, extension: &str) -> Result<SelectedFile, DashboardError> {
    if !dir.is_dir() {
        return Err(DashboardError::DirectoryNotFound);
    }

    let suffix = format!(".{}", extension);
    let mut candidates = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if !file_name.ends_with(&suffix) {
            continue;
        }

        // Follows symlinks, so a linked output counts as the file it points to
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("skipping {}: {}", file_name, e);
                continue;
            }
        };
        if !metadata.is_file() || metadata.len() == 0 {
            continue;
        }

        let created = match metadata.created().or_else(|_| metadata.modified()) {
            Ok(time) => time,
            Err(e) => {
                log::warn!("skipping {}: no file time: {}", file_name, e);
                continue;
            }
        };
        candidates.push(SelectedFile {
            path: entry.path(),
            file_name,
            created,
        });
    }

    pick_latest(candidates).ok_or(DashboardError::NoDataFiles)
}

/// Latest candidate by creation time, ties going to the greatest name
pub fn pick_latest(candidates: Vec<SelectedFile>) -> Option<SelectedFile> {
    candidates.into_iter().max_by(|a, b| {
        a.created
            .cmp(&b.created)
            .then_with(|| a.file_name.cmp(&b.file_name))
    })
}
