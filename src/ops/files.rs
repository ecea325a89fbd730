use std::path::Path;

use crate::model::config::SourceFile;

/// Add a path to the file list and make it the active file. Adding a
/// path already in the list re-activates the existing entry instead of
/// duplicating it.
pub fn add_file(files: &mut Vec<SourceFile>, path: &Path) {
    for file in files.iter_mut() {
        file.active = false;
    }

    match files.iter_mut().find(|f| f.path == path) {
        Some(existing) => existing.active = true,
        None => files.push(SourceFile {
            path: path.to_path_buf(),
            active: true,
        }),
    }
}

/// Remove the entry at `index`. If the active file went away, the first
/// remaining entry becomes active.
pub fn remove_file(files: &mut Vec<SourceFile>, index: usize) {
    if index >= files.len() {
        return;
    }
    files.remove(index);

    if !files.is_empty() && !files.iter().any(|f| f.active) {
        files[0].active = true;
    }
}

/// Switch the active file to the entry at `index`.
pub fn set_active(files: &mut [SourceFile], index: usize) {
    if index >= files.len() {
        return;
    }
    for file in files.iter_mut() {
        file.active = false;
    }
    files[index].active = true;
}
