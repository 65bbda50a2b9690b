use crate::error::AbiError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix identifying a symbol-version manifest.
pub const MANIFEST_SUFFIX: &str = ".abilist";

/// Finds all non-empty `.abilist` files beneath `root`.
///
/// Traversal is fully deterministic: within each directory the matching
/// files are emitted in sorted-name order, then subdirectories are visited
/// in sorted-name order. Zero-byte manifests are skipped outright; they mean
/// "this library does not exist on this platform", not "empty symbol table".
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>, AbiError> {
    if !root.is_dir() {
        return Err(AbiError::InvalidSourceRoot(root.to_path_buf()));
    }

    let mut found = Vec::new();
    walk(root, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), AbiError> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }

    subdirs.sort();
    files.sort();

    for file in files {
        let is_manifest = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(MANIFEST_SUFFIX))
            .unwrap_or(false);

        if !is_manifest {
            continue;
        }

        if fs::metadata(&file)?.len() == 0 {
            debug!("skipping empty manifest {}", file.display());
            continue;
        }

        found.push(file);
    }

    for subdir in subdirs {
        walk(&subdir, found)?;
    }

    Ok(())
}
