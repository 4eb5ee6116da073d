use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Ordered, duplicate-free list of files queued for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputList {
    paths: Vec<PathBuf>,
}

impl InputList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Appends files not already present. Returns how many were added.
    pub fn add_files<I, P>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in files {
            let path = path.into();
            if !self.paths.contains(&path) {
                self.paths.push(path);
                added += 1;
            }
        }
        added
    }

    /// Recursively adds every file under `dir` with one of `extensions`.
    pub fn add_directory(&mut self, dir: &Path, extensions: &[String]) -> Result<usize> {
        let found = collect_directory(dir, extensions)?;
        log::debug!("found {} matching files under {}", found.len(), dir.display());
        Ok(self.add_files(found))
    }

    /// Removes the entries at `indices`; out-of-range indices are ignored.
    pub fn remove(&mut self, indices: &[usize]) {
        let mut idx = 0;
        self.paths.retain(|_| {
            let keep = !indices.contains(&idx);
            idx += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

/// Case-insensitive match of the path's extension against `extensions`.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

pub fn collect_directory(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "not a directory: {}",
            dir.to_string_lossy()
        )));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(v) => v,
            Err(_) => continue,
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
