// Plain directory navigation for picking a scan root
use crate::errors::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub path: PathBuf,
    /// `None` at the filesystem root
    pub parent: Option<PathBuf>,
    pub directories: Vec<DirectoryEntry>,
}

/// List the visible subdirectories of `path`, or of the home directory
pub fn list_directories(path: Option<&Path>) -> Result<DirectoryListing> {
    let dir = match path {
        Some(p) => p.to_path_buf(),
        None => dirs::home_dir().ok_or_else(|| {
            DashError::NotFound("Could not determine home directory".to_string())
        })?,
    };

    if !dir.exists() {
        return Err(DashError::NotFound(format!(
            "Path does not exist: {}",
            dir.display()
        )));
    }

    let mut directories = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks so linked folders can be picked too
        if !entry.path().is_dir() {
            continue;
        }

        directories.push(DirectoryEntry {
            path: dir.join(&name),
            name,
        });
    }
    directories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    let parent = dir.parent().map(Path::to_path_buf);

    Ok(DirectoryListing {
        path: dir,
        parent,
        directories,
    })
}
