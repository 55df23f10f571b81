use std::path::{Path, PathBuf};

/// Project folders open for the current invocation, in the order they were given.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceFolders(Vec<PathBuf>);

impl WorkspaceFolders {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self(folders)
    }

    /// Explicit folders win; otherwise the current directory is the only folder.
    pub fn from_args(explicit: Vec<PathBuf>, current_dir: Option<PathBuf>) -> Self {
        if explicit.is_empty() {
            Self::new(current_dir.into_iter().collect())
        } else {
            Self::new(explicit)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn project_root(&self) -> Option<ProjectRoot> {
        self.0.first().cloned().map(ProjectRoot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
