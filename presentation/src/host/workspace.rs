//! Workspace resolution for the terminal shell

use openflux_application::ports::host::WorkspacePort;
use std::path::PathBuf;

/// The workspace given with `--workspace`, or the current directory.
///
/// Resolves to nothing when the chosen path is not an existing directory.
pub struct DirectoryWorkspace {
    root: Option<PathBuf>,
}

impl DirectoryWorkspace {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        let root = explicit
            .or_else(|| std::env::current_dir().ok())
            .filter(|path| path.is_dir())
            .map(|path| std::fs::canonicalize(&path).unwrap_or(path));
        Self { root }
    }
}

impl WorkspacePort for DirectoryWorkspace {
    fn current_workspace(&self) -> Option<PathBuf> {
        self.root.clone()
    }
}
