//! Workspace sandbox for the file capabilities.
//!
//! Every path a tool receives is relative to the workspace root. Absolute
//! paths and `..` components are rejected before touching the filesystem.
//! The deepest existing ancestor of the target is then canonicalized, so a
//! symlink cannot lead outside even when the target itself does not exist yet.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Access denied: '{path}' is an absolute path, paths are relative to the workspace")]
    Absolute { path: String },

    #[error("Access denied: path traversal detected in '{path}'")]
    Traversal { path: String },

    #[error("Access denied: '{path}' resolves outside the workspace")]
    OutsideWorkspace { path: String },

    #[error("Failed to resolve '{path}': {reason}")]
    Resolve { path: String, reason: String },
}

/// The directory file tools are confined to.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a workspace-relative path to a real path inside the workspace.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, SandboxError> {
        let relative = relative.trim();
        let path = Path::new(relative);

        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(SandboxError::Traversal { path: relative.into() });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(SandboxError::Absolute { path: relative.into() });
                }
            }
        }

        let joined = self.root.join(path);
        let resolve_err = |e: std::io::Error| SandboxError::Resolve {
            path: relative.into(),
            reason: e.to_string(),
        };
        let canonical_root = self.root.canonicalize().map_err(resolve_err)?;

        // symlink_metadata sees dangling links too; canonicalizing one fails.
        let mut anchor = joined.as_path();
        while anchor.symlink_metadata().is_err() {
            match anchor.parent() {
                Some(parent) => anchor = parent,
                None => break,
            }
        }
        let canonical = anchor.canonicalize().map_err(resolve_err)?;
        if !canonical.starts_with(&canonical_root) {
            return Err(SandboxError::OutsideWorkspace { path: relative.into() });
        }

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let resolved = ws.resolve("notes/todo.txt").unwrap();
        assert_eq!(resolved, dir.path().join("notes/todo.txt"));
        assert_eq!(ws.resolve(".").unwrap(), dir.path().join("."));
    }

    #[test]
    fn traversal_is_rejected() {
        let ws = Workspace::new("/tmp/ws");
        assert!(matches!(ws.resolve("../etc/passwd"), Err(SandboxError::Traversal { .. })));
        assert!(matches!(ws.resolve("a/../../b"), Err(SandboxError::Traversal { .. })));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let ws = Workspace::new("/tmp/ws");
        assert!(matches!(ws.resolve("/etc/passwd"), Err(SandboxError::Absolute { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escape_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).unwrap();
        let ws = Workspace::new(dir.path());
        assert!(matches!(
            ws.resolve("escape"),
            Err(SandboxError::OutsideWorkspace { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn new_file_under_symlinked_dir_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        let ws = Workspace::new(dir.path());
        assert!(matches!(
            ws.resolve("link/new.txt"),
            Err(SandboxError::OutsideWorkspace { .. })
        ));
        assert!(matches!(
            ws.resolve("link/deeper/new.txt"),
            Err(SandboxError::OutsideWorkspace { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_not_followed() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("missing.txt"), dir.path().join("ghost"))
            .unwrap();
        let ws = Workspace::new(dir.path());
        assert!(ws.resolve("ghost").is_err());
    }

    #[test]
    fn missing_nested_path_resolves_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        assert_eq!(ws.resolve("a/b/c.txt").unwrap(), dir.path().join("a/b/c.txt"));
    }
}
