//! Static resource lookup (stylesheets embedded into mails)

use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

/// Logical path of the plain-text skin stylesheet
pub const TEXTSKIN_CSS: &str = "/textskin/global.css";

/// Resolves logical resource paths to their contents
pub trait ResourceLoader: Send + Sync {
    /// `Ok(None)` when the resource does not exist
    fn load(&self, path: &str) -> io::Result<Option<String>>;
}

/// Resources served from a directory on disk
#[derive(Debug, Clone)]
pub struct FsResources {
    root: PathBuf,
}

impl FsResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a logical path under the root; `None` for anything escaping it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

impl ResourceLoader for FsResources {
    fn load(&self, path: &str) -> io::Result<Option<String>> {
        let Some(full) = self.resolve(path) else {
            return Ok(None);
        };

        let mut file = match std::fs::File::open(&full) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(Some(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_resource() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("textskin")).unwrap();
        std::fs::write(dir.path().join("textskin/global.css"), "body { color: black; }").unwrap();

        let resources = FsResources::new(dir.path());
        let css = resources.load(TEXTSKIN_CSS).unwrap();
        assert_eq!(css.as_deref(), Some("body { color: black; }"));
    }

    #[test]
    fn test_missing_resource_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resources = FsResources::new(dir.path());
        assert!(resources.load(TEXTSKIN_CSS).unwrap().is_none());
    }

    #[test]
    fn test_parent_traversal_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resources = FsResources::new(dir.path().join("static"));
        assert!(resources.load("/../secret.txt").unwrap().is_none());
    }
}
