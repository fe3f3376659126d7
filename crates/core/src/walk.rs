//! Local directory traversal for sync
//!
//! Produces `(local path, object key)` pairs lazily so the upload loop can
//! stop at the first failure without walking the rest of the tree.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A regular file found under the sync root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    /// Absolute path of the file on disk
    pub path: PathBuf,

    /// Object key: path relative to the root, joined with `/`
    pub key: String,
}

/// Resolve a user-supplied root directory
///
/// Expands a leading `~` and canonicalizes the result, which also follows
/// symlinks. A missing path, or one that is not a directory, is reported as
/// `Error::InvalidPath`.
pub fn resolve_root(pathname: &Path) -> Result<PathBuf> {
    let expanded = expand_home(pathname);
    let root = std::fs::canonicalize(&expanded)
        .map_err(|e| Error::InvalidPath(format!("{}: {e}", pathname.display())))?;
    if !root.is_dir() {
        return Err(Error::InvalidPath(format!("{}: not a directory", pathname.display())));
    }
    Ok(root)
}

fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Build the object key for a file below `root`
pub fn object_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::InvalidPath(format!("{} is outside {}", path.display(), root.display())))?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        return Err(Error::InvalidPath(format!(
            "{} has no name relative to the root",
            path.display()
        )));
    }

    Ok(segments.join("/"))
}

/// Walk every regular file under an already resolved root, depth first
///
/// Directories are descended into but never yielded. Order follows directory
/// entry order and is not sorted.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<SyncEntry>> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(e))),
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let path = entry.into_path();
            Some(object_key(root, &path).map(|key| SyncEntry { path, key }))
        })
}

fn walk_error(err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    match err.into_io_error() {
        Some(io) => Error::Io(io),
        None => Error::InvalidPath(format!("filesystem loop at {path}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn site_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
        std::fs::write(root.join("error.html"), "oops").unwrap();
        std::fs::create_dir_all(root.join("css/vendor")).unwrap();
        std::fs::write(root.join("css/site.css"), "body{}").unwrap();
        std::fs::write(root.join("css/vendor/reset.css"), "*{}").unwrap();
        std::fs::create_dir(root.join("empty")).unwrap();
        dir
    }

    #[test]
    fn test_walk_yields_only_files_with_posix_keys() {
        let dir = site_tree();
        let root = resolve_root(dir.path()).unwrap();

        let keys: BTreeSet<String> = walk_files(&root).map(|e| e.unwrap().key).collect();

        let expected: BTreeSet<String> = ["index.html", "error.html", "css/site.css", "css/vendor/reset.css"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_walk_paths_are_under_root() {
        let dir = site_tree();
        let root = resolve_root(dir.path()).unwrap();

        for entry in walk_files(&root) {
            let entry = entry.unwrap();
            assert!(entry.path.starts_with(&root));
            assert!(entry.path.is_file());
        }
    }

    #[test]
    fn test_walk_empty_dir() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        assert_eq!(walk_files(&root).count(), 0);
    }

    #[test]
    fn test_resolve_root_missing() {
        let dir = TempDir::new().unwrap();
        let err = resolve_root(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_resolve_root_rejects_file() {
        let dir = site_tree();
        let err = resolve_root(&dir.path().join("index.html")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(m) if m.contains("not a directory")));
    }

    #[test]
    fn test_resolve_root_is_absolute() {
        let dir = site_tree();
        let root = resolve_root(&dir.path().join("css/../css")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("css"));
    }

    #[test]
    fn test_object_key_nested() {
        let key = object_key(Path::new("/site"), Path::new("/site/a/b/c.txt")).unwrap();
        assert_eq!(key, "a/b/c.txt");
    }

    #[test]
    fn test_object_key_outside_root() {
        assert!(object_key(Path::new("/site"), Path::new("/other/c.txt")).is_err());
        assert!(object_key(Path::new("/site"), Path::new("/site")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_is_expanded() {
        let dir = site_tree();
        let link_parent = TempDir::new().unwrap();
        let link = link_parent.path().join("www");
        std::os::unix::fs::symlink(dir.path(), &link).unwrap();

        let root = resolve_root(&link).unwrap();
        assert_eq!(root, std::fs::canonicalize(dir.path()).unwrap());
        assert_eq!(walk_files(&root).count(), 4);
    }
}
