use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::Store;

/// Plain-text dedup cache: one identifier per line, append-only.
///
/// The file is read once when the store is opened; later lookups hit the
/// in-memory set. No locking is done, so only one run may use a given file
/// at a time.
pub struct TextFileStore {
    path: PathBuf,
    ids: HashSet<String>,
}

impl TextFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let ids = match fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read dedup cache, starting empty");
                }
                HashSet::new()
            }
        };

        tracing::debug!(path = %path.display(), entries = ids.len(), "dedup cache loaded");
        Self { path, ids }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn append(&self, id: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", id)
    }
}

impl Store for TextFileStore {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id.trim())
    }

    fn record(&mut self, id: &str) {
        let id = id.trim();
        if let Err(e) = self.append(id) {
            tracing::warn!(path = %self.path.display(), id, error = %e, "cannot append to dedup cache");
        }
        // Later duplicates in this run are skipped even if the write failed.
        self.ids.insert(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextFileStore::open(dir.path().join(".cache"));
        assert!(store.is_empty());
        assert!(!store.contains("anything"));
    }

    #[test]
    fn test_contains_trims_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cache");
        fs::write(&path, "  id-1  \r\nid-2\n\n").unwrap();

        let store = TextFileStore::open(&path);
        assert_eq!(store.len(), 2);
        assert!(store.contains("id-1"));
        assert!(store.contains("id-2"));
        assert!(store.contains(" id-2 "));
        assert!(!store.contains("id-3"));
        assert!(!store.contains("id"));
    }

    #[test]
    fn test_record_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cache");
        fs::write(&path, "existing\n").unwrap();

        let mut store = TextFileStore::open(&path);
        store.record("new-id");
        assert!(store.contains("new-id"));

        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nnew-id\n");

        let reopened = TextFileStore::open(&path);
        assert!(reopened.contains("existing"));
        assert!(reopened.contains("new-id"));
    }

    #[test]
    fn test_record_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cache");

        let mut store = TextFileStore::open(&path);
        store.record("id-1");
        assert_eq!(fs::read_to_string(&path).unwrap(), "id-1\n");
    }

    #[test]
    fn test_record_write_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist
        let path = dir.path().join("missing").join(".cache");

        let mut store = TextFileStore::open(&path);
        store.record("id-1");
        assert!(store.contains("id-1"));
        assert!(!path.exists());
    }
}
