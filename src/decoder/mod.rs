//! Export decoding.
//!
//! [`NoteSource`] turns a list of export files into one lazy sequence of
//! notes, so the pipeline consumes a single stream regardless of how many
//! files were given.

pub mod enex;

pub use enex::EnexReader;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::app::{MigrateError, Result};
use crate::domain::Note;

pub struct NoteSource {
    paths: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, EnexReader<BufReader<File>>)>,
}

impl NoteSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into_iter(),
            current: None,
        }
    }
}

impl Iterator for NoteSource {
    /// `Err` is only yielded for files that cannot be opened, which aborts
    /// the run. Decode errors are logged and end the current file.
    type Item = Result<Note>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, reader)) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(note)) => return Some(Ok(note)),
                    Some(Err(e)) => {
                        tracing::warn!(file = %path.display(), error = %e, "failed to decode the next note");
                    }
                    None => {}
                }
                self.current = None;
            }

            let path = self.paths.next()?;
            tracing::info!(file = %path.display(), "Starting to process file");

            match File::open(&path) {
                Ok(file) => {
                    self.current = Some((path, EnexReader::new(BufReader::new(file))));
                }
                Err(source) => {
                    self.paths = Vec::new().into_iter();
                    return Some(Err(MigrateError::OpenInput { path, source }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_export(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("<en-export>{}</en-export>", body)).unwrap();
        path
    }

    #[test]
    fn test_flattens_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_export(
            dir.path(),
            "a.enex",
            "<note><title>a1</title></note><note><title>a2</title></note>",
        );
        let b = write_export(dir.path(), "b.enex", "<note><title>b1</title></note>");

        let titles: Vec<String> = NoteSource::new(vec![a, b])
            .map(|n| n.unwrap().title)
            .collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn test_decode_error_moves_to_next_file() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_export(dir.path(), "bad.enex", "<note><title>x</bad></note>");
        let good = write_export(dir.path(), "good.enex", "<note><title>g</title></note>");

        let notes: Vec<Result<Note>> = NoteSource::new(vec![bad, good]).collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].as_ref().unwrap().title, "g");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_export(dir.path(), "good.enex", "<note><title>g</title></note>");
        let missing = dir.path().join("missing.enex");

        let mut source = NoteSource::new(vec![good.clone(), missing, good]);
        assert_eq!(source.next().unwrap().unwrap().title, "g");

        let err = source.next().unwrap().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, MigrateError::OpenInput { .. }));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_no_files() {
        assert!(NoteSource::new(Vec::new()).next().is_none());
    }
}
