pub mod text_file;

pub use text_file::TextFileStore;

/// Durable set of identifiers that were already published.
///
/// Both operations are best-effort: read failures look like a miss and write
/// failures are dropped, so a broken store can at worst cause a harmless
/// re-publish attempt on a later run.
pub trait Store {
    fn contains(&self, id: &str) -> bool;
    fn record(&mut self, id: &str);
}
