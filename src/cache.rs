//! Caller-owned cache of parsed documents.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    document::{ParseOptions, SourceDocument},
    error::ParseError,
};

/// Parsed documents keyed by path. An entry is reused while the content it
/// was parsed from is unchanged.
#[derive(Debug, Default)]
pub struct DocumentCache {
    options: ParseOptions,
    entries: HashMap<PathBuf, SourceDocument>,
}

impl DocumentCache {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// Return the document for `path`, parsing `content` when there is no
    /// entry or the cached text differs.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of a failed parse. A stale entry is kept in
    /// that case.
    pub fn get_or_parse(
        &mut self,
        path: &Path,
        content: &str,
    ) -> Result<&SourceDocument, ParseError> {
        let file_name = path.to_string_lossy();
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) if entry.get().raw() == content => Ok(entry.into_mut()),
            Entry::Occupied(entry) => {
                debug!(file = %file_name, "content changed, re-parsing");
                let doc = entry.into_mut();
                doc.parse(content, true)?;
                Ok(doc)
            }
            Entry::Vacant(entry) => {
                let doc = SourceDocument::parse_with(file_name.as_ref(), content, self.options)?;
                Ok(entry.insert(doc))
            }
        }
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&SourceDocument> {
        self.entries.get(path)
    }

    /// Drop the entry for `path`, returning whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_entry_for_same_content() {
        let mut cache = DocumentCache::default();
        let path = Path::new("a.ts");
        let first = cache.get_or_parse(path, "a;\nb;").expect("parse").lines()[0].id();
        let again = cache.get_or_parse(path, "a;\nb;").expect("parse").lines()[0].id();
        assert_eq!(first, again);
    }

    #[test]
    fn reparses_changed_content() {
        let mut cache = DocumentCache::default();
        let path = Path::new("a.ts");
        let first = cache.get_or_parse(path, "a;").expect("parse").lines()[0].id();
        let doc = cache.get_or_parse(path, "b;\nc;").expect("parse");
        assert_eq!(doc.raw(), "b;\nc;");
        assert!(doc.line_position(first).is_none());
    }

    #[test]
    fn failed_parse_keeps_previous_entry() {
        let mut cache = DocumentCache::default();
        let path = Path::new("a.ts");
        cache.get_or_parse(path, "a;").expect("parse");
        assert!(cache.get_or_parse(path, "/* open").is_err());
        assert_eq!(cache.get(path).map(SourceDocument::raw), Some("a;"));
    }

    #[test]
    fn invalidate_and_clear_drop_entries() {
        let mut cache = DocumentCache::default();
        cache.get_or_parse(Path::new("a.ts"), "a;").expect("parse");
        cache.get_or_parse(Path::new("b.ts"), "b;").expect("parse");
        assert!(cache.invalidate(Path::new("a.ts")));
        assert!(!cache.invalidate(Path::new("a.ts")));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
