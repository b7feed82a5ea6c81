use std::sync::Arc;

/// Where a node came from: the template file and the 1-based line its markup starts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: Arc<str>,
    line: usize,
}
impl SourceLocation {
    /// Create a new location.
    ///
    /// # Panics
    /// Panics if `line` is 0; lines are counted from 1.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: usize) -> Self {
        assert!(line >= 1, "source lines are 1-based");
        Self {
            file: file.into(),
            line,
        }
    }

    /// Returns the name of the template file.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the shared handle to the file name.
    #[must_use]
    pub fn file_handle(&self) -> &Arc<str> {
        &self.file
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Byte offsets of every line start in a source string.
///
/// Built once per template so that line lookups during parsing are a binary search instead of a
/// rescan from the start of the input.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}
impl LineIndex {
    /// Index the line starts of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// Returns the 1-based line containing the byte at `offset`.
    ///
    /// Offsets past the end of the source map to the last line.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Returns the number of lines in the indexed source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accessors() {
        let loc = SourceLocation::new("index.html", 12);
        assert_eq!(loc.file(), "index.html");
        assert_eq!(loc.line(), 12);
        assert_eq!(loc.to_string(), "index.html:12");
    }

    #[test]
    fn test_file_handle_is_shared() {
        let loc = SourceLocation::new("index.html", 3);
        let next = SourceLocation::new(loc.file_handle().clone(), 4);

        assert!(Arc::ptr_eq(loc.file_handle(), next.file_handle()));
        assert_eq!(next.file(), "index.html");
    }

    #[test]
    #[should_panic(expected = "1-based")]
    fn test_line_zero_panics() {
        let _ = SourceLocation::new("index.html", 0);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(1), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(4), 2);
        assert_eq!(index.line_of(5), 3);
        assert_eq!(index.line_of(6), 4);
        assert_eq!(index.line_of(100), 4);
    }

    #[test]
    fn test_line_index_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_of(0), 1);
    }
}
