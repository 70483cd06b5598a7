use serde::Serialize;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// Every token and diagnostic in the translator carries byte offsets into the
/// original source string. Line/column pairs are computed on demand via
/// [`LineIndex`] when an error has to be shown to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Pre-computed index of line start positions for byte-offset to
/// (line, column) conversion.
///
/// Built once per source file by scanning for newlines; lookups are a binary
/// search over the recorded line starts.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Build a line index by scanning the source text for newline characters.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Column is measured in bytes from the start of the line (1-based).
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line_idx = line_idx.saturating_sub(1);
        let line = (line_idx as u32) + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// The full text of the 1-based line containing the given offset.
    pub fn line_text<'src>(&self, source: &'src str, offset: u32) -> &'src str {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts[line_idx] as usize;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&s| (s as usize).saturating_sub(1))
            .unwrap_or(source.len());
        &source[start..end]
    }

    /// Return the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_and_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn span_empty() {
        let span = Span::new(3, 3);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn line_index_single_line() {
        let idx = LineIndex::new("hello");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(4), (1, 5));
    }

    #[test]
    fn line_index_multiple_lines() {
        let src = "hello\nworld\nfoo";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(6), (2, 1));
        assert_eq!(idx.line_col(12), (3, 1));
        assert_eq!(idx.line_col(13), (3, 2));
    }

    #[test]
    fn line_index_newline_at_offset() {
        let src = "ab\ncd";
        let idx = LineIndex::new(src);
        // '\n' is at offset 2 -- still line 1, col 3.
        assert_eq!(idx.line_col(2), (1, 3));
        assert_eq!(idx.line_col(3), (2, 1));
    }

    #[test]
    fn line_index_line_text() {
        let src = "let x;\nmut y;\n";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_text(src, 0), "let x;");
        assert_eq!(idx.line_text(src, 9), "mut y;");
    }

    #[test]
    fn line_index_line_count() {
        let idx = LineIndex::new("a\nb\nc");
        assert_eq!(idx.line_count(), 3);
    }
}
