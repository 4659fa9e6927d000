//! Output buffer with indentation tracking
//!
//! Collects generated source, indenting each new line to the current level and tracking the cursor position.

/// Append-only text sink that tracks indentation and the current line/column
#[derive(Debug)]
pub struct Buffer {
    /// The output text
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indentation level
    indent_width: usize,
    /// Whether the next write starts a new line
    at_line_start: bool,
    /// 0-based line of the cursor
    line: usize,
    /// 0-based column of the cursor, in characters
    column: usize,
}

impl Buffer {
    /// Create an empty buffer
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
            line: 0,
            column: 0,
        }
    }

    /// Get the output text
    pub fn finish(self) -> String {
        self.output
    }

    /// Empty buffer at the same indentation level, for rendering a fragment that is spliced in mid-line
    pub fn fork(&self) -> Self {
        Self {
            output: String::new(),
            indent_level: self.indent_level,
            indent_width: self.indent_width,
            at_line_start: false,
            line: 0,
            column: 0,
        }
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.indent_width;
            self.output.push_str(&" ".repeat(width));
            self.column += width;
            self.at_line_start = false;
        }
    }

    /// Write text, indenting first when at the start of a line
    ///
    /// ## Notes
    /// - Text after an embedded newline is not indented; multi-line fragments are written verbatim.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
        for c in s.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.at_line_start = s.ends_with('\n');
    }

    /// Write a line break
    pub fn nl(&mut self) {
        self.output.push('\n');
        self.line += 1;
        self.column = 0;
        self.at_line_start = true;
    }

    /// 0-based line of the cursor
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based column of the cursor
    pub fn column(&self) -> usize {
        self.column
    }

    /// Current indentation level
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Write
    // ========================================

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = Buffer::new(2);
        assert!(buffer.is_empty());
        assert_eq!(buffer.finish(), "");
    }

    #[test]
    fn test_write_empty_string_is_ignored() {
        let mut buffer = Buffer::new(2);
        buffer.indent();
        buffer.write("");
        assert_eq!(buffer.column(), 0);
        assert_eq!(buffer.finish(), "");
    }

    #[test]
    fn test_write_tracks_position() {
        let mut buffer = Buffer::new(2);
        buffer.write("ab");
        buffer.nl();
        buffer.write("cde");
        assert_eq!((buffer.line(), buffer.column()), (1, 3));
        assert_eq!(buffer.finish(), "ab\ncde");
    }

    #[test]
    fn test_embedded_newlines_update_position() {
        let mut buffer = Buffer::new(2);
        buffer.write("a\nbc");
        assert_eq!((buffer.line(), buffer.column()), (1, 2));
    }

    #[test]
    fn test_column_counts_characters() {
        let mut buffer = Buffer::new(2);
        buffer.write("é");
        assert_eq!(buffer.column(), 1);
    }

    // ========================================
    // Indentation
    // ========================================

    #[test]
    fn test_indent_applies_at_line_start() {
        let mut buffer = Buffer::new(2);
        buffer.write("module A");
        buffer.indent();
        buffer.nl();
        buffer.write("1");
        buffer.write(" + 2");
        buffer.dedent();
        buffer.nl();
        buffer.write("end");
        assert_eq!(buffer.finish(), "module A\n  1 + 2\nend");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut buffer = Buffer::new(4);
        buffer.dedent();
        assert_eq!(buffer.indent_level(), 0);
        buffer.indent();
        buffer.indent();
        buffer.nl();
        buffer.write("x");
        assert_eq!(buffer.column(), 9);
    }

    #[test]
    fn test_fork_keeps_level_but_not_output() {
        let mut buffer = Buffer::new(2);
        buffer.indent();
        buffer.write("x = ");
        let mut fork = buffer.fork();
        fork.write("1");
        assert_eq!(fork.indent_level(), 1);
        assert_eq!(fork.finish(), "1");
    }
}
