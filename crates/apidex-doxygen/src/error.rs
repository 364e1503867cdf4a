//! Error types for reading Doxygen search data.

use std::{error::Error, fmt, io, path::PathBuf};

use apidex_config::ConfigError;
use thiserror::Error;

/// Widest slice of a line shown in a syntax error.
const CONTEXT_WIDTH: usize = 72;

/// A search data file that does not tokenize or parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Error message.
    pub message: String,
    /// Byte position in the input where the error occurred.
    pub position: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column, in characters.
    pub column: usize,
    /// Text of the offending line.
    pub line_text: String,
}

impl SyntaxError {
    /// Creates an error at a byte position in `input`.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        let position = position.min(input.len());
        let before = input.get(..position).unwrap_or(input);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = input[line_start..]
            .find('\n')
            .map_or(input.len(), |i| line_start + i);

        Self {
            message: message.into(),
            position,
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            line_text: input[line_start..line_end].trim_end_matches('\r').to_string(),
        }
    }

    /// Formats the error with the offending line and a caret under the error position.
    ///
    /// Long lines are clipped to a window around the caret.
    pub fn format_with_context(&self) -> String {
        let caret = self.column - 1;
        let skip = caret.saturating_sub(CONTEXT_WIDTH / 2);
        let shown: String = self
            .line_text
            .chars()
            .skip(skip)
            .take(CONTEXT_WIDTH)
            .collect();

        let mut result = String::new();
        result.push_str(&format!(
            "search data syntax error at line {}, column {}: {}\n",
            self.line, self.column, self.message
        ));
        result.push_str(&format!("  {shown}\n"));
        result.push_str(&format!("  {}^", " ".repeat(caret - skip)));
        result
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl Error for SyntaxError {}

/// Errors importing a Doxygen search directory.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to list the search directory.
    #[error("failed to read search directory {path}: {source}")]
    ReadDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read a search data file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A search data file is not a valid JavaScript literal.
    #[error("{path}: {source}")]
    Syntax {
        /// File path.
        path: PathBuf,
        /// Position and context of the failure.
        source: SyntaxError,
    },

    /// A search data file parsed but its rows have an unexpected shape.
    #[error("{path}: row {row}: {message}")]
    Shape {
        /// File path.
        path: PathBuf,
        /// Zero-based row index.
        row: usize,
        /// What was wrong.
        message: String,
    },

    /// The source's include/exclude patterns failed to compile.
    #[error(transparent)]
    Patterns(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_line_and_column() {
        let err = SyntaxError::new("expected ','", 16, "var x=\n[\n  ['a' 'b']\n];");
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 8);
        assert_eq!(err.line_text, "  ['a' 'b']");
    }

    #[test]
    fn context_places_caret() {
        let err = SyntaxError::new("unexpected character", 4, "[1, @]");
        let text = err.format_with_context();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "search data syntax error at line 1, column 5: unexpected character"
        );
        assert_eq!(lines[1], "  [1, @]");
        assert_eq!(lines[2], "      ^");
    }

    #[test]
    fn context_clips_long_lines() {
        let input = format!("{}@{}", "a".repeat(200), "b".repeat(200));
        let err = SyntaxError::new("unexpected character", 200, &input);
        let text = err.format_with_context();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].chars().count(), 2 + CONTEXT_WIDTH);
        let caret_col = lines[2].find('^').unwrap();
        assert_eq!(lines[1].chars().nth(caret_col), Some('@'));
    }

    #[test]
    fn position_past_end_is_clamped() {
        let err = SyntaxError::new("unexpected end of input", 99, "[1,");
        assert_eq!(err.position, 3);
        assert_eq!(err.column, 4);
    }
}
