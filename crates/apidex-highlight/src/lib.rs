//! Signature highlighting and terminal colors for apidex.
//!
//! Declaration signatures are highlighted as C++, effective configuration as TOML. Plain
//! helpers style headers, match markers, and status messages.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions (including C++ and TOML).
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights a declaration as C++: the qualified name followed by its signature.
    pub fn highlight_signature(&self, qualified_name: &str, signature: &str) -> String {
        self.highlight(&format!("{qualified_name}{signature}"), "cpp")
    }

    /// Highlights content with the specified syntax.
    ///
    /// If the syntax is not found, the content is returned uncolored.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Underlined text.
    pub const UNDERLINE: &str = "\x1b[4m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Underlines the first case-insensitive occurrence of `query` in a display key.
///
/// Returns the key unchanged when the query does not occur, or when the match starts or
/// ends inside the lower-case expansion of a single character.
pub fn mark_match(key: &str, query: &str) -> String {
    if query.is_empty() {
        return key.to_string();
    }

    // (offset in folded text, offset in key) at every character start of `key`
    let mut folded = String::with_capacity(key.len());
    let mut bounds = Vec::with_capacity(key.len() + 1);
    for (idx, ch) in key.char_indices() {
        bounds.push((folded.len(), idx));
        folded.extend(ch.to_lowercase());
    }
    bounds.push((folded.len(), key.len()));

    let folded_query = query.to_lowercase();
    let Some(folded_start) = folded.find(&folded_query) else {
        return key.to_string();
    };
    let to_key = |offset: usize| {
        bounds
            .binary_search_by_key(&offset, |&(folded_offset, _)| folded_offset)
            .ok()
            .and_then(|i| bounds.get(i))
            .map(|&(_, key_offset)| key_offset)
    };

    match (to_key(folded_start), to_key(folded_start + folded_query.len())) {
        (Some(start), Some(end)) => format!(
            "{}{}{}{}{}",
            &key[..start],
            colors::UNDERLINE,
            &key[start..end],
            colors::RESET,
            &key[end..]
        ),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[search]\nlimit = 40\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn highlights_signature() {
        let hl = Highlighter::new();
        let output =
            hl.highlight_signature("pcpp::Packet::insertLayer", "(Layer *prevLayer, Layer *newLayer)");
        assert!(output.contains("\x1b["));
        assert!(output.contains("insertLayer"));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn unknown_syntax_falls_back_to_plain_text() {
        let hl = Highlighter::new();
        let output = hl.highlight("plain", "no-such-syntax");
        assert!(output.contains("plain"));
    }

    #[test]
    fn header_formatting() {
        let h = header("Test");
        assert!(h.contains(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.contains(colors::RESET));
        assert!(h.contains("Test"));
    }

    #[test]
    fn dim_formatting() {
        let d = dim("faint");
        assert!(d.contains(colors::DIM));
        assert!(d.contains(colors::RESET));
    }

    #[test]
    fn marks_case_insensitive_match() {
        assert_eq!(
            mark_match("widgetGetter", "GET"),
            format!("wid{}get{}Getter", colors::UNDERLINE, colors::RESET)
        );
        assert_eq!(mark_match("alpha", "z"), "alpha");
        assert_eq!(mark_match("alpha", ""), "alpha");
    }

    #[test]
    fn marks_match_after_length_changing_folds() {
        // 'İ' folds to three bytes, the Kelvin sign to one
        assert_eq!(
            mark_match("\u{130}\u{130}\u{212A}", "k"),
            format!("\u{130}\u{130}{}\u{212A}{}", colors::UNDERLINE, colors::RESET)
        );
        assert_eq!(
            mark_match("x\u{130}y", "Y"),
            format!("x\u{130}{}y{}", colors::UNDERLINE, colors::RESET)
        );
    }

    #[test]
    fn match_inside_one_character_is_not_marked() {
        // lower-cases to "i" plus a combining dot
        assert_eq!(mark_match("\u{130}", "\u{307}"), "\u{130}");
        assert_eq!(mark_match("a\u{130}b", "i"), "a\u{130}b");
    }

    #[test]
    fn syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("cpp").is_some());
    }
}
