//! Search data lexer.
//!
//! Doxygen writes its search index as JavaScript: `var searchData=[ ... ];`. Only the
//! literal subset it emits is recognized: quoted strings, integers, identifiers such as
//! `var` and `null`, brackets, commas, `=`, and `;`.

use std::{iter::Peekable, str::CharIndices};

use crate::error::SyntaxError;

/// A token in search data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// A quoted string with escapes resolved.
    Str(String),
    /// An integer.
    Number(i64),
    /// A bare identifier (`var`, `searchData`, `null`).
    Ident(String),
}

/// A token and the byte position it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    /// The token.
    pub(crate) token: Token,
    /// Byte position in the input.
    pub(crate) position: usize,
}

/// Tokenizes search data.
struct Lexer<'a> {
    /// The original input.
    input: &'a str,
    /// Characters with byte offsets and one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> SyntaxError {
        SyntaxError::new(message, position, self.input)
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Result<Vec<Spanned>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input.
    fn next_token(&mut self) -> Result<Option<Spanned>, SyntaxError> {
        self.skip_whitespace();

        let Some(&(position, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '[' | ']' | ',' | '=' | ';' => {
                self.chars.next();
                match ch {
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ',' => Token::Comma,
                    '=' => Token::Equals,
                    _ => Token::Semicolon,
                }
            }
            '\'' | '"' => self.read_string(position, ch)?,
            '-' | '0'..='9' => self.read_number(position)?,
            c if c.is_alphabetic() || c == '_' || c == '$' => self.read_ident(),
            other => {
                return Err(self.error_at(format!("unexpected character '{other}'"), position));
            }
        };

        Ok(Some(Spanned { token, position }))
    }

    /// Reads a string delimited by `quote`, resolving backslash escapes.
    fn read_string(&mut self, start: usize, quote: char) -> Result<Token, SyntaxError> {
        self.chars.next();
        let mut content = String::new();

        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(Token::Str(content)),
                Some((pos, '\\')) => content.push(self.read_escape(pos)?),
                Some((_, c)) => content.push(c),
                None => return Err(self.error_at("unclosed string", start)),
            }
        }
    }

    /// Reads the character after a backslash.
    fn read_escape(&mut self, start: usize) -> Result<char, SyntaxError> {
        match self.chars.next() {
            Some((_, 'n')) => Ok('\n'),
            Some((_, 't')) => Ok('\t'),
            Some((_, 'r')) => Ok('\r'),
            Some((_, 'u')) => {
                let mut hex = String::new();
                for _ in 0..4 {
                    match self.chars.next() {
                        Some((_, c)) if c.is_ascii_hexdigit() => hex.push(c),
                        _ => return Err(self.error_at("invalid \\u escape", start)),
                    }
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error_at("invalid \\u escape", start))
            }
            Some((_, c)) => Ok(c),
            None => Err(self.error_at("unclosed string", start)),
        }
    }

    /// Reads an optionally negative integer.
    fn read_number(&mut self, start: usize) -> Result<Token, SyntaxError> {
        let mut end = start;
        if let Some(&(_, '-')) = self.chars.peek() {
            self.chars.next();
            end += 1;
        }
        while let Some(&(pos, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.chars.next();
            end = pos + 1;
        }

        let text = &self.input[start..end];
        text.parse()
            .map(Token::Number)
            .map_err(|_| self.error_at(format!("invalid number '{text}'"), start))
    }

    /// Reads an identifier.
    fn read_ident(&mut self) -> Token {
        let mut word = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_' || c == '$') {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        Token::Ident(word)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }
}

/// Tokenizes search data.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, SyntaxError> {
    Lexer::new(input).tokenize()
}
