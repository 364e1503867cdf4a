//! Search data parser.
//!
//! Parses a token stream into a [`Literal`] tree using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! file    → ("var" IDENT "=")? value ";"? EOF
//! value   → STRING | NUMBER | "null" | list
//! list    → "[" (value ("," value)* ","?)? "]"
//! ```

use crate::{
    error::SyntaxError,
    lexer::{Spanned, Token, tokenize},
};

/// A JavaScript literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A string.
    Str(String),
    /// An integer.
    Number(i64),
    /// `null`.
    Null,
    /// An array.
    List(Vec<Literal>),
}

impl Literal {
    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Recursive descent parser for search data.
struct Parser<'a> {
    /// The original input, for error context.
    input: &'a str,
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current position in the token stream.
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream.
    fn new(input: &'a str, tokens: Vec<Spanned>) -> Self {
        Self {
            input,
            tokens,
            position: 0,
        }
    }

    /// Parses: file → ("var" IDENT "=")? value ";"? EOF
    fn parse_file(mut self) -> Result<Literal, SyntaxError> {
        if matches!(self.peek(), Some(Token::Ident(word)) if word == "var") {
            self.advance();
            match self.peek() {
                Some(Token::Ident(_)) => self.advance(),
                _ => return Err(self.error("expected variable name after 'var'")),
            }
            self.expect(&Token::Equals, "expected '=' after variable name")?;
        }

        let value = self.parse_value()?;

        if self.check(&Token::Semicolon) {
            self.advance();
        }
        if self.peek().is_some() {
            return Err(self.error("unexpected content after value"));
        }

        Ok(value)
    }

    /// Parses: value → STRING | NUMBER | "null" | list
    fn parse_value(&mut self) -> Result<Literal, SyntaxError> {
        let value = match self.peek() {
            Some(Token::LBracket) => return self.parse_list(),
            Some(Token::Str(s)) => Literal::Str(s.clone()),
            Some(Token::Number(n)) => Literal::Number(*n),
            Some(Token::Ident(word)) if word == "null" => Literal::Null,
            Some(token) => {
                let message = format!("expected a value, found {}", describe(token));
                return Err(self.error(message));
            }
            None => return Err(self.error("unexpected end of input")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses: list → "[" (value ("," value)* ","?)? "]"
    fn parse_list(&mut self) -> Result<Literal, SyntaxError> {
        self.advance(); // consume [
        let mut items = Vec::new();

        loop {
            if self.check(&Token::RBracket) {
                self.advance();
                return Ok(Literal::List(items));
            }

            items.push(self.parse_value()?);

            match self.peek() {
                Some(Token::Comma) => self.advance(),
                Some(Token::RBracket) => {}
                Some(token) => {
                    let message = format!("expected ',' or ']', found {}", describe(token));
                    return Err(self.error(message));
                }
                None => return Err(self.error("unclosed '['")),
            }
        }
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|s| &s.token)
    }

    /// Checks if the current token matches.
    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    /// Consumes the current token.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Consumes `token` or fails with `message`.
    fn expect(&mut self, token: &Token, message: &str) -> Result<(), SyntaxError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Creates an error at the current token, or at end of input.
    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let position = self
            .tokens
            .get(self.position)
            .map_or(self.input.len(), |s| s.position);
        SyntaxError::new(message, position, self.input)
    }
}

/// Names a token for error messages.
fn describe(token: &Token) -> String {
    match token {
        Token::LBracket => "'['".into(),
        Token::RBracket => "']'".into(),
        Token::Comma => "','".into(),
        Token::Equals => "'='".into(),
        Token::Semicolon => "';'".into(),
        Token::Str(_) => "a string".into(),
        Token::Number(n) => format!("number {n}"),
        Token::Ident(word) => format!("'{word}'"),
    }
}

/// Parses search data into a literal tree.
pub fn parse(input: &str) -> Result<Literal, SyntaxError> {
    let tokens = tokenize(input)?;
    Parser::new(input, tokens).parse_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Literal {
        Literal::Str(text.into())
    }

    #[test]
    fn parses_search_data_row() {
        let input = "var searchData=\n[\n  ['init_3384',['init',['../a.html#x',1,'pcpp::A::init()']]]\n];\n";
        let value = parse(input).unwrap();
        assert_eq!(
            value,
            Literal::List(vec![Literal::List(vec![
                s("init_3384"),
                Literal::List(vec![
                    s("init"),
                    Literal::List(vec![s("../a.html#x"), Literal::Number(1), s("pcpp::A::init()")]),
                ]),
            ])])
        );
    }

    #[test]
    fn bare_value_without_header() {
        assert_eq!(parse("[]").unwrap(), Literal::List(vec![]));
        assert_eq!(parse("null").unwrap(), Literal::Null);
    }

    #[test]
    fn trailing_comma_allowed() {
        assert_eq!(
            parse("[1,2,]").unwrap(),
            Literal::List(vec![Literal::Number(1), Literal::Number(2)])
        );
    }

    #[test]
    fn missing_comma_reports_position() {
        let err = parse("var d=\n['a' 'b'];").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 6);
        assert!(err.message.contains("expected ',' or ']'"));
    }

    #[test]
    fn unclosed_list() {
        let err = parse("[1, 2").unwrap_err();
        assert!(err.message.contains("unclosed"));
        assert_eq!(err.position, 5);
    }

    #[test]
    fn missing_equals() {
        let err = parse("var searchData [1]").unwrap_err();
        assert!(err.message.contains("'='"));
    }

    #[test]
    fn trailing_garbage() {
        let err = parse("[1]; [2]").unwrap_err();
        assert!(err.message.contains("after value"));
        assert_eq!(err.position, 5);
    }

    #[test]
    fn empty_input_is_error() {
        let err = parse("").unwrap_err();
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn accessors() {
        let value = parse("['a', [1]]").unwrap();
        let items = value.as_list().unwrap();
        assert_eq!(items[0].as_str(), Some("a"));
        assert!(items[1].as_str().is_none());
        assert_eq!(items[1].as_list().map(<[Literal]>::len), Some(1));
    }
}
