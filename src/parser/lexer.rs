//! Scanner (tokenizer) for core source code
//!
//! Converts raw source text into a flat [`Token`] stream. Lexical errors never
//! stop the scanner: the offending characters are consumed, a sentinel token
//! (`ERROR_INVALID_*`) takes their slot, the error is recorded, and scanning
//! continues with the next character. Comments are returned as tokens too;
//! dropping them (and the sentinels) is the consumer's job.

use super::keywords;
use super::token::{SourceLocation, Token, TokenKind};
use thiserror::Error;

/// Longest identifier the scanner accepts.
pub const MAX_IDENTIFIER_LEN: usize = 31;

/// Number of digits that must follow a digit-grouping separator.
const DIGIT_GROUP_LEN: usize = 3;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character '{ch}' at {location}")]
    InvalidCharacter { ch: char, location: SourceLocation },

    #[error("invalid identifier '{lexeme}' at {location}: longer than {max} characters")]
    IdentifierTooLong {
        lexeme: String,
        max: usize,
        location: SourceLocation,
    },

    #[error("unterminated string literal at {location}")]
    UnterminatedString { location: SourceLocation },

    #[error("invalid or unterminated character literal at {location}")]
    InvalidCharLiteral { location: SourceLocation },

    #[error("invalid noise separators in numeric literal '{lexeme}' at {location}")]
    InvalidDigitGrouping {
        lexeme: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidCharacter { location, .. }
            | LexError::IdentifierTooLong { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::InvalidCharLiteral { location }
            | LexError::InvalidDigitGrouping { location, .. } => *location,
        }
    }
}

/// Scanner for core source code
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    max_identifier_len: usize,
    errors: Vec<LexError>,
}

impl Scanner {
    /// Create a new scanner for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            max_identifier_len: MAX_IDENTIFIER_LEN,
            errors: Vec::new(),
        }
    }

    pub fn with_max_identifier_len(mut self, max: usize) -> Self {
        self.max_identifier_len = max;
        self
    }

    /// Lexical errors recorded so far, in source order.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Number of characters consumed so far.
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Scan the entire input, including comments and error sentinels.
    ///
    /// The result always ends with exactly one `TOKEN_EOF`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "scanning finished"
        );
        tokens
    }

    /// Produce the next token. Once the input is exhausted every call returns
    /// `TOKEN_EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let loc = self.current_location();
        let Some(ch) = self.peek() else {
            return Token::eof(loc);
        };

        let token = match ch {
            // String literals
            '"' => self.string_literal(loc),

            // Numeric literals, including a leading decimal point
            '0'..='9' => self.number_literal(loc),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.number_literal(loc)
            }

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(loc),

            // Character literals
            '\'' => self.char_literal(loc),

            // Line comments
            '/' if self.peek_ahead(1) == Some('/') => self.line_comment(loc),

            _ => self.operator(ch, loc),
        };

        tracing::trace!(
            kind = %token.kind,
            lexeme = %token.lexeme,
            line = token.location.line,
            column = token.location.column,
            "next token"
        );
        token
    }

    /// Punctuation and one- or two-character operators
    fn operator(&mut self, ch: char, loc: SourceLocation) -> Token {
        self.advance();

        let single = |kind: TokenKind| Token::new(kind, ch.to_string(), loc);

        match ch {
            '(' => single(TokenKind::LeftParen),
            ')' => single(TokenKind::RightParen),
            '[' => single(TokenKind::LeftBracket),
            ']' => single(TokenKind::RightBracket),
            '{' => single(TokenKind::LeftBrace),
            '}' => single(TokenKind::RightBrace),
            ',' => single(TokenKind::Comma),
            ';' => single(TokenKind::Semicolon),
            '+' => single(TokenKind::Plus),
            '-' => single(TokenKind::Minus),
            '*' => single(TokenKind::Multiply),
            '/' => single(TokenKind::Divide),
            '%' => single(TokenKind::Modulo),
            '^' => single(TokenKind::Exponent),

            '=' => self.one_or_two(ch, '=', TokenKind::Equal, Some(TokenKind::Assign), loc),
            '!' => self.one_or_two(ch, '=', TokenKind::NotEqual, Some(TokenKind::Not), loc),
            '<' => self.one_or_two(ch, '=', TokenKind::LessEqual, Some(TokenKind::Less), loc),
            '>' => self.one_or_two(
                ch,
                '=',
                TokenKind::GreaterEqual,
                Some(TokenKind::Greater),
                loc,
            ),
            '&' => self.one_or_two(ch, '&', TokenKind::And, Some(TokenKind::Ampersand), loc),
            '|' => self.one_or_two(ch, '|', TokenKind::Or, None, loc),

            _ => self.invalid_character(ch, loc),
        }
    }

    /// Recognize `first second` as `double`, falling back to `single` (or an
    /// invalid character when the operator has no one-character form).
    fn one_or_two(
        &mut self,
        first: char,
        second: char,
        double: TokenKind,
        single: Option<TokenKind>,
        loc: SourceLocation,
    ) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            return Token::new(double, format!("{first}{second}"), loc);
        }

        match single {
            Some(kind) => Token::new(kind, first.to_string(), loc),
            None => self.invalid_character(first, loc),
        }
    }

    fn invalid_character(&mut self, ch: char, loc: SourceLocation) -> Token {
        self.error(LexError::InvalidCharacter { ch, location: loc });
        Token::new(TokenKind::InvalidCharacter, ch.to_string(), loc)
    }

    /// Parse string literal. The lexeme is the translated contents in quotes.
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        self.advance(); // opening quote
        let mut contents = String::new();
        let mut raw = String::from('"');

        while let Some(ch) = self.advance() {
            raw.push(ch);

            match ch {
                '"' => return Token::new(TokenKind::String, format!("\"{contents}\""), loc),
                '\\' => {
                    let Some(escaped) = self.advance() else {
                        break;
                    };
                    raw.push(escaped);

                    match escaped {
                        'n' => contents.push('\n'),
                        't' => contents.push('\t'),
                        '\\' => contents.push('\\'),
                        '"' => contents.push('"'),
                        other => {
                            tracing::warn!(
                                line = self.line,
                                column = self.column,
                                "unrecognized escape sequence '\\{other}' kept as written"
                            );
                            contents.push('\\');
                            contents.push(other);
                        }
                    }
                }
                _ => contents.push(ch),
            }
        }

        self.error(LexError::UnterminatedString { location: loc });
        Token::new(TokenKind::InvalidCharacter, raw, loc)
    }

    /// Parse character literal: one raw character or one escape, then `'`.
    fn char_literal(&mut self, loc: SourceLocation) -> Token {
        self.advance(); // opening quote
        let mut raw = String::from('\'');

        let has_body = match self.peek() {
            Some('\\') => {
                self.advance();
                raw.push('\\');
                match self.peek() {
                    Some(escaped) if escaped != '\n' => {
                        self.advance();
                        raw.push(escaped);
                        true
                    }
                    _ => false,
                }
            }
            Some('\'') | Some('\n') | None => false,
            Some(ch) => {
                self.advance();
                raw.push(ch);
                true
            }
        };

        if has_body && self.peek() == Some('\'') {
            self.advance();
            raw.push('\'');
            return Token::new(TokenKind::CharLiteral, raw, loc);
        }

        // Resynchronize after the next quote on this line
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
            raw.push(ch);
            if ch == '\'' {
                break;
            }
        }

        self.error(LexError::InvalidCharLiteral { location: loc });
        Token::new(TokenKind::InvalidCharacter, raw, loc)
    }

    /// Parse numeric literal with optional decimal point and noise separators
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut normalized = String::new();
        let mut raw = String::new();
        let mut has_decimal = false;
        let mut malformed = false;

        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => {
                    self.advance();
                    raw.push(ch);
                    normalized.push(ch);
                }
                '.' => {
                    // A second decimal point ends the literal
                    if has_decimal {
                        break;
                    }
                    has_decimal = true;
                    self.advance();
                    raw.push(ch);
                    normalized.push(ch);
                }
                '\'' | '`' => {
                    self.advance();
                    raw.push(ch);

                    let mut group = 0;
                    while group < DIGIT_GROUP_LEN {
                        match self.peek() {
                            Some(digit) if digit.is_ascii_digit() => {
                                self.advance();
                                raw.push(digit);
                                normalized.push(digit);
                                group += 1;
                            }
                            _ => break,
                        }
                    }

                    let overlong = self.peek().is_some_and(|c| c.is_ascii_digit());
                    if group != DIGIT_GROUP_LEN || overlong {
                        malformed = true;
                        break;
                    }
                }
                _ => break,
            }
        }

        if malformed {
            // Swallow the rest of the literal so scanning resumes after it
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() || matches!(ch, '\'' | '`' | '.') {
                    self.advance();
                    raw.push(ch);
                } else {
                    break;
                }
            }

            self.error(LexError::InvalidDigitGrouping {
                lexeme: raw.clone(),
                location: loc,
            });
            return Token::new(TokenKind::InvalidNumber, raw, loc);
        }

        if normalized.starts_with('.') {
            normalized.insert(0, '0');
        }
        if normalized.ends_with('.') {
            normalized.push('0');
        }

        let kind = if has_decimal {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        Token::new(kind, normalized, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if ident.len() > self.max_identifier_len {
            self.error(LexError::IdentifierTooLong {
                lexeme: ident.clone(),
                max: self.max_identifier_len,
                location: loc,
            });
            return Token::new(TokenKind::InvalidIdentifier, ident, loc);
        }

        Token::new(keywords::classify(&ident), ident, loc)
    }

    /// Line comment (// ...), up to but not including the newline
    fn line_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Comment, text, loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn error(&mut self, err: LexError) {
        tracing::error!("{err}");
        self.errors.push(err);
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> (Token, Vec<LexError>) {
        let mut scanner = Scanner::new(source);
        let token = scanner.next_token();
        (token, scanner.into_errors())
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Scanner::new("int main() { return 0; }").tokenize();

        let expected = [
            (TokenKind::Int, "int"),
            (TokenKind::Identifier, "main"),
            (TokenKind::LeftParen, "("),
            (TokenKind::RightParen, ")"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::IntegerLiteral, "0"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::Eof, "EOF"),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, lexeme)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.lexeme, lexeme);
        }
    }

    #[test]
    fn test_positions() {
        let tokens = Scanner::new("int x;\n  float y;").tokenize();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 6));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 9));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
        let eof = scanner.next_token();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.lexeme, "EOF");
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != <= >= && || = ! < > & ^ %"),
            vec![
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Assign,
                TokenKind::Not,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Ampersand,
                TokenKind::Exponent,
                TokenKind::Modulo,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_fallback_needs_one_lookahead() {
        assert_eq!(
            kinds("a=-b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Minus,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_pipe_is_invalid() {
        let (token, errors) = single("| x");
        assert_eq!(token.kind, TokenKind::InvalidCharacter);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_comments_are_tokens() {
        let tokens = Scanner::new("int x; // trailing note\nint y;").tokenize();

        assert_eq!(tokens[3].kind, TokenKind::Comment);
        assert_eq!(tokens[3].lexeme, "// trailing note");
        assert_eq!(tokens[4].kind, TokenKind::Int);
        assert_eq!(tokens[4].location.line, 2);
    }

    #[test]
    fn test_divide_is_not_comment() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Divide,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal_escapes() {
        let (token, errors) = single(r#""hello\n\t\\\"world""#);
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"hello\n\t\\\"world\"");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        let (token, errors) = single(r#""a\qb""#);
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"a\\qb\"");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unterminated_string() {
        let (token, errors) = single("\"never closed");
        assert_eq!(token.kind, TokenKind::InvalidCharacter);
        assert_eq!(
            errors,
            vec![LexError::UnterminatedString {
                location: SourceLocation::new(1, 1)
            }]
        );
    }

    #[test]
    fn test_char_literals() {
        for source in ["'a'", "'\\n'", "'\\''", "' '"] {
            let (token, errors) = single(source);
            assert_eq!(token.kind, TokenKind::CharLiteral, "{source}");
            assert_eq!(token.lexeme, source);
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn test_malformed_char_literals() {
        for source in ["''", "'ab'", "'a", "'", "'\\"] {
            let (token, errors) = single(source);
            assert_eq!(token.kind, TokenKind::InvalidCharacter, "{source}");
            assert_eq!(errors.len(), 1, "{source}");
        }
    }

    #[test]
    fn test_malformed_char_literal_resynchronizes() {
        let mut scanner = Scanner::new("'ab' x");
        let tokens = scanner.tokenize();
        assert_eq!(tokens[0].kind, TokenKind::InvalidCharacter);
        assert_eq!(tokens[0].lexeme, "'ab'");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "x");
    }

    #[test]
    fn test_numbers() {
        let cases = [
            ("42", TokenKind::IntegerLiteral, "42"),
            ("3.14", TokenKind::FloatLiteral, "3.14"),
            (".5", TokenKind::FloatLiteral, "0.5"),
            ("5.", TokenKind::FloatLiteral, "5.0"),
            ("1'234'567", TokenKind::IntegerLiteral, "1234567"),
            ("1`000", TokenKind::IntegerLiteral, "1000"),
            ("12'345.678'9", TokenKind::InvalidNumber, "12'345.678'9"),
            ("1'234.5", TokenKind::FloatLiteral, "1234.5"),
        ];

        for (source, kind, lexeme) in cases {
            let (token, _) = single(source);
            assert_eq!(token.kind, kind, "{source}");
            assert_eq!(token.lexeme, lexeme, "{source}");
        }
    }

    #[test]
    fn test_second_decimal_point_ends_literal() {
        let tokens = Scanner::new("1.2.3").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].lexeme, "1.2");
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].lexeme, "0.3");
    }

    #[test]
    fn test_bad_digit_grouping() {
        for source in ["1'23'456", "1'2345", "1'", "12'3"] {
            let mut scanner = Scanner::new(source);
            let tokens = scanner.tokenize();
            assert_eq!(tokens[0].kind, TokenKind::InvalidNumber, "{source}");
            assert_eq!(tokens[0].lexeme, source, "{source}");
            assert_eq!(tokens[1].kind, TokenKind::Eof, "{source}");
            assert!(matches!(
                scanner.errors(),
                [LexError::InvalidDigitGrouping { .. }]
            ));
        }
    }

    #[test]
    fn test_identifier_length_boundary() {
        let ok = "a".repeat(MAX_IDENTIFIER_LEN);
        let (token, errors) = single(&ok);
        assert_eq!(token.kind, TokenKind::Identifier);
        assert!(errors.is_empty());

        let too_long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        let (token, errors) = single(&too_long);
        assert_eq!(token.kind, TokenKind::InvalidIdentifier);
        assert_eq!(token.lexeme, too_long);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_keywords_are_classified() {
        assert_eq!(
            kinds("while whilex printf"),
            vec![
                TokenKind::While,
                TokenKind::Identifier,
                TokenKind::Printf,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_invalid_character_continues() {
        let mut scanner = Scanner::new("a @ b");
        let tokens = scanner.tokenize();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Identifier,
                TokenKind::InvalidCharacter,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            scanner.errors(),
            &[LexError::InvalidCharacter {
                ch: '@',
                location: SourceLocation::new(1, 3)
            }]
        );
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        let (token, _) = single(". x");
        assert_eq!(token.kind, TokenKind::InvalidCharacter);
    }
}
