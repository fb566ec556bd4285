//! Token definitions shared by the scanner, the parser and the symbol table
//!
//! Unlike a parser that only needs values, every stage here needs the exact
//! lexeme and the kind's stable numeric code, so a [`Token`] is a plain
//! `{ kind, lexeme, location }` record and [`TokenKind`] is a fieldless enum.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All token kinds produced by the scanner.
///
/// The declaration order is significant: a kind's position is its token code
/// in the symbol table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Punctuation
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    Assign,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
    Ampersand,

    Comment,

    // Literals
    Identifier,
    String,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,

    // Keywords
    Bool,
    Char,
    Else,
    False,
    Float,
    For,
    If,
    Int,
    Printf,
    Return,
    Scanf,
    True,
    Void,
    While,

    // Sentinels
    Eof,
    InvalidCharacter,
    InvalidIdentifier,
    InvalidNumber,
}

impl TokenKind {
    /// Every kind, in code order.
    pub const ALL: [TokenKind; 49] = [
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Multiply,
        TokenKind::Divide,
        TokenKind::Modulo,
        TokenKind::Exponent,
        TokenKind::Assign,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::Not,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Ampersand,
        TokenKind::Comment,
        TokenKind::Identifier,
        TokenKind::String,
        TokenKind::IntegerLiteral,
        TokenKind::FloatLiteral,
        TokenKind::CharLiteral,
        TokenKind::Bool,
        TokenKind::Char,
        TokenKind::Else,
        TokenKind::False,
        TokenKind::Float,
        TokenKind::For,
        TokenKind::If,
        TokenKind::Int,
        TokenKind::Printf,
        TokenKind::Return,
        TokenKind::Scanf,
        TokenKind::True,
        TokenKind::Void,
        TokenKind::While,
        TokenKind::Eof,
        TokenKind::InvalidCharacter,
        TokenKind::InvalidIdentifier,
        TokenKind::InvalidNumber,
    ];

    /// Numeric code written to the symbol table.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<TokenKind> {
        Self::ALL.get(code as usize).copied()
    }

    /// Upper-case name used in diagnostics, the symbol table and the tree output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PARENTHESIS",
            TokenKind::RightParen => "RIGHT_PARENTHESIS",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::Exponent => "EXPONENT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Not => "NOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Comment => "COMMENT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::CharLiteral => "CHARACTER_LITERAL",
            TokenKind::Bool => "BOOL",
            TokenKind::Char => "CHAR",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Float => "FLOAT",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Int => "INT",
            TokenKind::Printf => "PRINTF",
            TokenKind::Return => "RETURN",
            TokenKind::Scanf => "SCANF",
            TokenKind::True => "TRUE",
            TokenKind::Void => "VOID",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "TOKEN_EOF",
            TokenKind::InvalidCharacter => "ERROR_INVALID_CHARACTER",
            TokenKind::InvalidIdentifier => "ERROR_INVALID_IDENTIFIER",
            TokenKind::InvalidNumber => "ERROR_INVALID_NUMBER",
        }
    }

    /// Lexical error sentinels. These never reach the parser.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::InvalidCharacter
                | TokenKind::InvalidIdentifier
                | TokenKind::InvalidNumber
        )
    }

    /// Whether tokens of this kind belong in the persisted token list.
    pub fn is_persisted(self) -> bool {
        !self.is_error() && self != TokenKind::Comment
    }

    /// `int`, `float`, `char` or `bool`
    pub fn is_data_type(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Char | TokenKind::Bool
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Char
                | TokenKind::Else
                | TokenKind::False
                | TokenKind::Float
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Int
                | TokenKind::Printf
                | TokenKind::Return
                | TokenKind::Scanf
                | TokenKind::True
                | TokenKind::Void
                | TokenKind::While
        )
    }

    /// Literal kinds that can appear inside a `Const` production.
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Kinds whose lexeme is printed next to the kind name in the tree output.
    pub fn shows_lexeme(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::Identifier
                | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "EOF", location)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            kind => write!(f, "{} '{}'", kind, self.lexeme),
        }
    }
}

/// Re-escape a string token's lexeme so it fits on one line.
///
/// The lexeme holds the translated contents between double quotes; the
/// result is source text the scanner translates back to the same lexeme.
pub fn escape_string_lexeme(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);

    let mut escaped = String::with_capacity(inner.len() + 2);
    escaped.push('"');
    for ch in inner.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped.push('"');
    escaped
}
