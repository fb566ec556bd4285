//! Random-access token sequence consumed by the parser

use super::token::{SourceLocation, Token, TokenKind};

/// Filtered tokens plus a forward-only cursor.
///
/// Comments and lexical error sentinels are dropped on construction, and the
/// sequence always ends with exactly one `TOKEN_EOF`, so every peek past the
/// last real token lands on it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut end = SourceLocation::default();
        let mut filtered: Vec<Token> = Vec::with_capacity(tokens.len());

        for token in tokens {
            if token.is(TokenKind::Eof) {
                end = token.location;
                break;
            }
            if token.kind.is_persisted() {
                filtered.push(token);
            }
        }

        filtered.push(Token::eof(end));
        Self {
            tokens: filtered,
            cursor: 0,
        }
    }

    /// Current token.
    pub fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    /// Token `n` positions past the cursor, clamped to `TOKEN_EOF`.
    pub fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + n).min(last)]
    }

    /// Consume the current token. The cursor never moves past `TOKEN_EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is(TokenKind::Eof) {
            self.cursor += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
