//! Keyword recognition
//!
//! A hand-built finite-state machine over the reserved words of the language.
//! States form a minimal trie: one state per distinct keyword prefix, with the
//! states that spell out a complete keyword marked as accepting. The machine
//! reads one byte per step, so classification is linear in the lexeme length
//! and needs no hashing or string comparison.
//!
//! ```text
//! b-o-o-l        c-h-a-r        e-l-s-e
//! f-a-l-s-e      f-l-o-a-t      f-o-r
//! i-f            i-n-t          p-r-i-n-t-f
//! r-e-t-u-r-n    s-c-a-n-f      t-r-u-e
//! v-o-i-d        w-h-i-l-e
//! ```

use super::token::TokenKind;

/// Trie states. Names spell the prefix read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KwState {
    Start,
    B,
    Bo,
    Boo,
    Bool,
    C,
    Ch,
    Cha,
    Char,
    E,
    El,
    Els,
    Else,
    F,
    Fa,
    Fal,
    Fals,
    False,
    Fl,
    Flo,
    Floa,
    Float,
    Fo,
    For,
    I,
    If,
    In,
    Int,
    P,
    Pr,
    Pri,
    Prin,
    Print,
    Printf,
    R,
    Re,
    Ret,
    Retu,
    Retur,
    Return,
    S,
    Sc,
    Sca,
    Scan,
    Scanf,
    T,
    Tr,
    Tru,
    True,
    V,
    Vo,
    Voi,
    Void,
    W,
    Wh,
    Whi,
    Whil,
    While,
}

impl KwState {
    /// Transition function. `None` means no keyword has this prefix.
    fn step(self, byte: u8) -> Option<KwState> {
        use KwState::*;

        let next = match (self, byte) {
            (Start, b'b') => B,
            (Start, b'c') => C,
            (Start, b'e') => E,
            (Start, b'f') => F,
            (Start, b'i') => I,
            (Start, b'p') => P,
            (Start, b'r') => R,
            (Start, b's') => S,
            (Start, b't') => T,
            (Start, b'v') => V,
            (Start, b'w') => W,

            (B, b'o') => Bo,
            (Bo, b'o') => Boo,
            (Boo, b'l') => Bool,

            (C, b'h') => Ch,
            (Ch, b'a') => Cha,
            (Cha, b'r') => Char,

            (E, b'l') => El,
            (El, b's') => Els,
            (Els, b'e') => Else,

            (F, b'a') => Fa,
            (F, b'l') => Fl,
            (F, b'o') => Fo,
            (Fa, b'l') => Fal,
            (Fal, b's') => Fals,
            (Fals, b'e') => False,
            (Fl, b'o') => Flo,
            (Flo, b'a') => Floa,
            (Floa, b't') => Float,
            (Fo, b'r') => For,

            (I, b'f') => If,
            (I, b'n') => In,
            (In, b't') => Int,

            (P, b'r') => Pr,
            (Pr, b'i') => Pri,
            (Pri, b'n') => Prin,
            (Prin, b't') => Print,
            (Print, b'f') => Printf,

            (R, b'e') => Re,
            (Re, b't') => Ret,
            (Ret, b'u') => Retu,
            (Retu, b'r') => Retur,
            (Retur, b'n') => Return,

            (S, b'c') => Sc,
            (Sc, b'a') => Sca,
            (Sca, b'n') => Scan,
            (Scan, b'f') => Scanf,

            (T, b'r') => Tr,
            (Tr, b'u') => Tru,
            (Tru, b'e') => True,

            (V, b'o') => Vo,
            (Vo, b'i') => Voi,
            (Voi, b'd') => Void,

            (W, b'h') => Wh,
            (Wh, b'i') => Whi,
            (Whi, b'l') => Whil,
            (Whil, b'e') => While,

            _ => return None,
        };

        Some(next)
    }

    /// The keyword spelled by an accepting state.
    fn accepts(self) -> Option<TokenKind> {
        let kind = match self {
            KwState::Bool => TokenKind::Bool,
            KwState::Char => TokenKind::Char,
            KwState::Else => TokenKind::Else,
            KwState::False => TokenKind::False,
            KwState::Float => TokenKind::Float,
            KwState::For => TokenKind::For,
            KwState::If => TokenKind::If,
            KwState::Int => TokenKind::Int,
            KwState::Printf => TokenKind::Printf,
            KwState::Return => TokenKind::Return,
            KwState::Scanf => TokenKind::Scanf,
            KwState::True => TokenKind::True,
            KwState::Void => TokenKind::Void,
            KwState::While => TokenKind::While,
            _ => return None,
        };

        Some(kind)
    }
}

/// Classify an identifier-shaped lexeme as a keyword or [`TokenKind::Identifier`].
pub fn classify(lexeme: &str) -> TokenKind {
    let mut state = KwState::Start;

    for byte in lexeme.bytes() {
        match state.step(byte) {
            Some(next) => state = next,
            None => return TokenKind::Identifier,
        }
    }

    state.accepts().unwrap_or(TokenKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword() {
        let cases = [
            ("bool", TokenKind::Bool),
            ("char", TokenKind::Char),
            ("else", TokenKind::Else),
            ("false", TokenKind::False),
            ("float", TokenKind::Float),
            ("for", TokenKind::For),
            ("if", TokenKind::If),
            ("int", TokenKind::Int),
            ("printf", TokenKind::Printf),
            ("return", TokenKind::Return),
            ("scanf", TokenKind::Scanf),
            ("true", TokenKind::True),
            ("void", TokenKind::Void),
            ("while", TokenKind::While),
        ];

        for (lexeme, kind) in cases {
            assert_eq!(classify(lexeme), kind, "{lexeme}");
            assert!(kind.is_keyword());
        }
    }

    #[test]
    fn test_prefixes_are_identifiers() {
        for lexeme in ["b", "boo", "fl", "fo", "i", "in", "print", "retur", "whil"] {
            assert_eq!(classify(lexeme), TokenKind::Identifier, "{lexeme}");
        }
    }

    #[test]
    fn test_extensions_are_identifiers() {
        for lexeme in ["bools", "integer", "iff", "format", "returns", "whiles", "int_"] {
            assert_eq!(classify(lexeme), TokenKind::Identifier, "{lexeme}");
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(classify("Int"), TokenKind::Identifier);
        assert_eq!(classify("WHILE"), TokenKind::Identifier);
    }

    #[test]
    fn test_empty_and_unrelated() {
        assert_eq!(classify(""), TokenKind::Identifier);
        assert_eq!(classify("x"), TokenKind::Identifier);
        assert_eq!(classify("_if"), TokenKind::Identifier);
    }
}
