// Integration tests for the scanner

use corec::parser::{LexError, Scanner, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Scanner::new(source)
        .tokenize()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_full_program() {
    let source = r#"
        // sum the first n numbers
        int sum(int n) {
            int total = 0;
            for (int i = 1; i <= n; i = i + 1) {
                total = total + i;
            }
            return total;
        }
    "#;

    let mut scanner = Scanner::new(source);
    let tokens = scanner.tokenize();

    assert!(scanner.errors().is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].location.line, 3);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

    let keywords = tokens.iter().filter(|t| t.kind.is_keyword()).count();
    // int int int for int return
    assert_eq!(keywords, 6);
}

#[test]
fn test_every_operator() {
    assert_eq!(
        kinds("+ - * / % ^ = == != < <= > >= ! && || &"),
        vec![
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
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    assert_eq!(
        kinds("in integer whiles iff floaty printf_ ret"),
        vec![TokenKind::Identifier; 7]
            .into_iter()
            .chain([TokenKind::Eof])
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_grouped_numbers_drop_separators() {
    let tokens = Scanner::new("x = 1'000'000 + 2`500.25;").tokenize();
    assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[2].lexeme, "1000000");
    assert_eq!(tokens[4].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[4].lexeme, "2500.25");
}

#[test]
fn test_errors_do_not_stop_scanning() {
    let source = "int a = 1'23;\nchar c = 'xy';\nint $b;\nfloat ok = 1.5;";
    let mut scanner = Scanner::new(source);
    let tokens = scanner.tokenize();

    let errors = scanner.errors();
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], LexError::InvalidDigitGrouping { .. }));
    assert!(matches!(errors[1], LexError::InvalidCharLiteral { .. }));
    assert!(matches!(errors[2], LexError::InvalidCharacter { ch: '$', .. }));
    assert_eq!(errors[2].location().line, 3);

    let tail: Vec<_> = tokens
        .iter()
        .rev()
        .take(6)
        .rev()
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(tail, vec!["float", "ok", "=", "1.5", ";", "EOF"]);
}

#[test]
fn test_identifier_limit() {
    let ok = format!("int {};", "v".repeat(31));
    let mut scanner = Scanner::new(&ok);
    scanner.tokenize();
    assert!(scanner.errors().is_empty());

    let long = format!("int {};", "v".repeat(32));
    let mut scanner = Scanner::new(&long);
    let tokens = scanner.tokenize();
    assert!(matches!(
        scanner.errors(),
        [LexError::IdentifierTooLong { max: 31, .. }]
    ));
    assert_eq!(tokens[1].kind, TokenKind::InvalidIdentifier);
}

#[test]
fn test_custom_identifier_limit() {
    let mut scanner = Scanner::new("abcdef").with_max_identifier_len(4);
    let tokens = scanner.tokenize();
    assert_eq!(tokens[0].kind, TokenKind::InvalidIdentifier);
    assert_eq!(scanner.errors().len(), 1);
}

#[test]
fn test_unterminated_string_reports_start() {
    let mut scanner = Scanner::new("printf(\"oops);\nint x;");
    let tokens = scanner.tokenize();

    let err = &scanner.errors()[0];
    assert!(matches!(err, LexError::UnterminatedString { .. }));
    assert_eq!(err.location().line, 1);
    assert_eq!(err.location().column, 8);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}
