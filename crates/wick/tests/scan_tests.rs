//! Scanner tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wick::*;

fn tok(kind: TokenKind, pos: usize, line: usize, pre: &str, text: &str) -> Token {
    Token::new(kind, pos, line, pre, text)
}

fn bol() -> Token {
    tok(TokenKind::Bol, 0, 1, "", "")
}

// ═══════════════════════════════════════════════════════════════════════
// Single Tokens
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_empty() {
    assert_eq!(scan("").unwrap(), vec![bol()]);
}

#[test]
fn test_scan_brackets() {
    let cases = [
        ("{", TokenKind::OpenBrace),
        ("}", TokenKind::CloseBrace),
        ("[", TokenKind::OpenBracket),
        ("]", TokenKind::CloseBracket),
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
    ];
    for (src, kind) in cases {
        assert_eq!(scan(src).unwrap(), vec![bol(), tok(kind, 0, 1, "", src)]);
    }
}

#[test]
fn test_scan_literals() {
    assert_eq!(
        scan("a").unwrap(),
        vec![bol(), tok(TokenKind::Symbol, 0, 1, "", "a")]
    );
    assert_eq!(
        scan("\"a\"").unwrap(),
        vec![bol(), tok(TokenKind::DString, 0, 1, "", "\"a\"")]
    );
    assert_eq!(
        scan("'a'").unwrap(),
        vec![bol(), tok(TokenKind::SString, 0, 1, "", "'a'")]
    );
}

#[test]
fn test_scan_lone_operators() {
    assert_eq!(
        scan("=").unwrap(),
        vec![bol(), tok(TokenKind::Inop0, 0, 1, "", "=")]
    );
    assert_eq!(
        scan("+").unwrap(),
        vec![bol(), tok(TokenKind::Inop1, 0, 1, "", "+")]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Whitespace and Lines
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_newline_starts_line() {
    assert_eq!(
        scan("\n").unwrap(),
        vec![bol(), tok(TokenKind::Bol, 0, 2, "\n", "")]
    );
    assert_eq!(
        scan(" \n").unwrap(),
        vec![bol(), tok(TokenKind::Bol, 1, 2, " \n", "")]
    );
}

#[test]
fn test_scan_leading_space_is_recorded() {
    assert_eq!(
        scan(" a").unwrap(),
        vec![bol(), tok(TokenKind::Symbol, 1, 1, " ", "a")]
    );
}

#[test]
fn test_scan_string_spanning_lines_advances_line() {
    let tokens = scan("'a\nb' c").unwrap();
    assert_eq!(tokens[1], tok(TokenKind::SString, 0, 1, "", "'a\nb'"));
    assert_eq!(tokens[2], tok(TokenKind::Symbol, 6, 2, " ", "c"));
}

// ═══════════════════════════════════════════════════════════════════════
// Operator Classification
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_assignment() {
    assert_eq!(
        scan("a = b").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Inop0, 2, 1, " ", "="),
            tok(TokenKind::Symbol, 4, 1, " ", "b"),
        ]
    );
}

#[test]
fn test_scan_loose_infix() {
    assert_eq!(
        scan("a + b").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Inop1, 2, 1, " ", "+"),
            tok(TokenKind::Symbol, 4, 1, " ", "b"),
        ]
    );
}

#[test]
fn test_scan_tight_infix() {
    assert_eq!(
        scan("a.b").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Inop2, 1, 1, "", "."),
            tok(TokenKind::Symbol, 2, 1, "", "b"),
        ]
    );
}

#[test]
fn test_scan_postfix() {
    assert_eq!(
        scan("a.").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Postop, 1, 1, "", "."),
        ]
    );
    assert_eq!(
        scan("a. b").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Postop, 1, 1, "", "."),
            tok(TokenKind::Symbol, 3, 1, " ", "b"),
        ]
    );
}

#[test]
fn test_scan_prefix() {
    assert_eq!(
        scan(".a").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Preop, 0, 1, "", "."),
            tok(TokenKind::Symbol, 1, 1, "", "a"),
        ]
    );
    assert_eq!(
        scan("a .b").unwrap(),
        vec![
            bol(),
            tok(TokenKind::Symbol, 0, 1, "", "a"),
            tok(TokenKind::Preop, 2, 1, " ", "."),
            tok(TokenKind::Symbol, 3, 1, "", "b"),
        ]
    );
}

#[test]
fn test_scan_prefix_inside_block() {
    assert_eq!(
        scan("{+3}").unwrap(),
        vec![
            bol(),
            tok(TokenKind::OpenBrace, 0, 1, "", "{"),
            tok(TokenKind::Preop, 1, 1, "", "+"),
            tok(TokenKind::Symbol, 2, 1, "", "3"),
            tok(TokenKind::CloseBrace, 3, 1, "", "}"),
        ]
    );
}

#[test]
fn test_scan_operator_run_is_one_token() {
    let tokens = scan("a |> b").unwrap();
    assert_eq!(tokens[2], tok(TokenKind::Inop1, 2, 1, " ", "|>"));
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_unterminated_double() {
    let err = scan("\"").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected EOF in double quoted string started at pos=0 (line=1)"
    );
    assert_eq!((err.position(), err.line()), (0, 1));
}

#[test]
fn test_scan_unterminated_single() {
    let err = scan("'").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected EOF in single quoted string started at pos=0 (line=1)"
    );
}

#[test]
fn test_scan_unknown_char() {
    let err = scan("\u{c}").unwrap_err();
    assert_eq!(err.to_string(), "unknown char: '\u{c}' at pos=0 (line=1)");
}

// ═══════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_first_token_is_line_start(src in "[a-z0-9 +=.,(){}\\[\\]\n-]{0,40}") {
        let tokens = scan(&src).unwrap();
        prop_assert_eq!(&tokens[0], &bol());
    }

    #[test]
    fn prop_tokens_and_spaces_cover_source(src in "[a-z0-9 +=.,(){}\\[\\]\n-]{0,40}") {
        let tokens = scan(&src).unwrap();
        let rebuilt: String = tokens
            .iter()
            .map(|t| format!("{}{}", t.pre_space, t.text))
            .collect();
        prop_assert_eq!(rebuilt.trim_end_matches([' ', '\t', '\r']), src.trim_end_matches([' ', '\t', '\r']));
    }

    #[test]
    fn prop_positions_increase(src in "[a-z0-9 +=.,(){}\\[\\]\n-]{0,40}") {
        let tokens = scan(&src).unwrap();
        for pair in tokens.windows(2).skip(1) {
            prop_assert!(pair[0].pos < pair[1].pos);
        }
    }
}
