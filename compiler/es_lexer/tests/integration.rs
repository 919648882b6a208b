//! End-to-end lexing tests over realistic source snippets.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use es_lexer::{
    lex, Keyword, LexErrorKind, LexerConfig, Punct, StringInterner, TokenFlags, TokenKind,
    TokenStream,
};
use pretty_assertions::assert_eq;

fn lex_default(source: &str) -> es_lexer::LexOutput {
    let interner = StringInterner::new();
    lex(source, &interner, LexerConfig::default())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    let out = lex_default(source);
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);
    out.tokens.iter().map(|t| t.kind).collect()
}

// === Realistic snippets ===

#[test]
fn lexes_a_function_declaration() {
    let interner = StringInterner::new();
    let source = "function add(a, b) {\n  return a + b;\n}";
    let out = lex(source, &interner, LexerConfig::default());
    assert!(out.errors.is_empty());

    let k: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(k[0], TokenKind::Keyword(Keyword::Function));
    let TokenKind::Ident(name) = k[1] else {
        panic!("expected function name, got {:?}", k[1]);
    };
    assert_eq!(interner.lookup(name), "add");
    assert_eq!(k[2], TokenKind::Punct(Punct::LParen));
    assert_eq!(*k.last().unwrap(), TokenKind::Eof);

    // `return` sits on line 2, two spaces in
    let ret = out
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::Keyword(Keyword::Return))
        .unwrap();
    assert_eq!((ret.line, ret.column), (2, 2));
    assert!(ret.newline_before());
}

#[test]
fn lexes_regex_method_call() {
    let interner = StringInterner::new();
    let source = "valid.match(/([CGAT]{3}){1,}/g)";
    let out = lex(source, &interner, LexerConfig::default());
    assert!(out.errors.is_empty(), "errors: {:?}", out.errors);

    let TokenKind::Regex { pattern, flags } = out.tokens[4].kind else {
        panic!("expected Regex, got {:?}", out.tokens[4].kind);
    };
    assert_eq!(interner.lookup(pattern), "([CGAT]{3}){1,}");
    assert_eq!(interner.lookup(flags), "g");
    // The braces inside the pattern never disturb brace tracking
    assert_eq!(out.tokens[5].kind, TokenKind::Punct(Punct::RParen));
}

#[test]
fn division_and_regex_in_one_source() {
    let k = kinds("var r = 10 / 2; var m = /x\\/y/i;");
    assert!(k.contains(&TokenKind::Punct(Punct::Slash)));
    assert!(k.iter().any(|kind| matches!(kind, TokenKind::Regex { .. })));
}

#[test]
fn template_with_nested_object_literal() {
    let interner = StringInterner::new();
    // The inner `{`/`}` pair must not close the substitution early
    let source = "`v=${ {a: 1}.a }!`";
    let out = lex(source, &interner, LexerConfig::default());
    assert!(out.errors.is_empty(), "errors: {:?}", out.errors);

    let k: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert!(matches!(k[0], TokenKind::TemplateHead(_)));
    assert_eq!(k[1], TokenKind::Punct(Punct::LBrace));
    assert!(matches!(
        k.iter().rev().nth(1).copied(),
        Some(TokenKind::TemplateTail(_))
    ));
}

#[test]
fn nested_template_inside_substitution() {
    let out = lex_default("`a${`b${c}d`}e`");
    assert!(out.errors.is_empty());
    let heads = out
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::TemplateHead(_)))
        .count();
    let tails = out
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::TemplateTail(_)))
        .count();
    assert_eq!((heads, tails), (2, 2));
}

#[test]
fn template_values_are_cooked() {
    let interner = StringInterner::new();
    let out = lex(r"`line\n${x}\ttab`", &interner, LexerConfig::default());
    assert!(out.errors.is_empty());

    let TokenKind::TemplateHead(head) = out.tokens[0].kind else {
        panic!("expected TemplateHead");
    };
    let TokenKind::TemplateTail(tail) = out.tokens[2].kind else {
        panic!("expected TemplateTail");
    };
    assert_eq!(interner.lookup(head), "line\n");
    assert_eq!(interner.lookup(tail), "\ttab");
}

#[test]
fn raw_template_mode_preserves_escapes() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        template_raw_mode: true,
        ..LexerConfig::default()
    };
    let out = lex(r"`line\n`", &interner, config);
    let TokenKind::TemplateNoSub(name) = out.tokens[0].kind else {
        panic!("expected TemplateNoSub");
    };
    assert_eq!(interner.lookup(name), r"line\n");
}

// === Automatic semicolon insertion hints ===

#[test]
fn asi_return_statement_shape() {
    let out = lex_default("return\nvalue");
    assert_eq!(out.tokens[0].kind, TokenKind::Keyword(Keyword::Return));
    // The parser needs to see the line break to insert the semicolon
    assert!(out.tokens[1].newline_before());
}

#[test]
fn asi_hint_through_a_line_comment() {
    // The newline after a line comment is its own token, so the flag
    // still lands on `b`
    let out = lex_default("a // trailing\nb");
    assert!(out.tokens[1].newline_before());
}

// === Error recovery ===

#[test]
fn multiple_errors_all_reported() {
    let out = lex_default("'one\n@ 3in");
    assert_eq!(out.errors.len(), 3, "errors: {:?}", out.errors);
    assert!(matches!(out.errors[0].kind, LexErrorKind::UnterminatedString));
    assert!(matches!(
        out.errors[1].kind,
        LexErrorKind::UnexpectedCharacter { ch: '@' }
    ));
    assert!(matches!(out.errors[2].kind, LexErrorKind::InvalidNumericLiteral));
}

#[test]
fn error_positions_are_precise() {
    let out = lex_default("ok\n  'bad");
    assert_eq!(out.errors.len(), 1);
    let err = &out.errors[0];
    assert_eq!((err.line, err.column), (2, 2));
    assert_eq!(err.span.start, 5);
}

#[test]
fn unterminated_regex_at_line_end() {
    let out = lex_default("x = /never\ny");
    assert!(out
        .errors
        .iter()
        .any(|e| matches!(e.kind, LexErrorKind::UnterminatedRegex)));
    // Recovery continues on the next line
    assert!(matches!(
        out.tokens.last().map(|t| t.kind),
        Some(TokenKind::Eof)
    ));
}

#[test]
fn unterminated_block_comment() {
    let out = lex_default("a /* never closed");
    assert!(out
        .errors
        .iter()
        .any(|e| matches!(e.kind, LexErrorKind::UnterminatedComment)));
}

// === Comments as tokens ===

#[test]
fn emitted_comments_interleave_with_code() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        emit_comments: true,
        ..LexerConfig::default()
    };
    let out = lex("a /* doc */ b", &interner, config);
    let TokenKind::Comment(name) = out.tokens[1].kind else {
        panic!("expected Comment, got {:?}", out.tokens[1].kind);
    };
    assert_eq!(interner.lookup(name), "/* doc */");
    assert!(matches!(out.tokens[2].kind, TokenKind::Ident(_)));
}

// === Stream interface ===

#[test]
fn stream_drives_a_lookahead_consumer() {
    let interner = StringInterner::new();
    let (mut stream, errors) =
        TokenStream::from_source("a = 1;", &interner, LexerConfig::default());
    assert!(errors.is_empty());

    // One-token lookahead before committing, parser style
    assert!(matches!(stream.peek().kind, TokenKind::Ident(_)));
    assert_eq!(stream.peek_ahead(1).kind, TokenKind::Punct(Punct::Eq));
    stream.advance();
    assert!(stream.eat(TokenKind::Punct(Punct::Eq)));
    assert_eq!(stream.advance().kind.number_value(), Some(1.0));
    assert!(stream.eat(TokenKind::Punct(Punct::Semicolon)));
    assert_eq!(stream.advance().kind, TokenKind::Eof);
    assert!(stream.is_exhausted());
}

// === Interning ===

#[test]
fn repeated_identifiers_share_one_name() {
    let interner = StringInterner::new();
    let out = lex("count + count + count", &interner, LexerConfig::default());
    let names: Vec<_> = out
        .tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], names[1]);
    assert_eq!(names[1], names[2]);
}

#[test]
fn interner_shared_across_files() {
    let interner = StringInterner::new();
    let a = lex("shared", &interner, LexerConfig::default());
    let b = lex("shared", &interner, LexerConfig::default());
    assert_eq!(a.tokens[0].kind, b.tokens[0].kind);
}

// === Flags ===

#[test]
fn flags_reset_after_each_significant_token() {
    let out = lex_default("a\nb c");
    assert_eq!(out.tokens[1].flags, TokenFlags::NEWLINE_BEFORE);
    assert_eq!(out.tokens[2].flags, TokenFlags::empty());
}
