//! ECMAScript (ES6) lexer.
//!
//! This crate cooks the raw token stream from [`es_lexer_core`] into fully
//! resolved [`Token`]s: keywords separated from identifiers, numeric values
//! parsed, escape sequences processed, string payloads interned, and every
//! malformed construct reported as a positioned [`LexError`].
//!
//! The driver also resolves the two concerns a context-free scanner cannot:
//! the `/` ambiguity (division vs. regex literal, decided from the previous
//! significant token) and line terminator tracking for automatic semicolon
//! insertion (the [`TokenFlags::NEWLINE_BEFORE`] bit).
//!
//! # Example
//!
//! ```
//! use es_lexer::{lex, LexerConfig, StringInterner, TokenKind};
//!
//! let interner = StringInterner::new();
//! let out = lex("let x = 42;", &interner, LexerConfig::default());
//! assert!(out.errors.is_empty());
//! // let, x, =, 42, ;, EOF
//! assert_eq!(out.tokens.len(), 6);
//! assert_eq!(out.tokens[3].kind.number_value(), Some(42.0));
//! ```

mod cook_escape;
mod cooker;
mod interner;
pub mod keywords;
mod lex_error;
mod span;
mod token;
mod token_stream;

pub use interner::{InternError, Name, StringInterner};
pub use keywords::Keyword;
pub use lex_error::{LexError, LexErrorKind};
pub use span::{Span, SpanError};
pub use token::{Punct, Token, TokenFlags, TokenKind};
pub use token_stream::TokenStream;

use cooker::TokenCooker;
use es_lexer_core::{EncodingIssueKind, LexGoal, RawScanner, RawTag, SourceBuffer};

/// Lexer behavior switches.
#[derive(Clone, Copy, Debug)]
pub struct LexerConfig {
    /// Stop at the first error: the offending token is suppressed and the
    /// stream ends with EOF. Default is recovering mode, which emits an
    /// `Error` token and continues.
    pub strict_error_mode: bool,
    /// Emit comments as [`TokenKind::Comment`] tokens instead of
    /// discarding them.
    pub emit_comments: bool,
    /// Intern template part content as raw source text, leaving escapes
    /// and line terminators untouched (tagged-template raw strings).
    pub template_raw_mode: bool,
    /// A block comment containing a line terminator counts as a line
    /// terminator for `NEWLINE_BEFORE`. This is what the ES automatic
    /// semicolon rules require; turning it off is for token-level tools
    /// that only care about physical newlines.
    pub comment_newlines_are_significant: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            strict_error_mode: false,
            emit_comments: false,
            template_raw_mode: false,
            comment_newlines_are_significant: true,
        }
    }
}

/// Everything one lexing pass produces.
#[derive(Debug)]
pub struct LexOutput {
    /// Cooked tokens, ending with exactly one zero-width `Eof`.
    pub tokens: Vec<Token>,
    /// All diagnostics, in source order.
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex a complete source text.
///
/// Interned payloads go into `interner`, which outlives the output and can
/// be shared across files lexed on the same thread.
pub fn lex(source: &str, interner: &StringInterner, config: LexerConfig) -> LexOutput {
    let buffer = SourceBuffer::new(source);
    let mut cooker = TokenCooker::new(source, interner, config.template_raw_mode);

    // UTF-16 BOMs mean the whole file is mis-encoded; interior NULs are
    // reported at their token position by the scanner instead.
    let mut bad_encoding = false;
    for issue in buffer.encoding_issues() {
        let span = Span::new(issue.pos, issue.pos + issue.len);
        match issue.kind {
            EncodingIssueKind::Utf16LeBom => {
                cooker.push_error(LexError::unsupported_encoding(span, "UTF-16 LE"));
                bad_encoding = true;
            }
            EncodingIssueKind::Utf16BeBom => {
                cooker.push_error(LexError::unsupported_encoding(span, "UTF-16 BE"));
                bad_encoding = true;
            }
            EncodingIssueKind::InteriorNull => {}
        }
    }
    if bad_encoding && config.strict_error_mode {
        let eof = Token::new(TokenKind::Eof, Span::point(0), 1, 0, TokenFlags::empty());
        return LexOutput {
            tokens: vec![eof],
            errors: cooker.finish(),
        };
    }

    let mut scanner = RawScanner::new(buffer.cursor());
    let mut tokens = Vec::new();

    let mut pos: u32 = 0;
    let mut line: u32 = 1;
    let mut line_start: u32 = 0;
    let mut pending = TokenFlags::empty();
    let mut prev: Option<TokenKind> = None;

    loop {
        let goal = match prev {
            Some(kind) if kind.ends_expression() => LexGoal::Div,
            _ => LexGoal::Regex,
        };
        let raw = scanner.next_token(goal);

        let start = pos;
        pos += raw.len;
        let span = Span::new(start, pos);
        let tok_line = line;
        let tok_column = start - line_start;
        advance_lines(source, start, pos, &mut line, &mut line_start);

        match raw.tag {
            RawTag::Eof => {
                if scanner.open_substitutions() > 0 {
                    cooker.push_error(LexError::unbalanced_template_brace(
                        span, tok_line, tok_column,
                    ));
                }
                tokens.push(Token::new(
                    TokenKind::Eof,
                    Span::point(start),
                    tok_line,
                    tok_column,
                    pending,
                ));
                break;
            }
            RawTag::Whitespace => {}
            RawTag::Newline => pending |= TokenFlags::NEWLINE_BEFORE,
            RawTag::LineComment | RawTag::BlockComment => {
                // Only a block comment can span a line (`//` stops before
                // the terminator).
                if config.comment_newlines_are_significant
                    && raw.tag == RawTag::BlockComment
                    && contains_line_terminator(&source[span.to_range()])
                {
                    pending |= TokenFlags::NEWLINE_BEFORE;
                }
                if config.emit_comments {
                    let kind = cooker.cook_comment(span);
                    // Comments carry the pending flag but do not consume
                    // it: the next significant token still sees it.
                    tokens.push(Token::new(kind, span, tok_line, tok_column, pending));
                }
            }
            _ => {
                let kind = cooker.cook(raw.tag, span, tok_line, tok_column);
                let mut flags = pending;
                if cooker.last_cook_had_error() {
                    flags |= TokenFlags::HAS_ERROR;
                }
                if config.strict_error_mode && cooker.last_cook_had_error() {
                    // The offending token is suppressed and the stream
                    // ends where it began.
                    tokens.push(Token::new(
                        TokenKind::Eof,
                        Span::point(start),
                        tok_line,
                        tok_column,
                        pending,
                    ));
                    break;
                }
                tokens.push(Token::new(kind, span, tok_line, tok_column, flags));
                pending = TokenFlags::empty();
                prev = Some(kind);
            }
        }
    }

    LexOutput {
        tokens,
        errors: cooker.finish(),
    }
}

/// Walk the bytes of one token and update the line counter. CR LF counts
/// as a single terminator; LS and PS are the three-byte sequences
/// `E2 80 A8` / `E2 80 A9`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "byte indices bounded by u32 source length"
)]
fn advance_lines(source: &str, start: u32, end: u32, line: &mut u32, line_start: &mut u32) {
    let bytes = source.as_bytes();
    let mut i = start as usize;
    let end = (end as usize).min(bytes.len());
    while i < end {
        match bytes[i] {
            b'\n' => {
                i += 1;
                *line += 1;
                *line_start = i as u32;
            }
            b'\r' => {
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                *line += 1;
                *line_start = i as u32;
            }
            0xE2 if bytes.get(i + 1) == Some(&0x80)
                && matches!(bytes.get(i + 2), Some(&0xA8 | &0xA9)) =>
            {
                i += 3;
                *line += 1;
                *line_start = i as u32;
            }
            _ => i += 1,
        }
    }
}

fn contains_line_terminator(text: &str) -> bool {
    text.contains(['\n', '\r', '\u{2028}', '\u{2029}'])
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex_default(source: &str) -> LexOutput {
        let interner = StringInterner::new();
        lex(source, &interner, LexerConfig::default())
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        let out = lex_default(source);
        assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);
        out.tokens.iter().map(|t| t.kind).collect()
    }

    // === Basics ===

    #[test]
    fn empty_source_is_just_eof() {
        let out = lex_default("");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Eof);
        assert_eq!(out.tokens[0].span, Span::point(0));
        assert_eq!((out.tokens[0].line, out.tokens[0].column), (1, 0));
        assert!(out.errors.is_empty());
    }

    #[test]
    fn keywords_and_identifiers() {
        let k = kinds("var let");
        assert!(matches!(k[0], TokenKind::Keyword(Keyword::Var)));
        // `let` is only reserved in strict-mode code; the lexer always
        // produces an identifier and the parser decides.
        assert!(matches!(k[1], TokenKind::Ident(_)));
        assert_eq!(k[2], TokenKind::Eof);
    }

    #[test]
    fn numeric_values_flow_through() {
        let k = kinds("0x10 .5");
        assert_eq!(k[0].number_value(), Some(16.0));
        assert_eq!(k[1].number_value(), Some(0.5));
    }

    // === Division vs. regex ===

    #[test]
    fn slash_after_value_is_division() {
        let k = kinds("4 / 2");
        assert_eq!(k[1], TokenKind::Punct(Punct::Slash));

        let k = kinds("(a) / b");
        assert_eq!(k[3], TokenKind::Punct(Punct::Slash));

        let k = kinds("x++ / y");
        assert_eq!(k[2], TokenKind::Punct(Punct::Slash));
    }

    #[test]
    fn slash_after_operator_is_regex() {
        let k = kinds("x = /ab/g");
        assert!(matches!(k[2], TokenKind::Regex { .. }));

        let k = kinds("f(/x/)");
        assert!(matches!(k[2], TokenKind::Regex { .. }));
    }

    #[test]
    fn slash_after_right_brace_is_regex() {
        // After a block, a slash starts a regex: `{} /a/g`
        let k = kinds("{} /a/g");
        assert!(matches!(k[2], TokenKind::Regex { .. }));
    }

    #[test]
    fn slash_at_start_is_regex() {
        let k = kinds("/abc/.test(s)");
        assert!(matches!(k[0], TokenKind::Regex { .. }));
        assert_eq!(k[1], TokenKind::Punct(Punct::Dot));
    }

    // === Lines, columns, newline flags ===

    #[test]
    fn line_and_column_tracking() {
        let out = lex_default("a\nbb cc");
        assert_eq!((out.tokens[0].line, out.tokens[0].column), (1, 0));
        assert_eq!((out.tokens[1].line, out.tokens[1].column), (2, 0));
        assert_eq!((out.tokens[2].line, out.tokens[2].column), (2, 3));
    }

    #[test]
    fn crlf_is_one_line_terminator() {
        let out = lex_default("a\r\nb");
        assert_eq!(out.tokens[1].line, 2);
        assert_eq!(out.tokens[1].column, 0);
    }

    #[test]
    fn line_separator_is_a_line_terminator() {
        let out = lex_default("a\u{2028}b");
        assert_eq!(out.tokens[1].line, 2);
        assert!(out.tokens[1].newline_before());
    }

    #[test]
    fn newline_before_flag_for_asi() {
        let out = lex_default("a\nb c");
        assert!(!out.tokens[0].newline_before());
        assert!(out.tokens[1].newline_before());
        assert!(!out.tokens[2].newline_before());
    }

    #[test]
    fn newline_flag_survives_to_eof() {
        let out = lex_default("a\n");
        assert_eq!(out.tokens[1].kind, TokenKind::Eof);
        assert!(out.tokens[1].newline_before());
    }

    // === Comments ===

    #[test]
    fn comments_are_discarded_by_default() {
        let k = kinds("a // note\nb /* x */ c");
        assert_eq!(k.len(), 4); // a, b, c, EOF
    }

    #[test]
    fn multiline_block_comment_counts_as_newline() {
        let out = lex_default("a /* spans\nlines */ b");
        assert!(out.tokens[1].newline_before());
    }

    #[test]
    fn single_line_block_comment_is_not_a_newline() {
        let out = lex_default("a /* same line */ b");
        assert!(!out.tokens[1].newline_before());
    }

    #[test]
    fn comment_newline_significance_can_be_disabled() {
        let interner = StringInterner::new();
        let config = LexerConfig {
            comment_newlines_are_significant: false,
            ..LexerConfig::default()
        };
        let out = lex("a /* spans\nlines */ b", &interner, config);
        assert!(!out.tokens[1].newline_before());
    }

    #[test]
    fn emit_comments_produces_comment_tokens() {
        let interner = StringInterner::new();
        let config = LexerConfig {
            emit_comments: true,
            ..LexerConfig::default()
        };
        let out = lex("a // note", &interner, config);
        let TokenKind::Comment(name) = out.tokens[1].kind else {
            panic!("expected Comment, got {:?}", out.tokens[1].kind);
        };
        assert_eq!(interner.lookup(name), "// note");
    }

    #[test]
    fn emitted_comment_does_not_consume_newline_flag() {
        let interner = StringInterner::new();
        let config = LexerConfig {
            emit_comments: true,
            ..LexerConfig::default()
        };
        let out = lex("a\n/* x */ b", &interner, config);
        // Both the comment and the following identifier see the newline
        assert!(out.tokens[1].newline_before());
        assert!(out.tokens[2].newline_before());
    }

    // === Templates ===

    #[test]
    fn template_with_substitution() {
        let k = kinds("`a${1 + 1}b`");
        assert!(matches!(k[0], TokenKind::TemplateHead(_)));
        assert_eq!(k[1].number_value(), Some(1.0));
        assert_eq!(k[2], TokenKind::Punct(Punct::Plus));
        assert!(matches!(k[4], TokenKind::TemplateTail(_)));
    }

    #[test]
    fn unbalanced_template_substitution_at_eof() {
        let out = lex_default("`a${1");
        assert!(out
            .errors
            .iter()
            .any(|e| matches!(e.kind, LexErrorKind::UnbalancedTemplateBrace)));
    }

    #[test]
    fn stray_right_brace_is_just_a_brace() {
        let k = kinds("} a");
        assert_eq!(k[0], TokenKind::Punct(Punct::RBrace));
    }

    // === Error recovery ===

    #[test]
    fn recovering_mode_continues_after_error() {
        let out = lex_default("'oops\nnext");
        assert_eq!(out.tokens[0].kind, TokenKind::Error);
        assert!(out.tokens[0].flags.contains(TokenFlags::HAS_ERROR));
        assert!(matches!(out.tokens[1].kind, TokenKind::Ident(_)));
        assert_eq!(out.errors.len(), 1);
        assert!(matches!(out.errors[0].kind, LexErrorKind::UnterminatedString));
    }

    #[test]
    fn strict_mode_halts_on_first_error() {
        let interner = StringInterner::new();
        let config = LexerConfig {
            strict_error_mode: true,
            ..LexerConfig::default()
        };
        let out = lex("'oops\nnext", &interner, config);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Eof);
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn strict_mode_halts_on_soft_error_too() {
        // The string itself terminates fine; the escape inside is bad
        let interner = StringInterner::new();
        let config = LexerConfig {
            strict_error_mode: true,
            ..LexerConfig::default()
        };
        let out = lex(r#""\xZZ" next"#, &interner, config);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn has_error_flag_on_recovered_string() {
        let out = lex_default(r#""\xZZ""#);
        assert!(matches!(out.tokens[0].kind, TokenKind::String(_)));
        assert!(out.tokens[0].flags.contains(TokenFlags::HAS_ERROR));
    }

    #[test]
    fn interior_null_is_reported_and_skipped_over() {
        let out = lex_default("a\0b");
        assert!(out
            .errors
            .iter()
            .any(|e| matches!(e.kind, LexErrorKind::InteriorNull)));
        assert_eq!(out.tokens[1].kind, TokenKind::Error);
        assert!(matches!(out.tokens[2].kind, TokenKind::Ident(_)));
    }

    // === Span integrity ===

    #[test]
    fn spans_are_in_bounds_and_ordered() {
        let source = "var x = /re/g; `t${y}u`\n// done";
        let out = lex_default(source);
        let mut prev_end = 0u32;
        for tok in &out.tokens {
            assert!(tok.span.start >= prev_end);
            assert!(tok.span.end as usize <= source.len());
            prev_end = tok.span.end;
        }
        let last = out.tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Eof);
        assert!(last.span.is_empty());
    }
}
