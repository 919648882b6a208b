//! Property tests: the lexer must uphold its stream invariants on every
//! input, valid ECMAScript or not.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use es_lexer::{lex, LexerConfig, StringInterner, TokenKind};
use proptest::prelude::*;

proptest! {
    /// Never panics, and always terminates with exactly one EOF token.
    #[test]
    fn eof_terminated_for_any_input(source in "\\PC{0,200}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner, LexerConfig::default());
        let eofs = out.tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(out.tokens.last().unwrap().kind, TokenKind::Eof);
    }

    /// Spans are ordered, in bounds, and non-significant gaps aside, the
    /// EOF span sits exactly at the end of the source.
    #[test]
    fn spans_ordered_and_in_bounds(source in "\\PC{0,200}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner, LexerConfig::default());
        let mut prev_end = 0u32;
        for tok in &out.tokens {
            prop_assert!(tok.span.start <= tok.span.end);
            prop_assert!(tok.span.start >= prev_end);
            prop_assert!(tok.span.end as usize <= source.len());
            prev_end = tok.span.end;
        }
        let eof = out.tokens.last().unwrap();
        prop_assert_eq!(eof.span.start as usize, source.len());
    }

    /// Every reported error points inside the source (or exactly at its
    /// end, for unterminated constructs).
    #[test]
    fn error_positions_in_bounds(source in "\\PC{0,200}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner, LexerConfig::default());
        for err in &out.errors {
            prop_assert!(err.span.start <= err.span.end);
            prop_assert!(err.span.end as usize <= source.len());
            prop_assert!(err.line >= 1);
        }
    }

    /// Strict mode is a prefix of recovering mode: same cooked tokens up
    /// to the first error, then EOF.
    #[test]
    fn strict_mode_is_a_prefix(source in "\\PC{0,200}") {
        let interner = StringInterner::new();
        let relaxed = lex(&source, &interner, LexerConfig::default());
        let strict_cfg = LexerConfig { strict_error_mode: true, ..LexerConfig::default() };
        let strict = lex(&source, &interner, strict_cfg);

        prop_assert!(strict.tokens.len() <= relaxed.tokens.len());
        for (s, r) in strict.tokens.iter().zip(relaxed.tokens.iter()) {
            if s.kind == TokenKind::Eof {
                break;
            }
            prop_assert_eq!(s.kind, r.kind);
            prop_assert_eq!(s.span, r.span);
        }
        prop_assert!(strict.errors.len() <= relaxed.errors.len());
    }

    /// Lexing is a pure function of the source: a second pass over the
    /// same buffer yields the same tokens and the same diagnostics.
    #[test]
    fn relexing_is_identical(source in "\\PC{0,200}") {
        let interner = StringInterner::new();
        let first = lex(&source, &interner, LexerConfig::default());
        let second = lex(&source, &interner, LexerConfig::default());
        prop_assert_eq!(first.tokens, second.tokens);
        prop_assert_eq!(first.errors, second.errors);
    }

    /// Arbitrary (possibly multi-line, non-printable) strings still hold
    /// the EOF and bounds invariants.
    #[test]
    fn arbitrary_strings_hold_invariants(source in any::<String>()) {
        let interner = StringInterner::new();
        let out = lex(&source, &interner, LexerConfig::default());
        prop_assert_eq!(out.tokens.last().unwrap().kind, TokenKind::Eof);
        for tok in &out.tokens {
            prop_assert!(tok.span.end as usize <= source.len());
        }
    }
}
