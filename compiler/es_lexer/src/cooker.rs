//! Token cooking: raw scanner output to resolved [`TokenKind`]s.
//!
//! The raw layer classifies bytes; the cooker gives tokens their meaning.
//! It resolves keywords, parses numeric values, processes escapes, splits
//! regex literals into pattern and flags, and interns every string-like
//! payload. Error-range tags become [`TokenKind::Error`] with a diagnostic
//! pushed to the error list.

use crate::cook_escape;
use crate::interner::StringInterner;
use crate::keywords;
use crate::lex_error::LexError;
use crate::span::Span;
use crate::token::{Punct, TokenKind};
use es_lexer_core::RawTag;

pub(crate) struct TokenCooker<'src> {
    source: &'src str,
    interner: &'src StringInterner,
    errors: Vec<LexError>,
    /// Error count before the current `cook` call, for `last_cook_had_error`.
    errors_before_cook: usize,
    /// When set, template parts keep their raw source text (escapes and
    /// line terminators untouched).
    raw_templates: bool,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src str, interner: &'src StringInterner, raw_templates: bool) -> Self {
        TokenCooker {
            source,
            interner,
            errors: Vec::new(),
            errors_before_cook: 0,
            raw_templates,
        }
    }

    /// True when the most recent `cook`/`cook_comment` call pushed at least
    /// one error.
    pub(crate) fn last_cook_had_error(&self) -> bool {
        self.errors.len() > self.errors_before_cook
    }

    pub(crate) fn push_error(&mut self, error: LexError) {
        self.errors.push(error);
    }

    pub(crate) fn finish(self) -> Vec<LexError> {
        self.errors
    }

    /// Resolve one non-trivia raw token into its cooked kind.
    pub(crate) fn cook(&mut self, tag: RawTag, span: Span, line: u32, column: u32) -> TokenKind {
        self.errors_before_cook = self.errors.len();

        match tag {
            RawTag::Ident => self.cook_ident(span),
            RawTag::Decimal => self.cook_decimal(span, line, column),
            RawTag::HexNumber => self.cook_radix(span, 16),
            RawTag::OctalNumber => self.cook_radix(span, 8),
            RawTag::BinNumber => self.cook_radix(span, 2),
            RawTag::String => self.cook_string(span, line, column),
            RawTag::Regex => self.cook_regex(span),

            RawTag::TemplateNoSub => self.cook_template(span, line, column, 1, 1, TokenKind::TemplateNoSub),
            RawTag::TemplateHead => self.cook_template(span, line, column, 1, 2, TokenKind::TemplateHead),
            RawTag::TemplateMiddle => self.cook_template(span, line, column, 1, 2, TokenKind::TemplateMiddle),
            RawTag::TemplateTail => self.cook_template(span, line, column, 1, 1, TokenKind::TemplateTail),

            RawTag::UnexpectedChar => {
                let ch = self.slice(span).chars().next().unwrap_or('\u{FFFD}');
                self.errors
                    .push(LexError::unexpected_char(span, line, column, ch));
                TokenKind::Error
            }
            RawTag::UnterminatedString => {
                self.errors
                    .push(LexError::unterminated_string(span, line, column));
                TokenKind::Error
            }
            RawTag::UnterminatedTemplate => {
                self.errors
                    .push(LexError::unterminated_template(span, line, column));
                TokenKind::Error
            }
            RawTag::UnterminatedRegex => {
                self.errors
                    .push(LexError::unterminated_regex(span, line, column));
                TokenKind::Error
            }
            RawTag::UnterminatedComment => {
                self.errors
                    .push(LexError::unterminated_comment(span, line, column));
                TokenKind::Error
            }
            RawTag::InvalidNumber => {
                self.errors
                    .push(LexError::invalid_number(span, line, column));
                TokenKind::Error
            }
            RawTag::InteriorNull => {
                self.errors
                    .push(LexError::interior_null(span, line, column));
                TokenKind::Error
            }

            RawTag::Whitespace
            | RawTag::Newline
            | RawTag::LineComment
            | RawTag::BlockComment
            | RawTag::Eof => {
                debug_assert!(false, "trivia and EOF are handled by the driver, got {tag:?}");
                TokenKind::Error
            }

            // Remaining tags are all punctuators and delimiters
            _ => TokenKind::Punct(punct_for_tag(tag)),
        }
    }

    /// Intern a comment's full lexeme, including its `//` or `/* */`
    /// delimiters. Called by the driver only when comments are emitted.
    pub(crate) fn cook_comment(&mut self, span: Span) -> TokenKind {
        self.errors_before_cook = self.errors.len();
        TokenKind::Comment(self.interner.intern(self.slice(span)))
    }

    fn cook_ident(&mut self, span: Span) -> TokenKind {
        let text = self.slice(span);
        match keywords::lookup(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(self.interner.intern(text)),
        }
    }

    fn cook_decimal(&mut self, span: Span, line: u32, column: u32) -> TokenKind {
        let text = self.slice(span);
        // The scanner validated the shape; `f64::from_str` accepts every
        // valid ES decimal form and overflows to infinity (`1e400`).
        match text.parse::<f64>() {
            Ok(value) => TokenKind::number(value),
            Err(_) => {
                self.errors
                    .push(LexError::invalid_number(span, line, column));
                TokenKind::Error
            }
        }
    }

    /// Hex, octal, and binary literals. The two-byte prefix (`0x`, `0o`,
    /// `0b`) is skipped; digits fold into an `f64` since values above
    /// 2^53 must round the way ES numbers do.
    fn cook_radix(&mut self, span: Span, radix: u32) -> TokenKind {
        let text = self.slice(span);
        let mut value = 0f64;
        for ch in text[2..].chars() {
            // Scanner guarantees digits valid for the radix
            let digit = ch.to_digit(radix).unwrap_or(0);
            value = value * f64::from(radix) + f64::from(digit);
        }
        TokenKind::number(value)
    }

    fn cook_string(&mut self, span: Span, line: u32, column: u32) -> TokenKind {
        let text = self.slice(span);
        let content = &text[1..text.len() - 1];
        let name = match cook_escape::unescape(content, span.start + 1, line, column, &mut self.errors)
        {
            Some(cooked) => self.interner.intern_owned(cooked),
            None => self.interner.intern(content),
        };
        TokenKind::String(name)
    }

    /// Template parts. `strip_front`/`strip_back` remove the delimiters:
    /// one byte for `` ` `` or `}`, two for a trailing `${`.
    ///
    /// In cooked mode, escapes are processed and `<CR><LF>` / `<CR>` are
    /// normalized to `<LF>` per the template-value rules. In raw mode the
    /// source text between the delimiters is interned untouched.
    fn cook_template(
        &mut self,
        span: Span,
        line: u32,
        column: u32,
        strip_front: usize,
        strip_back: usize,
        ctor: fn(crate::interner::Name) -> TokenKind,
    ) -> TokenKind {
        let text = self.slice(span);
        let content = &text[strip_front..text.len() - strip_back];

        if self.raw_templates {
            return ctor(self.interner.intern(content));
        }

        let base = span.start + u32::try_from(strip_front).unwrap_or(0);
        let name = match cook_escape::unescape(content, base, line, column, &mut self.errors) {
            Some(cooked) => self.interner.intern_owned(normalize_line_endings(&cooked)),
            None if content.contains('\r') => self
                .interner
                .intern_owned(normalize_line_endings(content)),
            None => self.interner.intern(content),
        };
        ctor(name)
    }

    /// Split off the flags after the closing `/` and intern both halves
    /// uncooked. Flag validation (`g`/`i`/`m`/`u`/`y`, no repeats) is a
    /// syntactic concern left to the parser.
    fn cook_regex(&mut self, span: Span) -> TokenKind {
        let text = self.slice(span);
        let Some(close) = text.rfind('/') else {
            debug_assert!(false, "regex token without closing slash: {text:?}");
            return TokenKind::Error;
        };
        let pattern = self.interner.intern(&text[1..close]);
        let flags = self.interner.intern(&text[close + 1..]);
        TokenKind::Regex { pattern, flags }
    }

    fn slice(&self, span: Span) -> &'src str {
        debug_assert!(span.to_range().end <= self.source.len());
        &self.source[span.to_range()]
    }
}

/// Template values normalize `<CR><LF>` and lone `<CR>` to `<LF>`.
fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Direct map for the punctuator and delimiter ranges.
fn punct_for_tag(tag: RawTag) -> Punct {
    match tag {
        RawTag::Plus => Punct::Plus,
        RawTag::Minus => Punct::Minus,
        RawTag::Star => Punct::Star,
        RawTag::Percent => Punct::Percent,
        RawTag::PlusPlus => Punct::PlusPlus,
        RawTag::MinusMinus => Punct::MinusMinus,
        RawTag::Less => Punct::Lt,
        RawTag::Greater => Punct::Gt,
        RawTag::LessEqual => Punct::LtEq,
        RawTag::GreaterEqual => Punct::GtEq,
        RawTag::EqualEqual => Punct::EqEq,
        RawTag::BangEqual => Punct::NotEq,
        RawTag::EqualEqualEqual => Punct::EqEqEq,
        RawTag::BangEqualEqual => Punct::NotEqEq,
        RawTag::Shl => Punct::Shl,
        RawTag::Shr => Punct::Shr,
        RawTag::UShr => Punct::UShr,
        RawTag::Ampersand => Punct::Amp,
        RawTag::Pipe => Punct::Pipe,
        RawTag::Caret => Punct::Caret,
        RawTag::Bang => Punct::Bang,
        RawTag::Tilde => Punct::Tilde,
        RawTag::AmpersandAmpersand => Punct::AmpAmp,
        RawTag::PipePipe => Punct::PipePipe,
        RawTag::Question => Punct::Question,
        RawTag::Colon => Punct::Colon,
        RawTag::Equal => Punct::Eq,
        RawTag::PlusEqual => Punct::PlusEq,
        RawTag::MinusEqual => Punct::MinusEq,
        RawTag::StarEqual => Punct::StarEq,
        RawTag::PercentEqual => Punct::PercentEq,
        RawTag::ShlEqual => Punct::ShlEq,
        RawTag::ShrEqual => Punct::ShrEq,
        RawTag::UShrEqual => Punct::UShrEq,
        RawTag::AmpersandEqual => Punct::AmpEq,
        RawTag::PipeEqual => Punct::PipeEq,
        RawTag::CaretEqual => Punct::CaretEq,
        RawTag::FatArrow => Punct::FatArrow,
        RawTag::Slash => Punct::Slash,
        RawTag::SlashEqual => Punct::SlashEq,
        RawTag::Dot => Punct::Dot,
        RawTag::DotDotDot => Punct::DotDotDot,
        RawTag::Comma => Punct::Comma,
        RawTag::Semicolon => Punct::Semicolon,
        RawTag::LeftParen => Punct::LParen,
        RawTag::RightParen => Punct::RParen,
        RawTag::LeftBracket => Punct::LBracket,
        RawTag::RightBracket => Punct::RBracket,
        RawTag::LeftBrace => Punct::LBrace,
        RawTag::RightBrace => Punct::RBrace,
        _ => {
            debug_assert!(false, "non-punctuator tag {tag:?}");
            Punct::Semicolon
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use crate::keywords::Keyword;
    use pretty_assertions::assert_eq;

    fn full_span(source: &str) -> Span {
        Span::try_from_range(0..source.len()).unwrap()
    }

    fn cook_one(source: &str, tag: RawTag) -> (TokenKind, Vec<LexError>, StringInterner) {
        let interner = StringInterner::new();
        let mut cooker = TokenCooker::new(source, &interner, false);
        let kind = cooker.cook(tag, full_span(source), 1, 0);
        (kind, cooker.finish(), interner)
    }

    // === Identifiers & keywords ===

    #[test]
    fn ident_is_interned() {
        let (kind, errors, interner) = cook_one("counter", RawTag::Ident);
        let TokenKind::Ident(name) = kind else {
            panic!("expected Ident, got {kind:?}");
        };
        assert_eq!(interner.lookup(name), "counter");
        assert!(errors.is_empty());
    }

    #[test]
    fn keyword_is_resolved() {
        let (kind, _, _) = cook_one("function", RawTag::Ident);
        assert_eq!(kind, TokenKind::Keyword(Keyword::Function));

        let (kind, _, _) = cook_one("null", RawTag::Ident);
        assert_eq!(kind, TokenKind::Keyword(Keyword::Null));
    }

    #[test]
    fn near_keyword_stays_ident() {
        let (kind, _, interner) = cook_one("functionx", RawTag::Ident);
        let TokenKind::Ident(name) = kind else {
            panic!("expected Ident");
        };
        assert_eq!(interner.lookup(name), "functionx");
    }

    // === Numbers ===

    #[test]
    fn decimal_values() {
        for (text, value) in [
            ("0", 0.0),
            ("42", 42.0),
            ("3.25", 3.25),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("2.5e-1", 0.25),
            ("1E2", 100.0),
        ] {
            let (kind, errors, _) = cook_one(text, RawTag::Decimal);
            assert_eq!(kind.number_value(), Some(value), "literal {text}");
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn decimal_overflow_is_infinity() {
        let (kind, errors, _) = cook_one("1e400", RawTag::Decimal);
        assert_eq!(kind.number_value(), Some(f64::INFINITY));
        assert!(errors.is_empty());
    }

    #[test]
    fn radix_values() {
        let (kind, _, _) = cook_one("0xFF", RawTag::HexNumber);
        assert_eq!(kind.number_value(), Some(255.0));

        let (kind, _, _) = cook_one("0o17", RawTag::OctalNumber);
        assert_eq!(kind.number_value(), Some(15.0));

        let (kind, _, _) = cook_one("0b1010", RawTag::BinNumber);
        assert_eq!(kind.number_value(), Some(10.0));
    }

    #[test]
    fn hex_above_2_pow_53_rounds() {
        // 2^60: exactly representable, reached through f64 folding
        let (kind, _, _) = cook_one("0x1000000000000000", RawTag::HexNumber);
        assert_eq!(kind.number_value(), Some(1152921504606846976.0));
    }

    // === Strings ===

    #[test]
    fn string_fast_path_strips_quotes() {
        let (kind, errors, interner) = cook_one("'hello'", RawTag::String);
        let TokenKind::String(name) = kind else {
            panic!("expected String");
        };
        assert_eq!(interner.lookup(name), "hello");
        assert!(errors.is_empty());
    }

    #[test]
    fn string_escapes_are_cooked() {
        let (kind, errors, interner) = cook_one(r#""a\nb\x21""#, RawTag::String);
        let TokenKind::String(name) = kind else {
            panic!("expected String");
        };
        assert_eq!(interner.lookup(name), "a\nb!");
        assert!(errors.is_empty());
    }

    #[test]
    fn string_bad_escape_reports_error() {
        let (kind, errors, _) = cook_one(r#""\xQQ""#, RawTag::String);
        assert!(matches!(kind, TokenKind::String(_)));
        assert_eq!(errors.len(), 1);
        // Offset 1 for the opening quote
        assert_eq!(errors[0].span.start, 1);
    }

    // === Templates ===

    #[test]
    fn template_no_sub_strips_backticks() {
        let (kind, _, interner) = cook_one("`abc`", RawTag::TemplateNoSub);
        let TokenKind::TemplateNoSub(name) = kind else {
            panic!("expected TemplateNoSub");
        };
        assert_eq!(interner.lookup(name), "abc");
    }

    #[test]
    fn template_head_strips_dollar_brace() {
        let (kind, _, interner) = cook_one("`a${", RawTag::TemplateHead);
        let TokenKind::TemplateHead(name) = kind else {
            panic!("expected TemplateHead");
        };
        assert_eq!(interner.lookup(name), "a");
    }

    #[test]
    fn template_middle_and_tail_strip_brace() {
        let (kind, _, interner) = cook_one("}-${", RawTag::TemplateMiddle);
        let TokenKind::TemplateMiddle(name) = kind else {
            panic!("expected TemplateMiddle");
        };
        assert_eq!(interner.lookup(name), "-");

        let (kind, _, interner) = cook_one("}b`", RawTag::TemplateTail);
        let TokenKind::TemplateTail(name) = kind else {
            panic!("expected TemplateTail");
        };
        assert_eq!(interner.lookup(name), "b");
    }

    #[test]
    fn template_escapes_cooked_by_default() {
        let (kind, _, interner) = cook_one(r"`a\tb`", RawTag::TemplateNoSub);
        let TokenKind::TemplateNoSub(name) = kind else {
            panic!("expected TemplateNoSub");
        };
        assert_eq!(interner.lookup(name), "a\tb");
    }

    #[test]
    fn template_normalizes_carriage_returns() {
        let (kind, _, interner) = cook_one("`a\r\nb\rc`", RawTag::TemplateNoSub);
        let TokenKind::TemplateNoSub(name) = kind else {
            panic!("expected TemplateNoSub");
        };
        assert_eq!(interner.lookup(name), "a\nb\nc");
    }

    #[test]
    fn raw_template_mode_keeps_source_text() {
        let source = r"`a\tb`";
        let interner = StringInterner::new();
        let mut cooker = TokenCooker::new(source, &interner, true);
        let kind = cooker.cook(RawTag::TemplateNoSub, full_span(source), 1, 0);
        let TokenKind::TemplateNoSub(name) = kind else {
            panic!("expected TemplateNoSub");
        };
        assert_eq!(interner.lookup(name), r"a\tb");
        assert!(cooker.finish().is_empty());
    }

    // === Regex ===

    #[test]
    fn regex_splits_pattern_and_flags() {
        let (kind, errors, interner) = cook_one("/ab+c/gi", RawTag::Regex);
        let TokenKind::Regex { pattern, flags } = kind else {
            panic!("expected Regex");
        };
        assert_eq!(interner.lookup(pattern), "ab+c");
        assert_eq!(interner.lookup(flags), "gi");
        assert!(errors.is_empty());
    }

    #[test]
    fn regex_with_escaped_slash() {
        let (kind, _, interner) = cook_one(r"/a\/b/", RawTag::Regex);
        let TokenKind::Regex { pattern, flags } = kind else {
            panic!("expected Regex");
        };
        assert_eq!(interner.lookup(pattern), r"a\/b");
        assert_eq!(interner.lookup(flags), "");
    }

    // === Punctuators ===

    #[test]
    fn punct_mapping() {
        let (kind, _, _) = cook_one(">>>=", RawTag::UShrEqual);
        assert_eq!(kind, TokenKind::Punct(Punct::UShrEq));

        let (kind, _, _) = cook_one("=>", RawTag::FatArrow);
        assert_eq!(kind, TokenKind::Punct(Punct::FatArrow));

        let (kind, _, _) = cook_one("}", RawTag::RightBrace);
        assert_eq!(kind, TokenKind::Punct(Punct::RBrace));
    }

    // === Errors ===

    #[test]
    fn error_tags_push_diagnostics() {
        use crate::lex_error::LexErrorKind;

        let (kind, errors, _) = cook_one("'oops", RawTag::UnterminatedString);
        assert_eq!(kind, TokenKind::Error);
        assert!(matches!(errors[0].kind, LexErrorKind::UnterminatedString));

        let (kind, errors, _) = cook_one("3in", RawTag::InvalidNumber);
        assert_eq!(kind, TokenKind::Error);
        assert!(matches!(errors[0].kind, LexErrorKind::InvalidNumericLiteral));

        let (kind, errors, _) = cook_one("§", RawTag::UnexpectedChar);
        assert_eq!(kind, TokenKind::Error);
        assert!(matches!(
            errors[0].kind,
            LexErrorKind::UnexpectedCharacter { ch: '§' }
        ));
    }

    #[test]
    fn last_cook_had_error_tracks_current_call() {
        let interner = StringInterner::new();
        let source = "'oops x";
        let mut cooker = TokenCooker::new(source, &interner, false);

        let span = Span::try_from_range(0..5).unwrap();
        cooker.cook(RawTag::UnterminatedString, span, 1, 0);
        assert!(cooker.last_cook_had_error());

        let span = Span::try_from_range(6..7).unwrap();
        cooker.cook(RawTag::Ident, span, 1, 6);
        assert!(!cooker.last_cook_had_error());

        assert_eq!(cooker.finish().len(), 1);
    }

    // === Comments ===

    #[test]
    fn comment_lexeme_includes_delimiters() {
        let interner = StringInterner::new();
        let source = "// note";
        let mut cooker = TokenCooker::new(source, &interner, false);
        let kind = cooker.cook_comment(full_span(source));
        let TokenKind::Comment(name) = kind else {
            panic!("expected Comment");
        };
        assert_eq!(interner.lookup(name), "// note");
    }
}
