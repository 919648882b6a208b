//! Lexer diagnostics.
//!
//! Errors carry a byte [`Span`] plus the 1-based line and 0-based column
//! of their first byte, so a reporter needs no separate line table.
//! All types derive `Clone, Eq, PartialEq, Hash` so token streams remain
//! hashable alongside their errors.

use crate::span::Span;

/// A lexical error: where it happened and what went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// Byte range of the offending text.
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 0-based byte column within the line.
    pub column: u32,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexical error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// Missing closing quote, or a line terminator inside the literal.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Missing closing `` ` `` for a template literal.
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    /// Missing closing `/`, or a line terminator inside the literal.
    #[error("unterminated regular expression literal")]
    UnterminatedRegex,
    /// Missing `*/` for a block comment.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// Malformed escape (`\x` / `\u` with bad digits, code point out of
    /// range, or a legacy octal escape).
    #[error("invalid escape sequence `\\{escape_char}`")]
    InvalidEscapeSequence { escape_char: char },
    /// Malformed numeric literal (`0x` with no digits, `1e`, `3in`, ...).
    #[error("invalid numeric literal")]
    InvalidNumericLiteral,
    /// A character with no lexical rule at this position.
    #[error("unexpected character `{ch}`")]
    UnexpectedCharacter { ch: char },
    /// Input ended while one or more `${...}` substitutions were open.
    #[error("unbalanced `${{` in template literal")]
    UnbalancedTemplateBrace,
    /// Source carries a UTF-16 byte order mark; only UTF-8 is accepted.
    #[error("unsupported source encoding: {encoding}")]
    UnsupportedEncoding { encoding: &'static str },
    /// Interior NUL byte in source text.
    #[error("NUL byte in source")]
    InteriorNull,
}

impl LexError {
    /// Create an error at a position.
    pub fn new(kind: LexErrorKind, span: Span, line: u32, column: u32) -> Self {
        Self {
            span,
            line,
            column,
            kind,
        }
    }

    #[cold]
    pub fn unterminated_string(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span, line, column)
    }

    #[cold]
    pub fn unterminated_template(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnterminatedTemplate, span, line, column)
    }

    #[cold]
    pub fn unterminated_regex(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnterminatedRegex, span, line, column)
    }

    #[cold]
    pub fn unterminated_comment(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnterminatedComment, span, line, column)
    }

    #[cold]
    pub fn invalid_escape(span: Span, line: u32, column: u32, escape_char: char) -> Self {
        Self::new(
            LexErrorKind::InvalidEscapeSequence { escape_char },
            span,
            line,
            column,
        )
    }

    #[cold]
    pub fn invalid_number(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::InvalidNumericLiteral, span, line, column)
    }

    #[cold]
    pub fn unexpected_char(span: Span, line: u32, column: u32, ch: char) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter { ch }, span, line, column)
    }

    #[cold]
    pub fn unbalanced_template_brace(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnbalancedTemplateBrace, span, line, column)
    }

    #[cold]
    pub fn unsupported_encoding(span: Span, encoding: &'static str) -> Self {
        // Encoding issues are detected before scanning; a BOM is always
        // at the start of the file.
        Self::new(LexErrorKind::UnsupportedEncoding { encoding }, span, 1, 0)
    }

    #[cold]
    pub fn interior_null(span: Span, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::InteriorNull, span, line, column)
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_construction() {
        let span = Span::new(10, 15);
        let err = LexError::unterminated_string(span, 2, 4);
        assert_eq!(err.span, span);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 4);
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn error_display_includes_position() {
        let err = LexError::unterminated_regex(Span::new(0, 3), 3, 7);
        let msg = format!("{err}");
        assert!(msg.starts_with("3:7:"));
        assert!(msg.contains("regular expression"));
    }

    #[test]
    fn escape_error_carries_char() {
        let err = LexError::invalid_escape(Span::new(5, 7), 1, 5, 'q');
        assert_eq!(
            err.kind,
            LexErrorKind::InvalidEscapeSequence { escape_char: 'q' }
        );
        assert!(format!("{}", err.kind).contains("\\q"));
    }

    #[test]
    fn error_equality_and_hash() {
        use std::collections::HashSet;
        let a = LexError::invalid_number(Span::new(0, 5), 1, 0);
        let b = LexError::invalid_number(Span::new(0, 5), 1, 0);
        let c = LexError::unterminated_comment(Span::new(0, 5), 1, 0);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn encoding_error_pinned_to_file_start() {
        let err = LexError::unsupported_encoding(Span::new(0, 2), "UTF-16 LE");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 0);
        assert!(format!("{}", err.kind).contains("UTF-16 LE"));
    }

    #[test]
    fn all_factory_methods_compile() {
        let s = Span::new(0, 1);
        let _ = LexError::unterminated_string(s, 1, 0);
        let _ = LexError::unterminated_template(s, 1, 0);
        let _ = LexError::unterminated_regex(s, 1, 0);
        let _ = LexError::unterminated_comment(s, 1, 0);
        let _ = LexError::invalid_escape(s, 1, 0, 'q');
        let _ = LexError::invalid_number(s, 1, 0);
        let _ = LexError::unexpected_char(s, 1, 0, '#');
        let _ = LexError::unbalanced_template_brace(s, 1, 0);
        let _ = LexError::unsupported_encoding(s, "UTF-16 BE");
        let _ = LexError::interior_null(s, 1, 0);
    }
}
