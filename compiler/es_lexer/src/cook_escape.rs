//! Escape processing for string and template literal content.
//!
//! Escape classes per the ES6 lexical grammar:
//!
//! - Single escapes: `\'` `\"` `` \` `` `\\` `\b` `\f` `\n` `\r` `\t` `\v`
//! - `\0` (when not followed by a digit) → NUL
//! - Hex: `\xHH`
//! - Unicode: `\uHHHH` and `\u{H...H}` (1-6 digits, ≤ 0x10FFFF)
//! - Line continuation: `\` before LF, CR, CRLF, LS, or PS → nothing
//! - Non-escape characters: `\a` → `a` (not an error)
//! - Legacy octal escapes (`\1`..`\7`, `\0` before a digit) → diagnostic,
//!   digit kept verbatim (the strict grammar has no octal escapes)
//!
//! Malformed escapes push an error and substitute U+FFFD so cooking can
//! continue. A `\uHHHH` surrogate pair is combined into one scalar; a lone
//! surrogate half becomes U+FFFD (Rust strings cannot hold it).

use crate::lex_error::LexError;
use crate::span::Span;

/// Unescape string or template content (the text between the delimiters).
///
/// `base_offset` is the source offset of `content`; `line`/`column` locate
/// the owning token for error positions. Escape errors are appended to
/// `errors`.
///
/// Fast path: if the content has no backslash, returns `None` to signal
/// the caller can intern the source slice directly.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32 — entire source file < u32::MAX bytes"
)]
pub(crate) fn unescape(
    content: &str,
    base_offset: u32,
    line: u32,
    column: u32,
    errors: &mut Vec<LexError>,
) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(content.len());
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            // Regular character — copy it whole
            let ch = char_at(content, i);
            result.push(ch);
            i += ch.len_utf8();
            continue;
        }

        let esc_start = i;
        i += 1; // consume '\'
        let Some(esc) = content[i..].chars().next() else {
            // Trailing backslash (only reachable in unterminated recovery)
            errors.push(LexError::invalid_escape(
                escape_span(base_offset, esc_start, i),
                line,
                column,
                '\\',
            ));
            result.push('\\');
            break;
        };

        match esc {
            '\'' | '"' | '`' | '\\' => {
                result.push(esc);
                i += 1;
            }
            'b' => {
                result.push('\u{8}');
                i += 1;
            }
            'f' => {
                result.push('\u{C}');
                i += 1;
            }
            'n' => {
                result.push('\n');
                i += 1;
            }
            'r' => {
                result.push('\r');
                i += 1;
            }
            't' => {
                result.push('\t');
                i += 1;
            }
            'v' => {
                result.push('\u{B}');
                i += 1;
            }
            'x' => {
                i += 1; // consume 'x'
                i = hex_escape(content, i, base_offset, esc_start, line, column, &mut result, errors);
            }
            'u' => {
                i += 1; // consume 'u'
                i = unicode_escape(content, i, base_offset, esc_start, line, column, &mut result, errors);
            }
            // Line continuations contribute nothing
            '\n' => i += 1,
            '\r' => {
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            '\u{2028}' | '\u{2029}' => i += 3,
            '0' if !matches!(bytes.get(i + 1), Some(b'0'..=b'9')) => {
                result.push('\0');
                i += 1;
            }
            // Annex B legacy octal escapes are not decoded: report them
            // and keep the digit verbatim
            '0'..='7' => {
                errors.push(LexError::invalid_escape(
                    escape_span(base_offset, esc_start, i + 1),
                    line,
                    column,
                    esc,
                ));
                result.push(esc);
                i += 1;
            }
            // NonEscapeCharacter: the backslash is dropped
            _ => {
                result.push(esc);
                i += esc.len_utf8();
            }
        }
    }

    Some(result)
}

/// `\xHH`: exactly two hex digits. Returns the index after the escape.
#[allow(clippy::too_many_arguments, reason = "internal helper shares unescape state")]
fn hex_escape(
    content: &str,
    i: usize,
    base_offset: u32,
    esc_start: usize,
    line: u32,
    column: u32,
    result: &mut String,
    errors: &mut Vec<LexError>,
) -> usize {
    if let Some(code) = parse_hex_digits(content, i, 2) {
        // Two hex digits are always a valid scalar (< 0x100)
        result.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        return i + 2;
    }
    errors.push(LexError::invalid_escape(
        escape_span(base_offset, esc_start, i),
        line,
        column,
        'x',
    ));
    result.push('\u{FFFD}');
    i
}

/// `\uHHHH` or `\u{H...H}`. Returns the index after the escape.
///
/// A `\uHHHH` high surrogate followed immediately by a `\uHHHH` low
/// surrogate is combined into one code point.
#[allow(clippy::too_many_arguments, reason = "internal helper shares unescape state")]
fn unicode_escape(
    content: &str,
    mut i: usize,
    base_offset: u32,
    esc_start: usize,
    line: u32,
    column: u32,
    result: &mut String,
    errors: &mut Vec<LexError>,
) -> usize {
    let bytes = content.as_bytes();

    if bytes.get(i) == Some(&b'{') {
        // \u{H...H}: 1-6 hex digits up to the closing brace
        let digits_start = i + 1;
        let mut end = digits_start;
        while end < bytes.len() && bytes[end] != b'}' {
            end += 1;
        }
        let digit_count = end - digits_start;
        if end < bytes.len() && (1..=6).contains(&digit_count) {
            if let Some(code) = parse_hex_digits(content, digits_start, digit_count) {
                if let Some(ch) = char::from_u32(code) {
                    result.push(ch);
                    return end + 1;
                }
            }
        }
        // Bad digits, too many digits, or missing `}`
        let after = if end < bytes.len() { end + 1 } else { end };
        errors.push(LexError::invalid_escape(
            escape_span(base_offset, esc_start, after),
            line,
            column,
            'u',
        ));
        result.push('\u{FFFD}');
        return after;
    }

    // \uHHHH: exactly four hex digits
    let Some(unit) = parse_hex_digits(content, i, 4) else {
        errors.push(LexError::invalid_escape(
            escape_span(base_offset, esc_start, i),
            line,
            column,
            'u',
        ));
        result.push('\u{FFFD}');
        return i;
    };
    i += 4;

    if (0xD800..=0xDBFF).contains(&unit) {
        // High surrogate — try to pair with an immediately following \uHHHH
        if bytes.get(i) == Some(&b'\\') && bytes.get(i + 1) == Some(&b'u') {
            if let Some(low) = parse_hex_digits(content, i + 2, 4) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    result.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                    return i + 6;
                }
            }
        }
        // Lone high surrogate — not representable as a scalar
        result.push('\u{FFFD}');
        return i;
    }
    if (0xDC00..=0xDFFF).contains(&unit) {
        // Lone low surrogate
        result.push('\u{FFFD}');
        return i;
    }

    result.push(char::from_u32(unit).unwrap_or('\u{FFFD}'));
    i
}

/// Parse exactly `count` ASCII hex digits starting at byte `i`.
fn parse_hex_digits(content: &str, i: usize, count: usize) -> Option<u32> {
    let bytes = content.as_bytes();
    if i + count > bytes.len() {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[i..i + count] {
        let digit = (b as char).to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

#[inline]
fn char_at(content: &str, i: usize) -> char {
    content[i..].chars().next().unwrap_or('\u{FFFD}')
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32 — entire source file < u32::MAX bytes"
)]
fn escape_span(base_offset: u32, start: usize, end: usize) -> Span {
    Span::new(base_offset + start as u32, base_offset + end as u32)
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

    fn cook(content: &str) -> (Option<String>, Vec<LexError>) {
        let mut errors = Vec::new();
        let cooked = unescape(content, 0, 1, 0, &mut errors);
        (cooked, errors)
    }

    #[test]
    fn fast_path_no_backslash() {
        let (cooked, errors) = cook("hello world");
        assert_eq!(cooked, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn single_escapes() {
        let (cooked, errors) = cook(r#"a\n\t\r\b\f\v\\\'\"\`z"#);
        assert_eq!(
            cooked.unwrap(),
            "a\n\t\r\u{8}\u{C}\u{B}\\'\"`z"
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn null_escape() {
        let (cooked, errors) = cook(r"a\0b");
        assert_eq!(cooked.unwrap(), "a\0b");
        assert!(errors.is_empty());
    }

    #[test]
    fn hex_escape() {
        let (cooked, errors) = cook(r"\x41\x7A");
        assert_eq!(cooked.unwrap(), "Az");
        assert!(errors.is_empty());
    }

    #[test]
    fn hex_escape_bad_digits() {
        let (cooked, errors) = cook(r"\xZZ");
        assert_eq!(cooked.unwrap(), "\u{FFFD}ZZ");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            crate::lex_error::LexErrorKind::InvalidEscapeSequence { escape_char: 'x' }
        ));
    }

    #[test]
    fn unicode_four_digit() {
        let (cooked, errors) = cook(r"A\u03BB");
        assert_eq!(cooked.unwrap(), "A\u{3BB}");
        assert!(errors.is_empty());
    }

    #[test]
    fn unicode_braced() {
        let (cooked, errors) = cook(r"\u{41}\u{1F600}");
        assert_eq!(cooked.unwrap(), "A\u{1F600}");
        assert!(errors.is_empty());
    }

    #[test]
    fn unicode_braced_out_of_range() {
        let (cooked, errors) = cook(r"\u{110000}");
        assert_eq!(cooked.unwrap(), "\u{FFFD}");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unicode_braced_missing_close() {
        let (cooked, errors) = cook(r"\u{41");
        assert_eq!(cooked.unwrap(), "\u{FFFD}");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn surrogate_pair_combines() {
        // 😀 = U+1F600
        let (cooked, errors) = cook(r"\uD83D\uDE00");
        assert_eq!(cooked.unwrap(), "\u{1F600}");
        assert!(errors.is_empty());
    }

    #[test]
    fn lone_surrogate_becomes_replacement() {
        let (cooked, _) = cook(r"\uD800x");
        assert_eq!(cooked.unwrap(), "\u{FFFD}x");
        let (cooked, _) = cook(r"\uDC00");
        assert_eq!(cooked.unwrap(), "\u{FFFD}");
    }

    #[test]
    fn line_continuation_lf() {
        let (cooked, errors) = cook("a\\\nb");
        assert_eq!(cooked.unwrap(), "ab");
        assert!(errors.is_empty());
    }

    #[test]
    fn line_continuation_crlf_is_one() {
        let (cooked, _) = cook("a\\\r\nb");
        assert_eq!(cooked.unwrap(), "ab");
    }

    #[test]
    fn line_continuation_paragraph_separator() {
        let (cooked, _) = cook("a\\\u{2029}b");
        assert_eq!(cooked.unwrap(), "ab");
    }

    #[test]
    fn non_escape_character_drops_backslash() {
        // \a is not an error in ES — it is just `a`
        let (cooked, errors) = cook(r"\a\q\8");
        assert_eq!(cooked.unwrap(), "aq8");
        assert!(errors.is_empty());
    }

    #[test]
    fn legacy_octal_is_error() {
        let (cooked, errors) = cook(r"\1");
        assert_eq!(cooked.unwrap(), "1");
        assert_eq!(errors.len(), 1);

        let (_, errors) = cook(r"\01");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn legacy_octal_digits_kept_verbatim() {
        // \101 is octal for 'A' in Annex B, but the strict grammar has no
        // octal escapes: report the escape, keep the digits
        let (cooked, errors) = cook(r"\101");
        assert_eq!(cooked.unwrap(), "101");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            crate::lex_error::LexErrorKind::InvalidEscapeSequence { escape_char: '1' }
        ));
    }

    #[test]
    fn multibyte_escaped_char() {
        let (cooked, errors) = cook("\\\u{2713}");
        assert_eq!(cooked.unwrap(), "\u{2713}");
        assert!(errors.is_empty());
    }

    #[test]
    fn error_span_offsets_include_base() {
        let mut errors = Vec::new();
        let cooked = unescape(r"ab\xZZ", 100, 3, 9, &mut errors);
        assert!(cooked.is_some());
        assert_eq!(errors[0].span.start, 102);
        assert_eq!(errors[0].line, 3);
        assert_eq!(errors[0].column, 9);
    }
}
