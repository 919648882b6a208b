//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position
//! has reached or exceeded the source length. No explicit bounds checking
//! is performed in the common case -- the sentinel guarantees safe termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from EOF by comparing `pos` against `source_len`.
//! A null at `pos < source_len` is an interior null (error token);
//! a null at `pos >= source_len` is the sentinel (EOF).

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when we need to search for more bytes than
/// `memchr3` supports (which handles at most 3 needles).
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at EOF (the sentinel byte). Interior null bytes
    /// also return `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead of current.
    ///
    /// Safe to call at any position: cache-line alignment provides at least
    /// one full cache line of zero padding after the sentinel.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Returns the byte three positions ahead of current.
    ///
    /// Needed for 4-byte maximal-munch punctuators (`>>>=`) and for
    /// inspecting the tail of a 3-byte line separator.
    #[inline]
    pub fn peek3(&self) -> u8 {
        self.buf[self.pos as usize + 3]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// EOF is when the current byte is the sentinel (`0x00`) and the
    /// position is at or past the source length. This distinguishes
    /// EOF from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Decode the full UTF-8 character at the current position.
    ///
    /// Returns U+FFFD for invalid sequences (stray continuation bytes,
    /// truncated sequences running into the sentinel). The source was
    /// originally `&str`, so this only happens past `source_len`.
    pub fn current_char(&self) -> char {
        let width = Self::utf8_char_width(self.current()) as usize;
        let start = self.pos as usize;
        let end = (start + width).min(self.buf.len());
        match std::str::from_utf8(&self.buf[start..end]) {
            Ok(s) => s.chars().next().unwrap_or('\u{FFFD}'),
            Err(_) => '\u{FFFD}',
        }
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content (`end <= source_len`)
    /// and on valid UTF-8 character boundaries. This is guaranteed when
    /// `start` and `end` come from the scanner's token boundary tracking,
    /// since the source was originally valid UTF-8 (`&str`).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        // SAFETY: The source buffer was constructed from `&str` (valid UTF-8).
        // The scanner ensures start..end falls on character boundaries within
        // the source content.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }

    /// Extract a source substring from `start` to the current position.
    ///
    /// Equivalent to `self.slice(start, self.pos())`.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// The sentinel byte (`0x00`) naturally terminates the loop for all
    /// reasonable predicates, as `pred(0)` should return `false`.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`. This is true for all standard byte
    /// classification predicates (`is_ascii_alphanumeric`, `is_ascii_whitespace`,
    /// etc.). If `pred(0)` returns `true`, the cursor advances into the
    /// zero-filled padding region but will eventually stop (all padding is `0x00`,
    /// and Rust's bounds checking prevents out-of-bounds access).
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// Uses the leading byte to determine character width:
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    ///
    /// Uses the current byte as the leading byte to determine how many
    /// bytes to skip. Handles ASCII (1 byte) through 4-byte sequences.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next candidate line terminator or EOF.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// Used by the line-comment scanner. Candidates are `\n`, `\r`, and
    /// `0xE2` (the lead byte of U+2028/U+2029); the caller must verify
    /// that an `0xE2` hit is actually LS or PS and resume otherwise.
    /// Scans only within source content (not into sentinel/padding).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_line_terminator(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr3(b'\n', b'\r', 0xE2, remaining) {
            self.pos += offset as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance past ordinary string content to the next interesting byte.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// "Interesting" bytes for strings: the closing `quote`, `\`, `\n`, `\r`.
    /// Uses memchr3 for SIMD-accelerated search of the 3 most common
    /// delimiters (quote, `\`, `\n`), with a secondary check for `\r`.
    /// The quote is a parameter because ECMAScript strings come in both
    /// `'` and `"` flavors.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        // Find nearest of quote, \, or \n (the 3 most common string terminators)
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        // Also check for \r (rare but must be caught; lone CR terminates too)
        let cr = memchr::memchr(b'\r', remaining);

        // Take the earliest match
        let offset = earliest_of(primary, cr);

        if let Some(off) = offset {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0 // EOF sentinel
        }
    }

    /// Advance past ordinary template content to the next interesting byte.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// Template delimiters: `` ` ``, `$` (candidate for `${`), `\`.
    /// Line terminators are ordinary template content, so they are not
    /// in the delimiter set.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_template_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr3(b'`', b'$', b'\\', remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance until `byte` is found or EOF is reached.
    ///
    /// Returns `true` if the byte was found (cursor positioned at it),
    /// `false` at EOF. Interior null bytes are skipped (they are not EOF).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_byte(&mut self, byte: u8) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(byte, remaining) {
            self.pos += offset as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }

    /// Advance past ASCII horizontal whitespace (SP, TAB, VT, FF).
    ///
    /// Uses a simple byte loop which is fastest for the common case of
    /// short whitespace runs (1-4 bytes typical in source code). The
    /// sentinel byte (`0x00`) naturally terminates scanning since it is
    /// not in the set. NBSP and U+FEFF are multi-byte and handled by the
    /// scanner's non-ASCII dispatch instead.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' || b == 0x0B || b == 0x0C {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SourceBuffer;

    // === Basic Navigation ===

    #[test]
    fn current_returns_first_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn advance_moves_forward() {
        let buf = SourceBuffer::new("abc");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn advance_n_moves_multiple() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), b'd');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn advance_through_entire_source() {
        let buf = SourceBuffer::new("hi");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.current(), b'h');
        cursor.advance();
        assert_eq!(cursor.current(), b'i');
        cursor.advance();
        assert!(cursor.is_eof());
    }

    // === Peek ===

    #[test]
    fn peek_returns_next_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
    }

    #[test]
    fn peek2_returns_two_ahead() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek2(), b'c');
    }

    #[test]
    fn peek3_returns_three_ahead() {
        let buf = SourceBuffer::new(">>>=");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek3(), b'=');
    }

    #[test]
    fn peek_near_end_returns_sentinel() {
        let buf = SourceBuffer::new("ab");
        let mut cursor = buf.cursor();
        cursor.advance(); // at 'b'
        assert_eq!(cursor.peek(), 0); // sentinel
    }

    #[test]
    fn peek2_near_end_returns_zero() {
        let buf = SourceBuffer::new("a");
        let cursor = buf.cursor();
        // current='a', peek=sentinel(0), peek2=padding(0)
        assert_eq!(cursor.peek2(), 0);
    }

    // === EOF Detection ===

    #[test]
    fn is_eof_at_sentinel() {
        let buf = SourceBuffer::new("x");
        let mut cursor = buf.cursor();
        assert!(!cursor.is_eof());
        cursor.advance(); // past 'x', at sentinel
        assert!(cursor.is_eof());
    }

    #[test]
    fn is_eof_on_empty_source() {
        let buf = SourceBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
    }

    #[test]
    fn interior_null_is_not_eof() {
        let buf = SourceBuffer::new("a\0b");
        let mut cursor = buf.cursor();
        cursor.advance(); // at '\0' (interior null)
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof()); // pos=1 < source_len=3
        cursor.advance(); // at 'b'
        assert_eq!(cursor.current(), b'b');
    }

    // === current_char ===

    #[test]
    fn current_char_ascii() {
        let buf = SourceBuffer::new("x");
        let cursor = buf.cursor();
        assert_eq!(cursor.current_char(), 'x');
    }

    #[test]
    fn current_char_multibyte() {
        let buf = SourceBuffer::new("\u{2028}rest");
        let cursor = buf.cursor();
        assert_eq!(cursor.current_char(), '\u{2028}');
    }

    // === Slice ===

    #[test]
    fn slice_extracts_substring() {
        let buf = SourceBuffer::new("hello world");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(0, 5), "hello");
        assert_eq!(cursor.slice(6, 11), "world");
    }

    #[test]
    fn slice_from_extracts_to_current() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3); // pos = 3
        assert_eq!(cursor.slice_from(0), "abc");
        assert_eq!(cursor.slice_from(1), "bc");
    }

    #[test]
    fn slice_empty_range() {
        let buf = SourceBuffer::new("hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(2, 2), "");
    }

    #[test]
    fn slice_utf8_multibyte() {
        let source = "hi \u{1F600} bye"; // emoji is 4 bytes
        let buf = SourceBuffer::new(source);
        let cursor = buf.cursor();
        // "hi " = 3 bytes, emoji = 4 bytes, " bye" = 4 bytes
        assert_eq!(cursor.slice(0, 3), "hi ");
        assert_eq!(cursor.slice(7, 11), " bye");
    }

    // === eat_while ===

    #[test]
    fn eat_while_consumes_matching_bytes() {
        let buf = SourceBuffer::new("aaabbb");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_sentinel() {
        let buf = SourceBuffer::new("aaa");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_while_no_match() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'z');
        assert_eq!(cursor.pos(), 0); // didn't move
    }

    // === Copy Semantics ===

    #[test]
    fn cursor_is_copy_for_checkpointing() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);

        // Snapshot via Copy
        let saved = cursor;

        // Advance original
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);

        // Saved is still at old position
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }

    // === skip_to_line_terminator ===

    #[test]
    fn skip_to_line_terminator_finds_lf() {
        let buf = SourceBuffer::new("hello\nworld");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_line_terminator();
        assert_eq!(b, b'\n');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_line_terminator_finds_cr() {
        let buf = SourceBuffer::new("hello\rworld");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_line_terminator();
        assert_eq!(b, b'\r');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_line_terminator_stops_at_e2_lead() {
        // U+2028 starts with 0xE2; the caller disambiguates.
        let buf = SourceBuffer::new("ab\u{2028}cd");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_line_terminator();
        assert_eq!(b, 0xE2);
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn skip_to_line_terminator_eof() {
        let buf = SourceBuffer::new("no newline here");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_line_terminator();
        assert_eq!(b, 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_line_terminator_empty_source() {
        let buf = SourceBuffer::new("");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_line_terminator();
        assert_eq!(b, 0);
        assert_eq!(cursor.pos(), 0);
    }

    // === skip_to_string_delim ===

    #[test]
    fn skip_to_string_delim_finds_double_quote() {
        let buf = SourceBuffer::new("hello\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_finds_single_quote() {
        let buf = SourceBuffer::new("hello'rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'\'');
        assert_eq!(b, b'\'');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_ignores_other_quote() {
        // Scanning a single-quoted body: " is ordinary content.
        let buf = SourceBuffer::new("say \"hi\"'rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'\'');
        assert_eq!(b, b'\'');
        assert_eq!(cursor.pos(), 8);
    }

    #[test]
    fn skip_to_string_delim_finds_backslash() {
        let buf = SourceBuffer::new("hello\\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_finds_newline() {
        let buf = SourceBuffer::new("hello\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\n');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_finds_cr() {
        let buf = SourceBuffer::new("hello\rrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\r');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_string_delim_returns_earliest() {
        // backslash before quote
        let buf = SourceBuffer::new("abc\\\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn skip_to_string_delim_eof() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_string_delim_cr_before_newline() {
        // \r appears before \n — should find \r first
        let buf = SourceBuffer::new("abc\r\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_string_delim(b'"');
        assert_eq!(b, b'\r');
        assert_eq!(cursor.pos(), 3);
    }

    // === skip_to_template_delim ===

    #[test]
    fn skip_to_template_delim_finds_backtick() {
        let buf = SourceBuffer::new("hello`rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_template_delim();
        assert_eq!(b, b'`');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_template_delim_finds_dollar() {
        let buf = SourceBuffer::new("hello${x}");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_template_delim();
        assert_eq!(b, b'$');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_template_delim_finds_backslash() {
        let buf = SourceBuffer::new("hello\\rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_template_delim();
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_template_delim_skips_newlines() {
        // Line terminators are ordinary template content.
        let buf = SourceBuffer::new("a\nb\r\nc`");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_template_delim();
        assert_eq!(b, b'`');
        assert_eq!(cursor.pos(), 6);
    }

    #[test]
    fn skip_to_template_delim_eof() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_template_delim();
        assert_eq!(b, 0);
        assert!(cursor.is_eof());
    }

    // === skip_to_byte ===

    #[test]
    fn skip_to_byte_finds_target() {
        let buf = SourceBuffer::new("comment */ rest");
        let mut cursor = buf.cursor();
        assert!(cursor.skip_to_byte(b'*'));
        assert_eq!(cursor.pos(), 8);
        assert_eq!(cursor.current(), b'*');
    }

    #[test]
    fn skip_to_byte_eof_when_absent() {
        let buf = SourceBuffer::new("no star here");
        let mut cursor = buf.cursor();
        assert!(!cursor.skip_to_byte(b'*'));
        assert!(cursor.is_eof());
    }

    // === eat_whitespace ===

    #[test]
    fn eat_whitespace_spaces_only() {
        let buf = SourceBuffer::new("    hello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 4);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn eat_whitespace_tabs_only() {
        let buf = SourceBuffer::new("\t\t\thello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn eat_whitespace_vt_and_ff() {
        let buf = SourceBuffer::new("\x0B\x0C x");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'x');
    }

    #[test]
    fn eat_whitespace_no_whitespace() {
        let buf = SourceBuffer::new("hello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 0); // didn't move
    }

    #[test]
    fn eat_whitespace_newline_stops() {
        // Line terminators are NOT horizontal whitespace — should stop at \n
        let buf = SourceBuffer::new("   \nhello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'\n');
    }

    #[test]
    fn eat_whitespace_cr_stops() {
        let buf = SourceBuffer::new("  \rhello");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.current(), b'\r');
    }

    #[test]
    fn eat_whitespace_sentinel_stops() {
        // Only whitespace then EOF — sentinel (0x00) stops scanning
        let buf = SourceBuffer::new("     ");
        let mut cursor = buf.cursor();
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 5);
        assert!(cursor.is_eof());
    }
}
