//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect EOF without explicit bounds checking.
//! The total buffer size is rounded up to the next 64-byte boundary for
//! cache-line alignment, which also provides safe padding for `peek()`
//! and `peek2()` operations near the end of the buffer.
//!
//! # Encoding Detection
//!
//! During construction, the buffer scans for encoding issues:
//! - UTF-16 BOMs (wrong encoding; the lexer only accepts UTF-8)
//! - Interior null bytes (cannot flow through sentinel-based scanning)
//!
//! A UTF-8 BOM is NOT an issue: ECMAScript classifies U+FEFF as
//! whitespace, so the scanner lexes it as an ordinary whitespace token.
//!
//! Issues are recorded as [`EncodingIssue`] values. The cooking layer
//! (`es_lexer`) converts these to diagnostics with spans and messages.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer for zero-bounds-check scanning.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent bytes
/// (cache-line padding) are also `0x00`, ensuring safe reads for `peek()`
/// and `peek2()` near the end of the buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Encoding issues detected during construction.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
///
/// Carries the kind, byte position, and byte length of the problematic
/// sequence. The cooking layer converts these to `LexError` diagnostics
/// using `Span::new(pos, pos + len)` -- no need to hard-code per-kind
/// lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Byte position in the source where the issue was found.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue detected in source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-16 Little-Endian BOM (`0xFF 0xFE`) at start. Wrong encoding.
    Utf16LeBom,
    /// UTF-16 Big-Endian BOM (`0xFE 0xFF`) at start. Wrong encoding.
    Utf16BeBom,
    /// Null byte (U+0000) in source content. Conflicts with the sentinel.
    InteriorNull,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source code.
    ///
    /// Copies the source bytes into a cache-line-aligned buffer with a
    /// `0x00` sentinel byte appended. Scans for encoding issues (UTF-16
    /// BOMs, interior null bytes) and records them.
    ///
    /// # File Size
    ///
    /// Source files larger than `u32::MAX` bytes (~4 GiB) are accepted but
    /// the `source_len` field saturates at `u32::MAX`. Callers should
    /// reject oversized files upstream.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Source + sentinel, rounded up to a 64-byte boundary. The zeroed
        // allocation doubles as sentinel and padding.
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        prefetch_buffer(&buf);

        let mut encoding_issues = Vec::new();
        detect_utf16_bom(source_bytes, &mut encoding_issues);
        detect_interior_nulls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            // Saturates for files > 4 GiB; callers reject those upstream.
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    /// Subsequent bytes are zero-filled padding up to the next 64-byte boundary.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction.
    ///
    /// The cooking layer (`es_lexer`) converts these into diagnostic
    /// errors with proper spans and messages.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 64);

/// Detect UTF-16 byte order marks at the start of the source.
///
/// These bytes cannot appear in valid UTF-8, but callers building the
/// buffer from lossily-converted input still get a precise diagnostic
/// instead of a cascade of unexpected-character errors.
fn detect_utf16_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let kind = match source {
        [0xFF, 0xFE, ..] => EncodingIssueKind::Utf16LeBom,
        [0xFE, 0xFF, ..] => EncodingIssueKind::Utf16BeBom,
        _ => return,
    };
    issues.push(EncodingIssue { kind, pos: 0, len: 2 });
}

/// Detect null bytes (U+0000) within the source content.
///
/// Uses `memchr` for SIMD-accelerated null byte search instead of
/// byte-at-a-time iteration.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut offset = 0;
    while let Some(pos) = memchr::memchr(0, &source[offset..]) {
        let absolute = offset + pos;
        if let Ok(p) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos: p,
                len: 1,
            });
        }
        offset = absolute + 1;
    }
}

/// Hint the CPU to pull the first few cache lines of the buffer into L1
/// before the scanner's initial reads. A no-op off x86_64.
#[allow(unsafe_code)]
fn prefetch_buffer(buf: &[u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        use std::arch::x86_64::_mm_prefetch;
        let p = buf.as_ptr().cast::<i8>();
        for offset in (0..256).step_by(CACHE_LINE) {
            if offset >= buf.len() {
                break;
            }
            // SAFETY: `offset < buf.len()`, so the address is inside the
            // allocation; `_mm_prefetch` is a hint and cannot fault.
            unsafe {
                // 3 = _MM_HINT_T0, prefetch into all cache levels
                _mm_prefetch::<3>(p.add(offset));
            }
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    let _ = buf;
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    fn null_positions(buf: &SourceBuffer) -> Vec<u32> {
        buf.encoding_issues()
            .iter()
            .filter(|i| i.kind == EncodingIssueKind::InteriorNull)
            .map(|i| i.pos)
            .collect()
    }

    // === Layout ===

    #[test]
    fn sentinel_terminates_every_source() {
        for source in ["", "x", "var x = 42", "日本語"] {
            let buf = SourceBuffer::new(source);
            assert_eq!(buf.len() as usize, source.len());
            assert_eq!(buf.as_bytes(), source.as_bytes());
            assert_eq!(buf.as_sentinel_bytes()[source.len()], 0, "{source:?}");
        }
    }

    #[test]
    fn padding_rounds_to_cache_line() {
        for len in [0, 1, 63, 64, 65, 127, 128, 1000] {
            let source = "y".repeat(len);
            let buf = SourceBuffer::new(&source);
            let total = buf.as_sentinel_bytes().len();
            assert_eq!(total % CACHE_LINE, 0, "source length {len}");
            assert!(total > len, "sentinel must fit after {len} bytes");
            // Everything past the content is zero
            assert!(buf.as_sentinel_bytes()[len..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn is_empty_only_for_empty_source() {
        assert!(SourceBuffer::new("").is_empty());
        assert!(!SourceBuffer::new(" ").is_empty());
    }

    // === Encoding issues ===

    #[test]
    fn utf8_bom_is_not_an_issue() {
        // U+FEFF is ECMAScript whitespace; the scanner lexes it.
        let buf = SourceBuffer::new("\u{FEFF}hello");
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn clean_source_has_no_issues() {
        let buf = SourceBuffer::new("var x = 42; // fine\n");
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn interior_nulls_located_exactly() {
        assert_eq!(null_positions(&SourceBuffer::new("ab\0cd")), vec![2]);
        assert_eq!(null_positions(&SourceBuffer::new("\0ab\0c\0")), vec![0, 3, 5]);
        assert!(null_positions(&SourceBuffer::new("no nulls here")).is_empty());
    }

    // === Cursor handoff ===

    #[test]
    fn cursor_starts_at_byte_zero() {
        let buf = SourceBuffer::new("hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn cursor_on_empty_source_is_eof() {
        let buf = SourceBuffer::new("");
        assert!(buf.cursor().is_eof());
        assert_eq!(buf.cursor().current(), 0);
    }

    #[test]
    fn large_source_round_trips() {
        let source = "z".repeat(100_000);
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.len(), 100_000);
        assert_eq!(buf.as_bytes(), source.as_bytes());
        assert_eq!(buf.as_sentinel_bytes()[100_000], 0);
    }
}
