//! Byte ranges into the source text.

use std::fmt;

/// A half-open byte range `[start, end)` into the source.
///
/// Offsets are `u32`, so a span is 8 bytes and cheap to copy around in
/// token structs. Sources larger than 4 GiB are rejected up front by
/// [`Span::try_from_range`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// Offset overflow when building a [`Span`] from `usize` positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// The range start does not fit in `u32`.
    StartTooLarge(usize),
    /// The range end does not fit in `u32`.
    EndTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (which, v) = match self {
            SpanError::StartTooLarge(v) => ("start", v),
            SpanError::EndTooLarge(v) => ("end", v),
        };
        write!(f, "span {which} {v} does not fit in u32")
    }
}

impl std::error::Error for SpanError {}

impl Span {
    /// Placeholder span for synthesized tokens.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Build a span from `usize` offsets, rejecting values past `u32::MAX`.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        Ok(Span {
            start: u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?,
            end: u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?,
        })
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Number of bytes covered.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the span (start inclusive, end
    /// exclusive).
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        (self.start..self.end).contains(&offset)
    }

    /// The span as a `usize` range, for indexing into source text.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const _: () = assert!(std::mem::size_of::<Span>() == 8);

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn length_and_emptiness() {
        assert_eq!(Span::new(3, 11).len(), 8);
        assert!(!Span::new(3, 11).is_empty());
        assert!(Span::point(7).is_empty());
        assert_eq!(Span::point(7).len(), 0);
        assert!(Span::DUMMY.is_empty());
    }

    #[test]
    fn containment_is_half_open() {
        let span = Span::new(4, 9);
        assert!(span.contains(4));
        assert!(span.contains(8));
        assert!(!span.contains(9));
        assert!(!span.contains(3));
    }

    #[test]
    fn range_conversions() {
        let span = Span::try_from_range(6..14).expect("offsets fit in u32");
        assert_eq!((span.start, span.end), (6, 14));
        assert_eq!(span.to_range(), 6..14);
    }

    #[test]
    fn oversized_offsets_are_rejected() {
        let big = u32::MAX as usize + 1;
        assert!(matches!(
            Span::try_from_range(big..big + 1),
            Err(SpanError::StartTooLarge(_))
        ));
        assert!(matches!(
            Span::try_from_range(0..big),
            Err(SpanError::EndTooLarge(_))
        ));
    }

    #[test]
    fn formats_as_rust_range() {
        assert_eq!(format!("{:?}", Span::new(2, 5)), "2..5");
        assert_eq!(format!("{}", Span::new(2, 5)), "2..5");
        let err = SpanError::EndTooLarge(1 << 40);
        assert!(err.to_string().contains("does not fit"));
    }
}
