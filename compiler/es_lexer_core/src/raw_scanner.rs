//! Raw scanner: source bytes in, `(RawTag, len)` pairs out.
//!
//! Runs over a sentinel-terminated [`Cursor`] and never touches the heap
//! apart from the template substitution stack. Keyword resolution, escape
//! validation, and numeric parsing all live in the cooking layer; this
//! stage only segments the input.
//!
//! # Design
//!
//! Dispatch is a single `match` on the current byte that covers all 256
//! values; each arm hands off to a small method which moves the cursor and
//! builds the `RawToken`. Because the sentinel is `0x00`, running off the
//! end lands in `eof()` without a separate bounds check.
//!
//! A leading `/` is ambiguous in the ECMAScript lexical grammar: it opens a
//! regular expression literal or it is the division punctuator, depending on
//! what the parser could accept next. The scanner cannot know that, so
//! [`next_token`](RawScanner::next_token) takes a [`LexGoal`] chosen by the
//! caller from the preceding significant token.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Lexical goal for interpreting a leading `/`.
///
/// Mirrors the grammar's goal symbols: `Div` selects InputElementDiv
/// (`/` and `/=` are punctuators), `Regex` selects InputElementRegExp
/// (`/` opens a regular expression literal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LexGoal {
    /// `/` is division (`/` or `/=`).
    Div,
    /// `/` opens a regular expression literal. This is the goal at the
    /// start of input, so it is the default.
    #[default]
    Regex,
}

/// Allocation-free raw scanner over a sentinel-terminated cursor.
///
/// Yields one `(tag, length)` pair per call. Malformed input is never an
/// `Err`; it comes back as one of the error variants of [`RawTag`].
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    /// Stack of brace depths, one entry per open template substitution.
    /// `` `a${ `` pushes 0; `{` / `}` inside the substitution adjust the
    /// top; a `}` when the top is 0 pops the entry and resumes template
    /// scanning (middle or tail).
    template_depth: Vec<u32>,
}

impl<'a> RawScanner<'a> {
    /// Wrap a cursor in a fresh scanner.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self {
            cursor,
            template_depth: Vec::new(),
        }
    }

    /// Number of template substitutions currently open.
    ///
    /// Nonzero after the final token means the input ended inside `${...}`,
    /// which the cooking layer reports as an unbalanced template brace.
    pub fn open_substitutions(&self) -> usize {
        self.template_depth.len()
    }

    /// Scan the next raw token.
    ///
    /// Once the source is exhausted this returns `RawTag::Eof` with
    /// `len == 0`, and keeps returning it on every later call.
    #[inline]
    pub fn next_token(&mut self, goal: LexGoal) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(),
            b' ' | b'\t' | 0x0B | 0x0C => self.whitespace(start),
            b'\r' => self.carriage_return(start),
            b'\n' => self.newline(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.string(start),
            b'`' => self.template_literal(start),
            b'/' => self.slash(start, goal),
            b'+' => self.plus(start),
            b'-' => self.minus(start),
            b'*' => self.star(start),
            b'%' => self.percent(start),
            b'^' => self.caret(start),
            b'~' => self.single(start, RawTag::Tilde),
            b'=' => self.equal(start),
            b'!' => self.bang(start),
            b'<' => self.less(start),
            b'>' => self.greater(start),
            b'.' => self.dot(start),
            b'?' => self.single(start, RawTag::Question),
            b'|' => self.pipe(start),
            b'&' => self.ampersand(start),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'[' => self.single(start, RawTag::LeftBracket),
            b']' => self.single(start, RawTag::RightBracket),
            b'{' => self.left_brace(start),
            b'}' => self.right_brace(start),
            b',' => self.single(start, RawTag::Comma),
            b':' => self.single(start, RawTag::Colon),
            b';' => self.single(start, RawTag::Semicolon),
            // Lead bytes of multi-byte characters: whitespace (NBSP, FEFF,
            // Zs), line separators (LS/PS), Unicode identifiers, or errors.
            0x80..=0xFF => self.non_ascii(start),
            // Control characters (excluding \t \n \v \f \r), DEL, and bytes
            // with no rule in the ES6 grammar (`@`, `#`, stray `\`).
            1..=8 | 14..=31 | b'@' | b'#' | b'\\' | 127 => self.unexpected_char(start),
        }
    }

    // ─── EOF ──────────────────────────────────────────────────────────

    fn eof(&mut self) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null byte. Advance past it so iteration always
            // makes progress; the cooking layer turns the token into a
            // positioned diagnostic.
            let start = self.cursor.pos();
            self.cursor.advance();
            RawToken {
                tag: RawTag::InteriorNull,
                len: self.cursor.pos() - start,
            }
        }
    }

    // ─── Whitespace & Line Terminators ────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        RawToken {
            tag: RawTag::Whitespace,
            len: self.cursor.pos() - start,
        }
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '\r'
        if self.cursor.current() == b'\n' {
            // CR LF is a single LineTerminatorSequence
            self.cursor.advance();
        }
        RawToken {
            tag: RawTag::Newline,
            len: self.cursor.pos() - start,
        }
    }

    fn newline(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        RawToken {
            tag: RawTag::Newline,
            len: self.cursor.pos() - start,
        }
    }

    // ─── Slash: comments, regex, division ─────────────────────────────

    fn slash(&mut self, start: u32, goal: LexGoal) -> RawToken {
        self.cursor.advance(); // consume first '/'
        match self.cursor.current() {
            b'/' => {
                self.cursor.advance(); // consume second '/'
                self.line_comment_body(start)
            }
            b'*' => {
                self.cursor.advance(); // consume '*'
                self.block_comment_body(start)
            }
            _ if goal == LexGoal::Regex => self.regex(start),
            b'=' => {
                self.cursor.advance();
                RawToken {
                    tag: RawTag::SlashEqual,
                    len: self.cursor.pos() - start,
                }
            }
            _ => RawToken {
                tag: RawTag::Slash,
                len: self.cursor.pos() - start,
            },
        }
    }

    /// Scan to the end of a `//` comment. The terminator itself is not
    /// consumed — any of LF, CR, LS, PS ends the comment.
    fn line_comment_body(&mut self, start: u32) -> RawToken {
        loop {
            match self.cursor.skip_to_line_terminator() {
                0xE2 => {
                    // 0xE2 is only a terminator when it leads U+2028/U+2029.
                    if self.cursor.peek() == 0x80
                        && matches!(self.cursor.peek2(), 0xA8 | 0xA9)
                    {
                        break;
                    }
                    self.cursor.advance_char();
                }
                _ => break, // '\n', '\r', or EOF
            }
        }
        RawToken {
            tag: RawTag::LineComment,
            len: self.cursor.pos() - start,
        }
    }

    /// Scan to the `*/` closing a block comment.
    fn block_comment_body(&mut self, start: u32) -> RawToken {
        loop {
            if !self.cursor.skip_to_byte(b'*') {
                return RawToken {
                    tag: RawTag::UnterminatedComment,
                    len: self.cursor.pos() - start,
                };
            }
            self.cursor.advance(); // consume '*'
            if self.cursor.current() == b'/' {
                self.cursor.advance();
                return RawToken {
                    tag: RawTag::BlockComment,
                    len: self.cursor.pos() - start,
                };
            }
        }
    }

    /// Scan a regular expression literal. The opening `/` is consumed.
    ///
    /// `/` inside a `[...]` character class does not terminate the literal;
    /// `\` escapes the next character everywhere. A line terminator or EOF
    /// before the closing `/` is an error.
    fn regex(&mut self, start: u32) -> RawToken {
        let mut in_class = false;
        loop {
            match self.cursor.current() {
                b'/' if !in_class => {
                    self.cursor.advance();
                    break;
                }
                b'[' => {
                    in_class = true;
                    self.cursor.advance();
                }
                b']' => {
                    in_class = false;
                    self.cursor.advance();
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if self.regex_at_line_boundary() {
                        return RawToken {
                            tag: RawTag::UnterminatedRegex,
                            len: self.cursor.pos() - start,
                        };
                    }
                    self.cursor.advance_char();
                }
                b'\n' | b'\r' => {
                    return RawToken {
                        tag: RawTag::UnterminatedRegex,
                        len: self.cursor.pos() - start,
                    };
                }
                0xE2 if self.cursor.peek() == 0x80
                    && matches!(self.cursor.peek2(), 0xA8 | 0xA9) =>
                {
                    return RawToken {
                        tag: RawTag::UnterminatedRegex,
                        len: self.cursor.pos() - start,
                    };
                }
                0 => {
                    if self.cursor.is_eof() {
                        return RawToken {
                            tag: RawTag::UnterminatedRegex,
                            len: self.cursor.pos() - start,
                        };
                    }
                    self.cursor.advance(); // interior null
                }
                _ => self.cursor.advance_char(),
            }
        }
        // Flags: an IdentifierPart run (validity checked downstream).
        self.eat_ident_continue();
        RawToken {
            tag: RawTag::Regex,
            len: self.cursor.pos() - start,
        }
    }

    /// True when the current position cannot continue a regex escape:
    /// a line terminator or EOF directly after the backslash.
    fn regex_at_line_boundary(&self) -> bool {
        match self.cursor.current() {
            b'\n' | b'\r' => true,
            0xE2 => {
                self.cursor.peek() == 0x80 && matches!(self.cursor.peek2(), 0xA8 | 0xA9)
            }
            0 => self.cursor.is_eof(),
            _ => false,
        }
    }

    // ─── Identifiers ──────────────────────────────────────────────────

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume first char (already validated)
        self.eat_ident_continue();
        RawToken {
            tag: RawTag::Ident,
            len: self.cursor.pos() - start,
        }
    }

    /// Consume IdentifierPart characters: the ASCII fast path uses the
    /// lookup table; non-ASCII falls back to full ID_Continue plus the
    /// joiner characters ZWNJ and ZWJ.
    fn eat_ident_continue(&mut self) {
        loop {
            self.cursor.eat_while(is_ident_continue);
            if self.cursor.current() < 0x80 {
                break;
            }
            let ch = self.cursor.current_char();
            if unicode_ident::is_xid_continue(ch) || ch == '\u{200C}' || ch == '\u{200D}' {
                self.cursor.advance_char();
            } else {
                break;
            }
        }
    }

    // ─── Punctuators ──────────────────────────────────────────────────

    /// One-byte punctuator: step over it and emit `tag`.
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    /// Advance one more byte and emit `tag` (for two-byte punctuators
    /// whose first byte is already consumed).
    fn double(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    fn plus(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '+'
        match self.cursor.current() {
            b'+' => self.double(start, RawTag::PlusPlus),
            b'=' => self.double(start, RawTag::PlusEqual),
            _ => RawToken {
                tag: RawTag::Plus,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn minus(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '-'
        match self.cursor.current() {
            b'-' => self.double(start, RawTag::MinusMinus),
            b'=' => self.double(start, RawTag::MinusEqual),
            _ => RawToken {
                tag: RawTag::Minus,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn star(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '*'
        if self.cursor.current() == b'=' {
            self.double(start, RawTag::StarEqual)
        } else {
            RawToken {
                tag: RawTag::Star,
                len: self.cursor.pos() - start,
            }
        }
    }

    fn percent(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '%'
        if self.cursor.current() == b'=' {
            self.double(start, RawTag::PercentEqual)
        } else {
            RawToken {
                tag: RawTag::Percent,
                len: self.cursor.pos() - start,
            }
        }
    }

    fn caret(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '^'
        if self.cursor.current() == b'=' {
            self.double(start, RawTag::CaretEqual)
        } else {
            RawToken {
                tag: RawTag::Caret,
                len: self.cursor.pos() - start,
            }
        }
    }

    fn equal(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '='
        match self.cursor.current() {
            b'=' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.double(start, RawTag::EqualEqualEqual)
                } else {
                    RawToken {
                        tag: RawTag::EqualEqual,
                        len: self.cursor.pos() - start,
                    }
                }
            }
            b'>' => self.double(start, RawTag::FatArrow),
            _ => RawToken {
                tag: RawTag::Equal,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn bang(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '!'
        if self.cursor.current() == b'=' {
            self.cursor.advance();
            if self.cursor.current() == b'=' {
                self.double(start, RawTag::BangEqualEqual)
            } else {
                RawToken {
                    tag: RawTag::BangEqual,
                    len: self.cursor.pos() - start,
                }
            }
        } else {
            RawToken {
                tag: RawTag::Bang,
                len: self.cursor.pos() - start,
            }
        }
    }

    fn less(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '<'
        match self.cursor.current() {
            b'=' => self.double(start, RawTag::LessEqual),
            b'<' => {
                self.cursor.advance();
                if self.cursor.current() == b'=' {
                    self.double(start, RawTag::ShlEqual)
                } else {
                    RawToken {
                        tag: RawTag::Shl,
                        len: self.cursor.pos() - start,
                    }
                }
            }
            _ => RawToken {
                tag: RawTag::Less,
                len: self.cursor.pos() - start,
            },
        }
    }

    /// Maximal munch on `>`: `>>>=` over `>>>` over `>>=` over `>>` over
    /// `>=` over `>`.
    fn greater(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '>'
        match self.cursor.current() {
            b'=' => self.double(start, RawTag::GreaterEqual),
            b'>' => {
                self.cursor.advance();
                match self.cursor.current() {
                    b'=' => self.double(start, RawTag::ShrEqual),
                    b'>' => {
                        self.cursor.advance();
                        if self.cursor.current() == b'=' {
                            self.double(start, RawTag::UShrEqual)
                        } else {
                            RawToken {
                                tag: RawTag::UShr,
                                len: self.cursor.pos() - start,
                            }
                        }
                    }
                    _ => RawToken {
                        tag: RawTag::Shr,
                        len: self.cursor.pos() - start,
                    },
                }
            }
            _ => RawToken {
                tag: RawTag::Greater,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn pipe(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '|'
        match self.cursor.current() {
            b'|' => self.double(start, RawTag::PipePipe),
            b'=' => self.double(start, RawTag::PipeEqual),
            _ => RawToken {
                tag: RawTag::Pipe,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn ampersand(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '&'
        match self.cursor.current() {
            b'&' => self.double(start, RawTag::AmpersandAmpersand),
            b'=' => self.double(start, RawTag::AmpersandEqual),
            _ => RawToken {
                tag: RawTag::Ampersand,
                len: self.cursor.pos() - start,
            },
        }
    }

    fn dot(&mut self, start: u32) -> RawToken {
        // `.5` is a numeric literal, not member access.
        if self.cursor.peek().is_ascii_digit() {
            return self.dot_number(start);
        }
        self.cursor.advance(); // consume '.'
        if self.cursor.current() == b'.' && self.cursor.peek() == b'.' {
            self.cursor.advance_n(2);
            RawToken {
                tag: RawTag::DotDotDot,
                len: self.cursor.pos() - start,
            }
        } else {
            RawToken {
                tag: RawTag::Dot,
                len: self.cursor.pos() - start,
            }
        }
    }

    // ─── Delimiters (template-aware) ──────────────────────────────────

    fn left_brace(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        // Inside a template substitution, track nesting so the matching
        // `}` does not end the substitution early.
        if let Some(depth) = self.template_depth.last_mut() {
            *depth += 1;
        }
        RawToken {
            tag: RawTag::LeftBrace,
            len: self.cursor.pos() - start,
        }
    }

    fn right_brace(&mut self, start: u32) -> RawToken {
        if let Some(depth) = self.template_depth.last_mut() {
            if *depth == 0 {
                // This `}` closes the substitution — resume the template.
                self.template_depth.pop();
                return self.template_middle_or_tail(start);
            }
            *depth -= 1;
        }
        self.cursor.advance();
        RawToken {
            tag: RawTag::RightBrace,
            len: self.cursor.pos() - start,
        }
    }

    // ─── Numeric Literals ─────────────────────────────────────────────

    #[inline]
    fn number(&mut self, start: u32) -> RawToken {
        let first = self.cursor.current();
        self.cursor.advance();

        if first == b'0' {
            match self.cursor.current() {
                b'x' | b'X' => {
                    return self.radix_number(start, RawTag::HexNumber, |b| {
                        b.is_ascii_hexdigit()
                    })
                }
                b'o' | b'O' => {
                    return self.radix_number(start, RawTag::OctalNumber, |b| {
                        matches!(b, b'0'..=b'7')
                    })
                }
                b'b' | b'B' => {
                    return self.radix_number(start, RawTag::BinNumber, |b| {
                        matches!(b, b'0' | b'1')
                    })
                }
                _ => {}
            }
        }

        self.cursor.eat_while(|b| b.is_ascii_digit());

        // Optional fraction: `1.5`, and also `1.` (DecimalDigits after the
        // dot are optional when the integer part is present).
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            return self.exponent(start);
        }

        self.finish_number(start, RawTag::Decimal)
    }

    /// Numeric literal starting with `.` (e.g. `.5`, `.5e3`).
    fn dot_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '.'
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if matches!(self.cursor.current(), b'e' | b'E') {
            return self.exponent(start);
        }
        self.finish_number(start, RawTag::Decimal)
    }

    /// Prefixed literal: `0x`/`0o`/`0b` followed by at least one digit of
    /// the given class.
    fn radix_number(
        &mut self,
        start: u32,
        tag: RawTag,
        pred: impl Fn(u8) -> bool + Copy,
    ) -> RawToken {
        self.cursor.advance(); // consume the prefix letter
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(pred);
        if self.cursor.pos() == digits_start {
            // `0x` with no digits
            return self.invalid_number(start);
        }
        self.finish_number(start, tag)
    }

    /// Exponent part: `e`/`E`, optional sign, then at least one digit.
    fn exponent(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume 'e' or 'E'
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        if !self.cursor.current().is_ascii_digit() {
            return self.invalid_number(start);
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        self.finish_number(start, RawTag::Decimal)
    }

    /// A numeric literal must not be immediately followed by an
    /// IdentifierPart or digit (`3in` is an error, never `3` then `in`).
    fn finish_number(&mut self, start: u32, tag: RawTag) -> RawToken {
        let b = self.cursor.current();
        if is_ident_continue(b) {
            return self.invalid_number(start);
        }
        if b >= 0x80 && unicode_ident::is_xid_continue(self.cursor.current_char()) {
            return self.invalid_number(start);
        }
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    /// Consume the maximal alphanumeric run so a malformed literal is one
    /// error token, never a shorter valid one.
    fn invalid_number(&mut self, start: u32) -> RawToken {
        loop {
            self.cursor.eat_while(is_ident_continue);
            if self.cursor.current() < 0x80
                || !unicode_ident::is_xid_continue(self.cursor.current_char())
            {
                break;
            }
            self.cursor.advance_char();
        }
        RawToken {
            tag: RawTag::InvalidNumber,
            len: self.cursor.pos() - start,
        }
    }

    // ─── String Literals ──────────────────────────────────────────────

    fn string(&mut self, start: u32) -> RawToken {
        let quote = self.cursor.current();
        self.cursor.advance(); // consume opening quote
        loop {
            // memchr-backed skip over plain string content
            let b = self.cursor.skip_to_string_delim(quote);
            match b {
                _ if b == quote => {
                    self.cursor.advance(); // consume closing quote
                    return RawToken {
                        tag: RawTag::String,
                        len: self.cursor.pos() - start,
                    };
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if self.cursor.current() == b'\r' && self.cursor.peek() == b'\n' {
                        // Line continuation over CR LF consumes both bytes
                        self.cursor.advance_n(2);
                    } else if self.cursor.current() != 0 || !self.cursor.is_eof() {
                        self.cursor.advance_char(); // skip escaped char
                    }
                }
                b'\n' | b'\r' => {
                    return RawToken {
                        tag: RawTag::UnterminatedString,
                        len: self.cursor.pos() - start,
                    };
                }
                0 => {
                    if self.cursor.is_eof() {
                        return RawToken {
                            tag: RawTag::UnterminatedString,
                            len: self.cursor.pos() - start,
                        };
                    }
                    // Interior null — advance past it (cooking layer reports error)
                    self.cursor.advance();
                }
                _ => unreachable!("unexpected delimiter byte from skip_to_string_delim"),
            }
        }
    }

    // ─── Template Literals ────────────────────────────────────────────

    fn template_literal(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume opening '`'
        self.template_body(start, RawTag::TemplateNoSub, RawTag::TemplateHead)
    }

    fn template_middle_or_tail(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume closing '}'
        self.template_body(start, RawTag::TemplateTail, RawTag::TemplateMiddle)
    }

    /// Shared template body scan. `closed_tag` is emitted when the body
    /// ends at `` ` ``; `open_tag` when it ends at `${` (which pushes a
    /// substitution record).
    fn template_body(&mut self, start: u32, closed_tag: RawTag, open_tag: RawTag) -> RawToken {
        loop {
            // memchr-backed skip over plain template content
            let b = self.cursor.skip_to_template_delim();
            match b {
                b'`' => {
                    self.cursor.advance();
                    return RawToken {
                        tag: closed_tag,
                        len: self.cursor.pos() - start,
                    };
                }
                b'$' => {
                    if self.cursor.peek() == b'{' {
                        self.cursor.advance_n(2); // consume '${'
                        self.template_depth.push(0);
                        return RawToken {
                            tag: open_tag,
                            len: self.cursor.pos() - start,
                        };
                    }
                    // Lone `$` in template text — consume it
                    self.cursor.advance();
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if self.cursor.current() != 0 || !self.cursor.is_eof() {
                        self.cursor.advance_char(); // skip escaped char
                    }
                }
                0 => {
                    if self.cursor.is_eof() {
                        return RawToken {
                            tag: RawTag::UnterminatedTemplate,
                            len: self.cursor.pos() - start,
                        };
                    }
                    self.cursor.advance(); // interior null
                }
                _ => unreachable!("unexpected delimiter byte from skip_to_template_delim"),
            }
        }
    }

    // ─── Non-ASCII & error tokens ─────────────────────────────────────

    fn non_ascii(&mut self, start: u32) -> RawToken {
        let ch = self.cursor.current_char();
        match ch {
            '\u{2028}' | '\u{2029}' => {
                self.cursor.advance_char();
                RawToken {
                    tag: RawTag::Newline,
                    len: self.cursor.pos() - start,
                }
            }
            _ if is_unicode_whitespace(ch) => {
                self.cursor.advance_char();
                RawToken {
                    tag: RawTag::Whitespace,
                    len: self.cursor.pos() - start,
                }
            }
            _ if unicode_ident::is_xid_start(ch) => {
                self.cursor.advance_char();
                self.eat_ident_continue();
                RawToken {
                    tag: RawTag::Ident,
                    len: self.cursor.pos() - start,
                }
            }
            _ => self.unexpected_char(start),
        }
    }

    /// One full character with no lexical rule. Consuming the whole UTF-8
    /// sequence keeps slicing on character boundaries.
    fn unexpected_char(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        RawToken {
            tag: RawTag::UnexpectedChar,
            len: self.cursor.pos() - start,
        }
    }
}

/// Iterator access scans with the `Div` goal throughout. That is enough for
/// raw-level tests; the cooking layer computes the real goal per token.
impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token(LexGoal::Div);
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// ECMAScript WhiteSpace beyond ASCII: NBSP, the BOM character, and the
/// Unicode space separator category.
fn is_unicode_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// 256-byte lookup table for ASCII identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, underscore, and dollar.
/// A single indexed read stands in for the multi-range `matches!`, and the
/// sentinel byte (0x00) maps to `false` so scan loops terminate on it.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` is an ASCII identifier continuation byte.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Tokenize a whole source string, collecting every raw token.
///
/// Scans with the `Div` goal throughout ('/' is division). Returns a
/// `Vec<RawToken>` containing all tokens except the final `Eof`. For goal
/// control or streaming access, construct a `SourceBuffer` + `RawScanner`
/// directly.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor());
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.next_token(LexGoal::Div);
        if tok.tag == RawTag::Eof {
            break;
        }
        tokens.push(tok);
    }
    tokens
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use crate::SourceBuffer;
    use pretty_assertions::assert_eq;

    /// Helper: scan a source string with the given goal for every token
    /// and collect all tokens (excluding Eof).
    fn scan_goal(source: &str, goal: LexGoal) -> Vec<RawToken> {
        let buf = SourceBuffer::new(source);
        let mut scanner = RawScanner::new(buf.cursor());
        let mut tokens = Vec::new();
        loop {
            let tok = scanner.next_token(goal);
            if tok.tag == RawTag::Eof {
                break;
            }
            tokens.push(tok);
        }
        tokens
    }

    /// Helper: scan with the Div goal (the common case for punctuators).
    fn scan(source: &str) -> Vec<RawToken> {
        scan_goal(source, LexGoal::Div)
    }

    /// Like `scan` but keeps only the tags.
    fn scan_tags(source: &str) -> Vec<RawTag> {
        scan(source).iter().map(|t| t.tag).collect()
    }

    /// Helper: scan with the Regex goal and return tags only.
    fn scan_tags_regex(source: &str) -> Vec<RawTag> {
        scan_goal(source, LexGoal::Regex).iter().map(|t| t.tag).collect()
    }

    /// Scan including the trailing Eof token.
    fn scan_with_eof(source: &str) -> Vec<RawToken> {
        let buf = SourceBuffer::new(source);
        let mut scanner = RawScanner::new(buf.cursor());
        let mut tokens = Vec::new();
        loop {
            let tok = scanner.next_token(LexGoal::Div);
            tokens.push(tok);
            if tok.tag == RawTag::Eof {
                break;
            }
        }
        tokens
    }

    // ─── Property Tests ───────────────────────────────────────────────

    #[test]
    fn total_len_equals_source_len() {
        let sources = [
            "",
            "x",
            "hello world",
            "var x = 42\nvar y = x + 1",
            "\"hello\" 'there' 123 0xFF",
            "... => === !== >>> >>>=",
            "`template ${x} middle ${y} tail`",
            "  \t\n  \r\n  ",
            "a.b(c)[d] // trailing",
            "/* block\ncomment */ x",
        ];
        for source in sources {
            let tokens = scan(source);
            let total_len: u32 = tokens.iter().map(|t| t.len).sum();
            assert_eq!(
                total_len,
                u32::try_from(source.len()).expect("test source fits in u32"),
                "token lengths do not cover {source:?}",
            );
        }
    }

    #[test]
    fn every_token_has_positive_length() {
        let sources = ["var x = 42", "+-*/%", "\"str\" 'c'", "`tmpl`", "  \t\n\r\n"];
        for source in sources {
            for tok in scan(source) {
                assert!(tok.len > 0, "empty token {tok:?} from {source:?}");
            }
        }
    }

    #[test]
    fn eof_has_zero_length() {
        let tokens = scan_with_eof("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::Eof);
        assert_eq!(tokens[0].len, 0);
    }

    #[test]
    fn eof_is_always_last() {
        let tokens = scan_with_eof("hello world");
        let last = tokens
            .last()
            .expect("at least the Eof token is present");
        assert_eq!(last.tag, RawTag::Eof);
    }

    #[test]
    fn repeated_eof_returns_eof() {
        let buf = SourceBuffer::new("");
        let mut scanner = RawScanner::new(buf.cursor());
        for _ in 0..5 {
            let tok = scanner.next_token(LexGoal::Div);
            assert_eq!(tok.tag, RawTag::Eof);
            assert_eq!(tok.len, 0);
        }
    }

    #[test]
    fn substitution_stack_empty_after_complete_scan() {
        let sources = [
            "`hello`",
            "`${x}`",
            "`${a} and ${b}`",
            "`outer ${`inner ${x}`}`",
            "var x = `${1 + 2}`",
            "`${ {a: 1} }`",
        ];
        for source in sources {
            let buf = SourceBuffer::new(source);
            let mut scanner = RawScanner::new(buf.cursor());
            loop {
                let tok = scanner.next_token(LexGoal::Div);
                if tok.tag == RawTag::Eof {
                    break;
                }
            }
            assert_eq!(
                scanner.open_substitutions(),
                0,
                "substitution stack not empty after scanning {source:?}",
            );
        }
    }

    // ─── Byte Coverage ────────────────────────────────────────────────

    #[test]
    fn all_256_bytes_produce_valid_token() {
        for byte in 0u8..=255 {
            let source = [byte];
            // SourceBuffer needs valid UTF-8; multi-byte lead bytes are
            // covered by the unicode tests below.
            if let Ok(s) = std::str::from_utf8(&source) {
                let buf = SourceBuffer::new(s);
                let mut scanner = RawScanner::new(buf.cursor());
                let tok = scanner.next_token(LexGoal::Div);
                assert!(
                    tok.tag == RawTag::Eof || tok.len > 0,
                    "stray token {tok:?} for input byte {byte}",
                );
            }
        }
    }

    #[test]
    fn all_printable_ascii_produce_valid_tokens() {
        for byte in 32u8..=126 {
            let bytes = [byte];
            let source = std::str::from_utf8(&bytes).expect("printable ASCII is valid UTF-8");
            let tokens = scan(source);
            let total_len: u32 = tokens.iter().map(|t| t.len).sum();
            assert_eq!(
                total_len, 1,
                "byte {:?} ({}): lengths sum to {}, tokens {:?}",
                byte as char, byte, total_len, tokens
            );
        }
    }

    // ─── Whitespace & Line Terminators ────────────────────────────────

    #[test]
    fn whitespace_spaces_and_tabs() {
        assert_eq!(scan_tags("   "), vec![RawTag::Whitespace]);
        assert_eq!(scan("   ")[0].len, 3);

        assert_eq!(scan_tags("\t\t"), vec![RawTag::Whitespace]);
        assert_eq!(scan_tags("  \t  "), vec![RawTag::Whitespace]);
        assert_eq!(scan_tags("\x0B\x0C"), vec![RawTag::Whitespace]);
    }

    #[test]
    fn nbsp_and_bom_are_whitespace() {
        assert_eq!(scan_tags("\u{00A0}"), vec![RawTag::Whitespace]);
        assert_eq!(scan("\u{00A0}")[0].len, 2);
        assert_eq!(scan_tags("\u{FEFF}x"), vec![RawTag::Whitespace, RawTag::Ident]);
    }

    #[test]
    fn newline_lf() {
        assert_eq!(scan_tags("\n"), vec![RawTag::Newline]);
        assert_eq!(scan("\n")[0].len, 1);
    }

    #[test]
    fn newline_crlf_is_one_terminator() {
        assert_eq!(scan_tags("\r\n"), vec![RawTag::Newline]);
        assert_eq!(scan("\r\n")[0].len, 2);
    }

    #[test]
    fn lone_cr_is_newline() {
        assert_eq!(scan_tags("\r"), vec![RawTag::Newline]);
        assert_eq!(scan("\r")[0].len, 1);
    }

    #[test]
    fn line_and_paragraph_separators_are_newlines() {
        assert_eq!(scan_tags("\u{2028}"), vec![RawTag::Newline]);
        assert_eq!(scan("\u{2028}")[0].len, 3);
        assert_eq!(scan_tags("\u{2029}"), vec![RawTag::Newline]);
    }

    #[test]
    fn mixed_whitespace_and_newlines() {
        let tags = scan_tags("  \n\t\t\r\n  ");
        assert_eq!(
            tags,
            vec![
                RawTag::Whitespace, // "  "
                RawTag::Newline,    // "\n"
                RawTag::Whitespace, // "\t\t"
                RawTag::Newline,    // "\r\n"
                RawTag::Whitespace, // "  "
            ]
        );
    }

    #[test]
    fn empty_source() {
        assert_eq!(scan_tags(""), vec![]);
        let tokens = scan_with_eof("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::Eof);
    }

    // ─── Comments ─────────────────────────────────────────────────────

    #[test]
    fn line_comment() {
        assert_eq!(scan_tags("// hello"), vec![RawTag::LineComment]);
        assert_eq!(scan("// hello")[0].len, 8);
    }

    #[test]
    fn line_comment_does_not_consume_newline() {
        let tags = scan_tags("// hello\n");
        assert_eq!(tags, vec![RawTag::LineComment, RawTag::Newline]);
    }

    #[test]
    fn line_comment_stops_at_line_separator() {
        let tags = scan_tags("// hi\u{2028}x");
        assert_eq!(tags, vec![RawTag::LineComment, RawTag::Newline, RawTag::Ident]);
        assert_eq!(scan("// hi\u{2028}x")[0].len, 5);
    }

    #[test]
    fn line_comment_with_non_terminator_e2_char() {
        // An arrow (U+2192, also 0xE2-lead) must not end the comment.
        assert_eq!(scan_tags("// a \u{2192} b"), vec![RawTag::LineComment]);
    }

    #[test]
    fn block_comment() {
        assert_eq!(scan_tags("/* hi */"), vec![RawTag::BlockComment]);
        assert_eq!(scan("/* hi */")[0].len, 8);
    }

    #[test]
    fn block_comment_spans_lines() {
        let src = "/* line1\nline2 */x";
        assert_eq!(scan_tags(src), vec![RawTag::BlockComment, RawTag::Ident]);
    }

    #[test]
    fn block_comment_with_stars() {
        assert_eq!(scan_tags("/** doc **/"), vec![RawTag::BlockComment]);
        assert_eq!(scan_tags("/*a*b*/"), vec![RawTag::BlockComment]);
    }

    #[test]
    fn unterminated_block_comment() {
        let tokens = scan("/* never ends");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::UnterminatedComment);
        assert_eq!(tokens[0].len, 13);
    }

    #[test]
    fn slash_alone_div_goal() {
        assert_eq!(scan_tags("/"), vec![RawTag::Slash]);
        assert_eq!(scan_tags("/="), vec![RawTag::SlashEqual]);
    }

    // ─── Regex Literals ───────────────────────────────────────────────

    #[test]
    fn regex_literal_basic() {
        assert_eq!(scan_tags_regex("/ab/"), vec![RawTag::Regex]);
        assert_eq!(scan_goal("/ab/", LexGoal::Regex)[0].len, 4);
    }

    #[test]
    fn regex_literal_with_flags() {
        let tokens = scan_goal("/ab/gi", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::Regex);
        assert_eq!(tokens[0].len, 6);
    }

    #[test]
    fn regex_slash_in_class_does_not_terminate() {
        let tokens = scan_goal("/[/]/", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::Regex);
        assert_eq!(tokens[0].len, 5);
    }

    #[test]
    fn regex_escaped_slash() {
        let tokens = scan_goal(r"/a\/b/", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::Regex);
        assert_eq!(tokens[0].len, 6);
    }

    #[test]
    fn regex_with_quantifiers_and_classes() {
        // Braces and parens are ordinary regex body characters.
        let src = "/([CGAT]{3}){1,}/g";
        let tokens = scan_goal(src, LexGoal::Regex);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::Regex);
        assert_eq!(tokens[0].len as usize, src.len());
    }

    #[test]
    fn unterminated_regex_at_newline() {
        let tokens = scan_goal("/ab\nx", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::UnterminatedRegex);
        assert_eq!(tokens[0].len, 3);
    }

    #[test]
    fn unterminated_regex_at_eof() {
        let tokens = scan_goal("/ab", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::UnterminatedRegex);
    }

    #[test]
    fn regex_escaped_newline_is_unterminated() {
        let tokens = scan_goal("/a\\\nb/", LexGoal::Regex);
        assert_eq!(tokens[0].tag, RawTag::UnterminatedRegex);
    }

    #[test]
    fn div_goal_never_produces_regex() {
        assert_eq!(
            scan_tags("/ab/"),
            vec![RawTag::Slash, RawTag::Ident, RawTag::Slash]
        );
    }

    // ─── Identifiers ──────────────────────────────────────────────────

    #[test]
    fn simple_identifiers() {
        assert_eq!(scan_tags("foo"), vec![RawTag::Ident]);
        assert_eq!(scan("foo")[0].len, 3);

        assert_eq!(scan_tags("_foo"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("$foo"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("_"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("$"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("$$"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("foo_bar"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("FooBar"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("x1"), vec![RawTag::Ident]);
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(scan_tags("\u{03BB}"), vec![RawTag::Ident]); // λ
        assert_eq!(scan_tags("caf\u{E9}"), vec![RawTag::Ident]); // café
        assert_eq!(scan("caf\u{E9}")[0].len, 5);
        assert_eq!(scan_tags("\u{4E2D}\u{6587}"), vec![RawTag::Ident]);
    }

    #[test]
    fn zwnj_zwj_continue_identifiers() {
        // ZWNJ (U+200C) is a legal IdentifierPart between joining chars.
        let src = "a\u{200C}b";
        assert_eq!(scan_tags(src), vec![RawTag::Ident]);
        assert_eq!(scan(src)[0].len as usize, src.len());
    }

    #[test]
    fn keywords_are_ident() {
        // keyword resolution happens in the cooking layer
        assert_eq!(scan_tags("var"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("if"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("function"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("true"), vec![RawTag::Ident]);
        assert_eq!(scan_tags("false"), vec![RawTag::Ident]);
    }

    // ─── Punctuators ──────────────────────────────────────────────────

    #[test]
    fn single_char_punctuators() {
        assert_eq!(scan_tags("+"), vec![RawTag::Plus]);
        assert_eq!(scan_tags("-"), vec![RawTag::Minus]);
        assert_eq!(scan_tags("*"), vec![RawTag::Star]);
        assert_eq!(scan_tags("/"), vec![RawTag::Slash]);
        assert_eq!(scan_tags("%"), vec![RawTag::Percent]);
        assert_eq!(scan_tags("^"), vec![RawTag::Caret]);
        assert_eq!(scan_tags("&"), vec![RawTag::Ampersand]);
        assert_eq!(scan_tags("|"), vec![RawTag::Pipe]);
        assert_eq!(scan_tags("~"), vec![RawTag::Tilde]);
        assert_eq!(scan_tags("!"), vec![RawTag::Bang]);
        assert_eq!(scan_tags("="), vec![RawTag::Equal]);
        assert_eq!(scan_tags("<"), vec![RawTag::Less]);
        assert_eq!(scan_tags(">"), vec![RawTag::Greater]);
        assert_eq!(scan_tags("."), vec![RawTag::Dot]);
        assert_eq!(scan_tags("?"), vec![RawTag::Question]);
        assert_eq!(scan_tags(":"), vec![RawTag::Colon]);
        assert_eq!(scan_tags(";"), vec![RawTag::Semicolon]);
        assert_eq!(scan_tags(","), vec![RawTag::Comma]);
    }

    #[test]
    fn compound_punctuators() {
        assert_eq!(scan_tags("++"), vec![RawTag::PlusPlus]);
        assert_eq!(scan_tags("--"), vec![RawTag::MinusMinus]);
        assert_eq!(scan_tags("+="), vec![RawTag::PlusEqual]);
        assert_eq!(scan_tags("-="), vec![RawTag::MinusEqual]);
        assert_eq!(scan_tags("*="), vec![RawTag::StarEqual]);
        assert_eq!(scan_tags("%="), vec![RawTag::PercentEqual]);
        assert_eq!(scan_tags("&="), vec![RawTag::AmpersandEqual]);
        assert_eq!(scan_tags("|="), vec![RawTag::PipeEqual]);
        assert_eq!(scan_tags("^="), vec![RawTag::CaretEqual]);
        assert_eq!(scan_tags("=="), vec![RawTag::EqualEqual]);
        assert_eq!(scan_tags("!="), vec![RawTag::BangEqual]);
        assert_eq!(scan_tags("==="), vec![RawTag::EqualEqualEqual]);
        assert_eq!(scan_tags("!=="), vec![RawTag::BangEqualEqual]);
        assert_eq!(scan_tags("<="), vec![RawTag::LessEqual]);
        assert_eq!(scan_tags(">="), vec![RawTag::GreaterEqual]);
        assert_eq!(scan_tags("&&"), vec![RawTag::AmpersandAmpersand]);
        assert_eq!(scan_tags("||"), vec![RawTag::PipePipe]);
        assert_eq!(scan_tags("=>"), vec![RawTag::FatArrow]);
        assert_eq!(scan_tags("..."), vec![RawTag::DotDotDot]);
    }

    #[test]
    fn shift_operators_maximal_munch() {
        assert_eq!(scan_tags("<<"), vec![RawTag::Shl]);
        assert_eq!(scan_tags(">>"), vec![RawTag::Shr]);
        assert_eq!(scan_tags(">>>"), vec![RawTag::UShr]);
        assert_eq!(scan_tags("<<="), vec![RawTag::ShlEqual]);
        assert_eq!(scan_tags(">>="), vec![RawTag::ShrEqual]);
        assert_eq!(scan_tags(">>>="), vec![RawTag::UShrEqual]);
        // One extra `>` falls out as its own token
        assert_eq!(scan_tags(">>>>"), vec![RawTag::UShr, RawTag::Greater]);
    }

    #[test]
    fn dot_sequences() {
        assert_eq!(scan_tags(".."), vec![RawTag::Dot, RawTag::Dot]);
        assert_eq!(scan_tags("...."), vec![RawTag::DotDotDot, RawTag::Dot]);
    }

    #[test]
    fn equal_sequences() {
        assert_eq!(scan_tags("===="), vec![RawTag::EqualEqualEqual, RawTag::Equal]);
    }

    #[test]
    fn delimiters() {
        assert_eq!(scan_tags("("), vec![RawTag::LeftParen]);
        assert_eq!(scan_tags(")"), vec![RawTag::RightParen]);
        assert_eq!(scan_tags("["), vec![RawTag::LeftBracket]);
        assert_eq!(scan_tags("]"), vec![RawTag::RightBracket]);
        assert_eq!(scan_tags("{"), vec![RawTag::LeftBrace]);
        assert_eq!(scan_tags("}"), vec![RawTag::RightBrace]);
    }

    #[test]
    fn at_hash_backslash_are_unexpected() {
        assert_eq!(scan_tags("@"), vec![RawTag::UnexpectedChar]);
        assert_eq!(scan_tags("#"), vec![RawTag::UnexpectedChar]);
        assert_eq!(scan_tags("\\"), vec![RawTag::UnexpectedChar]);
    }

    // ─── Numeric Literals ─────────────────────────────────────────────

    #[test]
    fn decimal_literals() {
        assert_eq!(scan_tags("42"), vec![RawTag::Decimal]);
        assert_eq!(scan("42")[0].len, 2);
        assert_eq!(scan_tags("0"), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("3.14"), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("0.5"), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("1."), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("1e10"), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("1E-5"), vec![RawTag::Decimal]);
        assert_eq!(scan_tags("1.5e+2"), vec![RawTag::Decimal]);
    }

    #[test]
    fn leading_dot_fraction() {
        assert_eq!(scan_tags(".5"), vec![RawTag::Decimal]);
        assert_eq!(scan(".5")[0].len, 2);
        assert_eq!(scan_tags(".5e3"), vec![RawTag::Decimal]);
    }

    #[test]
    fn hex_literals() {
        assert_eq!(scan_tags("0xFF"), vec![RawTag::HexNumber]);
        assert_eq!(scan_tags("0x00"), vec![RawTag::HexNumber]);
        assert_eq!(scan_tags("0X1a"), vec![RawTag::HexNumber]);
    }

    #[test]
    fn octal_literals() {
        assert_eq!(scan_tags("0o17"), vec![RawTag::OctalNumber]);
        assert_eq!(scan_tags("0O777"), vec![RawTag::OctalNumber]);
    }

    #[test]
    fn binary_literals() {
        assert_eq!(scan_tags("0b1010"), vec![RawTag::BinNumber]);
        assert_eq!(scan_tags("0B11"), vec![RawTag::BinNumber]);
    }

    #[test]
    fn empty_radix_prefix_is_invalid() {
        assert_eq!(scan_tags("0x"), vec![RawTag::InvalidNumber]);
        assert_eq!(scan_tags("0b"), vec![RawTag::InvalidNumber]);
        assert_eq!(scan_tags("0o"), vec![RawTag::InvalidNumber]);
    }

    #[test]
    fn empty_exponent_is_invalid() {
        assert_eq!(scan_tags("1e"), vec![RawTag::InvalidNumber]);
        let tokens = scan("1e+");
        assert_eq!(tokens[0].tag, RawTag::InvalidNumber);
        assert_eq!(tokens[0].len, 3);
    }

    #[test]
    fn number_followed_by_ident_start_is_invalid() {
        // `3in` must be one error token, not `3` then `in`.
        let tokens = scan("3in");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::InvalidNumber);
        assert_eq!(tokens[0].len, 3);

        assert_eq!(scan_tags("0xFFg"), vec![RawTag::InvalidNumber]);
        assert_eq!(scan_tags("0b12"), vec![RawTag::InvalidNumber]);
    }

    #[test]
    fn integer_dot_ident_is_invalid() {
        // `42.foo` is a malformed literal (`42.` may not touch an
        // IdentifierStart); `42 .foo` or `42..foo` are required.
        let tokens = scan("42.foo");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::InvalidNumber);
    }

    #[test]
    fn number_then_punctuator() {
        assert_eq!(
            scan_tags("4/2"),
            vec![RawTag::Decimal, RawTag::Slash, RawTag::Decimal]
        );
        assert_eq!(scan_tags("1+2"), vec![RawTag::Decimal, RawTag::Plus, RawTag::Decimal]);
    }

    // ─── String Literals ──────────────────────────────────────────────

    #[test]
    fn double_quoted_string() {
        assert_eq!(scan_tags("\"hello\""), vec![RawTag::String]);
        assert_eq!(scan("\"hello\"")[0].len, 7);
    }

    #[test]
    fn single_quoted_string() {
        assert_eq!(scan_tags("'hello'"), vec![RawTag::String]);
        assert_eq!(scan("'hello'")[0].len, 7);
    }

    #[test]
    fn string_with_other_quote_inside() {
        assert_eq!(scan_tags("'say \"hi\"'"), vec![RawTag::String]);
        assert_eq!(scan_tags("\"it's\""), vec![RawTag::String]);
    }

    #[test]
    fn string_with_escapes() {
        assert_eq!(scan_tags(r#""a\nb""#), vec![RawTag::String]);
        assert_eq!(scan_tags(r#""a\"b""#), vec![RawTag::String]);
        assert_eq!(scan_tags(r"'it\'s'"), vec![RawTag::String]);
    }

    #[test]
    fn string_with_escaped_multibyte_char() {
        let src = "\"a\\\u{2713}b\"";
        assert_eq!(scan_tags(src), vec![RawTag::String]);
        assert_eq!(scan(src)[0].len as usize, src.len());
    }

    #[test]
    fn string_line_continuation() {
        assert_eq!(scan_tags("\"a\\\nb\""), vec![RawTag::String]);
        assert_eq!(scan_tags("\"a\\\r\nb\""), vec![RawTag::String]);
    }

    #[test]
    fn unterminated_string_at_newline() {
        let tokens = scan("\"abc\ndef");
        assert_eq!(tokens[0].tag, RawTag::UnterminatedString);
        assert_eq!(tokens[0].len, 4); // `"abc`, newline not consumed
    }

    #[test]
    fn unterminated_string_at_eof() {
        let tokens = scan("\"unterminated");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::UnterminatedString);
        assert_eq!(tokens[0].len, 13);
    }

    #[test]
    fn string_with_line_separator_content() {
        // LS is legal string content (only CR/LF terminate the raw scan).
        assert_eq!(scan_tags("'a\u{2028}b'"), vec![RawTag::String]);
    }

    // ─── Template Literals ────────────────────────────────────────────

    #[test]
    fn template_no_substitution() {
        assert_eq!(scan_tags("`hello`"), vec![RawTag::TemplateNoSub]);
        assert_eq!(scan("`hello`")[0].len, 7);
    }

    #[test]
    fn template_with_one_substitution() {
        let tags = scan_tags("`a${x}b`");
        assert_eq!(
            tags,
            vec![RawTag::TemplateHead, RawTag::Ident, RawTag::TemplateTail]
        );
        let tokens = scan("`a${x}b`");
        assert_eq!(tokens[0].len, 4); // `a${
        assert_eq!(tokens[2].len, 3); // }b`
    }

    #[test]
    fn template_with_two_substitutions() {
        let tags = scan_tags("`a${x}b${y}c`");
        assert_eq!(
            tags,
            vec![
                RawTag::TemplateHead,
                RawTag::Ident,
                RawTag::TemplateMiddle,
                RawTag::Ident,
                RawTag::TemplateTail,
            ]
        );
    }

    #[test]
    fn template_substitution_with_object_literal() {
        // Braces inside the substitution nest; the object's `}` must not
        // close the substitution.
        let tags = scan_tags("`v: ${ {a: 1} }`");
        assert_eq!(
            tags,
            vec![
                RawTag::TemplateHead,
                RawTag::Whitespace,
                RawTag::LeftBrace,
                RawTag::Ident,
                RawTag::Colon,
                RawTag::Whitespace,
                RawTag::Decimal,
                RawTag::RightBrace,
                RawTag::Whitespace,
                RawTag::TemplateTail,
            ]
        );
    }

    #[test]
    fn nested_templates() {
        let tags = scan_tags("`a${`b${x}c`}d`");
        assert_eq!(
            tags,
            vec![
                RawTag::TemplateHead, // `a${
                RawTag::TemplateHead, // `b${
                RawTag::Ident,        // x
                RawTag::TemplateTail, // }c`
                RawTag::TemplateTail, // }d`
            ]
        );
    }

    #[test]
    fn template_spans_lines() {
        assert_eq!(scan_tags("`a\nb\r\nc`"), vec![RawTag::TemplateNoSub]);
    }

    #[test]
    fn template_lone_dollar() {
        assert_eq!(scan_tags("`a$b`"), vec![RawTag::TemplateNoSub]);
        assert_eq!(scan_tags("`$`"), vec![RawTag::TemplateNoSub]);
    }

    #[test]
    fn template_escaped_dollar_brace() {
        assert_eq!(scan_tags(r"`a\${x}b`"), vec![RawTag::TemplateNoSub]);
        assert_eq!(scan_tags("`a\\`b`"), vec![RawTag::TemplateNoSub]);
    }

    #[test]
    fn unterminated_template() {
        let tokens = scan("`abc");
        assert_eq!(tokens[0].tag, RawTag::UnterminatedTemplate);
        assert_eq!(tokens[0].len, 4);
    }

    #[test]
    fn eof_inside_substitution_leaves_stack_open() {
        let buf = SourceBuffer::new("`a${1 + 2");
        let mut scanner = RawScanner::new(buf.cursor());
        loop {
            let tok = scanner.next_token(LexGoal::Div);
            if tok.tag == RawTag::Eof {
                break;
            }
        }
        assert_eq!(scanner.open_substitutions(), 1);
    }

    #[test]
    fn plain_right_brace_outside_template() {
        // `}` with no open substitution is an ordinary block close.
        assert_eq!(scan_tags("{ }"), vec![
            RawTag::LeftBrace,
            RawTag::Whitespace,
            RawTag::RightBrace,
        ]);
    }

    // ─── Unexpected Characters ────────────────────────────────────────

    #[test]
    fn unexpected_char_consumes_full_utf8_char() {
        let tokens = scan("\u{00A7}"); // §: not ID_Start, not whitespace
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, RawTag::UnexpectedChar);
        assert_eq!(tokens[0].len, 2);
    }

    #[test]
    fn scanning_continues_after_unexpected_char() {
        assert_eq!(
            scan_tags("a # b"),
            vec![
                RawTag::Ident,
                RawTag::Whitespace,
                RawTag::UnexpectedChar,
                RawTag::Whitespace,
                RawTag::Ident,
            ]
        );
    }

    #[test]
    fn interior_null_is_single_token() {
        let tags = scan_tags("a\0b");
        assert_eq!(tags, vec![RawTag::Ident, RawTag::InteriorNull, RawTag::Ident]);
    }

    // ─── Statements ───────────────────────────────────────────────────

    #[test]
    fn var_statement() {
        let tags = scan_tags("var x = 42;");
        assert_eq!(
            tags,
            vec![
                RawTag::Ident,      // var
                RawTag::Whitespace,
                RawTag::Ident,      // x
                RawTag::Whitespace,
                RawTag::Equal,
                RawTag::Whitespace,
                RawTag::Decimal,    // 42
                RawTag::Semicolon,
            ]
        );
    }

    #[test]
    fn member_call_expression() {
        let tags = scan_tags("a.b(c)");
        assert_eq!(
            tags,
            vec![
                RawTag::Ident,
                RawTag::Dot,
                RawTag::Ident,
                RawTag::LeftParen,
                RawTag::Ident,
                RawTag::RightParen,
            ]
        );
    }

    // ─── Iterator ─────────────────────────────────────────────────────

    #[test]
    fn iterator_stops_at_eof() {
        let buf = SourceBuffer::new("a b");
        let scanner = RawScanner::new(buf.cursor());
        let tokens: Vec<RawToken> = scanner.collect();
        assert_eq!(tokens.len(), 3); // ident, whitespace, ident
    }

    #[test]
    fn tokenize_convenience() {
        let tokens = tokenize("x + y");
        assert_eq!(tokens.len(), 5);
        let total: u32 = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, 5);
    }

    // ─── Property tests (proptest) ────────────────────────────────────

    mod proptest_scan {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_len_matches_for_any_source(source in "\\PC{0,200}") {
                let tokens = scan(&source);
                let total: u32 = tokens.iter().map(|t| t.len).sum();
                prop_assert_eq!(total as usize, source.len());
            }

            #[test]
            fn total_len_matches_for_arbitrary_strings(source in any::<String>()) {
                let tokens = scan(&source);
                let total: u32 = tokens.iter().map(|t| t.len).sum();
                prop_assert_eq!(total as usize, source.len());
            }

            #[test]
            fn no_zero_length_tokens(source in "\\PC{0,200}") {
                for tok in scan(&source) {
                    prop_assert!(tok.len > 0, "zero-length {:?}", tok);
                }
            }

            #[test]
            fn regex_goal_never_loses_bytes(source in "[/a-z\\[\\]\\\\ ]{0,64}") {
                let tokens = scan_goal(&source, LexGoal::Regex);
                let total: u32 = tokens.iter().map(|t| t.len).sum();
                prop_assert_eq!(total as usize, source.len());
            }
        }
    }
}
