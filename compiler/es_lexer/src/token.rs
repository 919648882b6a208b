//! Cooked token types.
//!
//! A [`Token`] pairs a [`TokenKind`] with its span, line/column position,
//! and metadata flags. Kinds are fully resolved: keywords are separated
//! from identifiers, literal values are parsed, and string-like content is
//! interned.
//!
//! Number literals store their `f64` value as raw bits (`to_bits`) so
//! `TokenKind` stays `Eq + Hash`. String-like kinds use interned [`Name`]s
//! for O(1) equality.

use crate::interner::Name;
use crate::keywords::Keyword;
use crate::span::Span;
use std::fmt;

bitflags::bitflags! {
    /// Per-token metadata flags.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TokenFlags: u8 {
        /// A line terminator (or, by default, a comment containing one)
        /// occurred between the previous significant token and this one.
        /// Automatic semicolon insertion keys off this bit.
        const NEWLINE_BEFORE = 1 << 0;
        /// Cooking recorded at least one error for this token.
        const HAS_ERROR = 1 << 1;
    }
}

/// An ECMAScript punctuator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Punct {
    Plus,       // +
    PlusPlus,   // ++
    PlusEq,     // +=
    Minus,      // -
    MinusMinus, // --
    MinusEq,    // -=
    Star,       // *
    StarEq,     // *=
    Slash,      // /
    SlashEq,    // /=
    Percent,    // %
    PercentEq,  // %=
    Caret,      // ^
    CaretEq,    // ^=
    Amp,        // &
    AmpAmp,     // &&
    AmpEq,      // &=
    Pipe,       // |
    PipePipe,   // ||
    PipeEq,     // |=
    Tilde,      // ~
    Bang,       // !
    Eq,         // =
    EqEq,       // ==
    EqEqEq,     // ===
    NotEq,      // !=
    NotEqEq,    // !==
    Lt,         // <
    LtEq,       // <=
    Shl,        // <<
    ShlEq,      // <<=
    Gt,         // >
    GtEq,       // >=
    Shr,        // >>
    ShrEq,      // >>=
    UShr,       // >>>
    UShrEq,     // >>>=
    FatArrow,   // =>
    Dot,        // .
    DotDotDot,  // ...
    Question,   // ?
    Colon,      // :
    Semicolon,  // ;
    Comma,      // ,
    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    LBrace,     // {
    RBrace,     // }
}

impl Punct {
    /// The source text of this punctuator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Punct::Plus => "+",
            Punct::PlusPlus => "++",
            Punct::PlusEq => "+=",
            Punct::Minus => "-",
            Punct::MinusMinus => "--",
            Punct::MinusEq => "-=",
            Punct::Star => "*",
            Punct::StarEq => "*=",
            Punct::Slash => "/",
            Punct::SlashEq => "/=",
            Punct::Percent => "%",
            Punct::PercentEq => "%=",
            Punct::Caret => "^",
            Punct::CaretEq => "^=",
            Punct::Amp => "&",
            Punct::AmpAmp => "&&",
            Punct::AmpEq => "&=",
            Punct::Pipe => "|",
            Punct::PipePipe => "||",
            Punct::PipeEq => "|=",
            Punct::Tilde => "~",
            Punct::Bang => "!",
            Punct::Eq => "=",
            Punct::EqEq => "==",
            Punct::EqEqEq => "===",
            Punct::NotEq => "!=",
            Punct::NotEqEq => "!==",
            Punct::Lt => "<",
            Punct::LtEq => "<=",
            Punct::Shl => "<<",
            Punct::ShlEq => "<<=",
            Punct::Gt => ">",
            Punct::GtEq => ">=",
            Punct::Shr => ">>",
            Punct::ShrEq => ">>=",
            Punct::UShr => ">>>",
            Punct::UShrEq => ">>>=",
            Punct::FatArrow => "=>",
            Punct::Dot => ".",
            Punct::DotDotDot => "...",
            Punct::Question => "?",
            Punct::Colon => ":",
            Punct::Semicolon => ";",
            Punct::Comma => ",",
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
        }
    }
}

impl fmt::Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved token kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Identifier (interned).
    Ident(Name),
    /// Reserved word, including `null`/`true`/`false`.
    Keyword(Keyword),
    /// Numeric literal. All ES numbers are `f64`; stored as bits for
    /// Eq/Hash.
    Number(u64),
    /// String literal with escapes resolved (interned, without quotes).
    String(Name),
    /// Complete template with no substitution: `` `text` ``.
    TemplateNoSub(Name),
    /// Template head: `` `text${ ``.
    TemplateHead(Name),
    /// Template middle: `}text${`.
    TemplateMiddle(Name),
    /// Template tail: `` }text` ``.
    TemplateTail(Name),
    /// Regular expression literal: pattern body and flag string, both
    /// interned uncooked.
    Regex { pattern: Name, flags: Name },
    /// Punctuator or delimiter.
    Punct(Punct),
    /// Comment text including delimiters (emitted only when configured).
    Comment(Name),
    /// A token that failed to lex. The diagnostic lives in the error list.
    Error,
    /// End of input. Always the last token, zero-width.
    Eof,
}

impl TokenKind {
    /// Construct a `Number` from its `f64` value.
    #[inline]
    pub fn number(value: f64) -> Self {
        TokenKind::Number(value.to_bits())
    }

    /// The `f64` value of a `Number` token, if this is one.
    #[inline]
    pub fn number_value(self) -> Option<f64> {
        match self {
            TokenKind::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// True when a `/` after this token is division rather than the start
    /// of a regular expression literal.
    ///
    /// Covers everything that can end an expression: identifiers, value
    /// keywords, literals, closing `)`/`]`, and postfix `++`/`--`. A `}`
    /// deliberately does NOT end an expression here — after a block,
    /// `/x/g` is a regex.
    pub fn ends_expression(self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Number(_)
            | TokenKind::String(_)
            | TokenKind::Regex { .. }
            | TokenKind::TemplateNoSub(_)
            | TokenKind::TemplateTail(_) => true,
            TokenKind::Keyword(kw) => kw.ends_expression(),
            TokenKind::Punct(p) => matches!(
                p,
                Punct::RParen | Punct::RBracket | Punct::PlusPlus | Punct::MinusMinus
            ),
            _ => false,
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "Ident({name:?})"),
            TokenKind::Keyword(kw) => write!(f, "Keyword({kw})"),
            TokenKind::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            TokenKind::String(name) => write!(f, "String({name:?})"),
            TokenKind::TemplateNoSub(name) => write!(f, "TemplateNoSub({name:?})"),
            TokenKind::TemplateHead(name) => write!(f, "TemplateHead({name:?})"),
            TokenKind::TemplateMiddle(name) => write!(f, "TemplateMiddle({name:?})"),
            TokenKind::TemplateTail(name) => write!(f, "TemplateTail({name:?})"),
            TokenKind::Regex { pattern, flags } => write!(f, "Regex({pattern:?}, {flags:?})"),
            TokenKind::Punct(p) => write!(f, "Punct({p})"),
            TokenKind::Comment(name) => write!(f, "Comment({name:?})"),
            TokenKind::Error => write!(f, "Error"),
            TokenKind::Eof => write!(f, "Eof"),
        }
    }
}

/// A cooked token with position information.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the token's first byte.
    pub line: u32,
    /// 0-based byte column of the token's first byte within its line.
    pub column: u32,
    pub flags: TokenFlags,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32, flags: TokenFlags) -> Self {
        Token {
            kind,
            span,
            line,
            column,
            flags,
        }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
            line: 1,
            column: 0,
            flags: TokenFlags::empty(),
        }
    }

    /// True when a line terminator separates this token from the previous
    /// significant one.
    #[inline]
    pub fn newline_before(&self) -> bool {
        self.flags.contains(TokenFlags::NEWLINE_BEFORE)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{})",
            self.kind, self.span, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_bits_round_trip() {
        let kind = TokenKind::number(3.5);
        assert_eq!(kind.number_value(), Some(3.5));
        assert_eq!(TokenKind::Keyword(Keyword::Var).number_value(), None);
    }

    #[test]
    fn number_eq_via_bits() {
        assert_eq!(TokenKind::number(1.0), TokenKind::number(1.0));
        assert_ne!(TokenKind::number(1.0), TokenKind::number(2.0));
    }

    #[test]
    fn ends_expression_classification() {
        assert!(TokenKind::Ident(Name::EMPTY).ends_expression());
        assert!(TokenKind::number(4.0).ends_expression());
        assert!(TokenKind::String(Name::EMPTY).ends_expression());
        assert!(TokenKind::Punct(Punct::RParen).ends_expression());
        assert!(TokenKind::Punct(Punct::RBracket).ends_expression());
        assert!(TokenKind::Punct(Punct::PlusPlus).ends_expression());
        assert!(TokenKind::Keyword(Keyword::This).ends_expression());
        assert!(TokenKind::Keyword(Keyword::Null).ends_expression());
        assert!(TokenKind::TemplateTail(Name::EMPTY).ends_expression());

        // Regex contexts
        assert!(!TokenKind::Punct(Punct::RBrace).ends_expression());
        assert!(!TokenKind::Punct(Punct::Eq).ends_expression());
        assert!(!TokenKind::Punct(Punct::LParen).ends_expression());
        assert!(!TokenKind::Keyword(Keyword::Return).ends_expression());
        assert!(!TokenKind::Keyword(Keyword::Typeof).ends_expression());
        assert!(!TokenKind::Eof.ends_expression());
    }

    #[test]
    fn punct_as_str() {
        assert_eq!(Punct::UShrEq.as_str(), ">>>=");
        assert_eq!(Punct::EqEqEq.as_str(), "===");
        assert_eq!(Punct::FatArrow.as_str(), "=>");
        assert_eq!(Punct::DotDotDot.as_str(), "...");
    }

    #[test]
    fn token_flags() {
        let tok = Token::dummy(TokenKind::Eof);
        assert!(!tok.newline_before());

        let tok = Token::new(
            TokenKind::Eof,
            Span::DUMMY,
            1,
            0,
            TokenFlags::NEWLINE_BEFORE,
        );
        assert!(tok.newline_before());
        assert!(!tok.flags.contains(TokenFlags::HAS_ERROR));
    }

    #[test]
    fn token_is_compact() {
        // kind (12) + span (8) + line/column (8) + flags (1) + padding
        assert!(std::mem::size_of::<Token>() <= 40);
    }
}
