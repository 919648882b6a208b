//! Raw token tags produced by the scanner.
//!
//! [`RawTag`] is a one-byte discriminant organized in semantic ranges so
//! downstream dispatch can use range checks. [`RawToken`] pairs a tag with
//! a byte length; the scanner never allocates per token.

/// One-byte token tag, organized in semantic ranges:
///
/// - `0..=15`: identifiers and literals
/// - `16..=19`: template literal parts
/// - `32..=79`: punctuators
/// - `80..=95`: delimiters
/// - `112..=127`: trivia
/// - `240..=254`: error tokens
/// - `255`: EOF
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Identifiers & Literals (0-15) ===
    /// Identifier or reserved word (keyword resolution happens in the cooker).
    Ident = 0,
    /// Decimal numeric literal: integer, fraction, exponent forms.
    Decimal = 1,
    /// Hex numeric literal (`0x` / `0X` prefix).
    HexNumber = 2,
    /// Octal numeric literal (`0o` / `0O` prefix).
    OctalNumber = 3,
    /// Binary numeric literal (`0b` / `0B` prefix).
    BinNumber = 4,
    /// String literal, single or double quoted, including the quotes.
    String = 5,
    /// Regular expression literal including flags (`/pat/gi`).
    Regex = 6,

    // === Template Literals (16-19) ===
    /// `` `...${ `` — opens a template with substitutions.
    TemplateHead = 16,
    /// `}...${` — between two substitutions.
    TemplateMiddle = 17,
    /// `` }...` `` — closes the last substitution.
    TemplateTail = 18,
    /// `` `...` `` — a template with no substitutions.
    TemplateNoSub = 19,

    // === Punctuators (32-79) ===
    Plus = 32,
    Minus = 33,
    Star = 34,
    Percent = 35,
    PlusPlus = 36,
    MinusMinus = 37,
    Less = 38,
    Greater = 39,
    LessEqual = 40,
    GreaterEqual = 41,
    EqualEqual = 42,
    BangEqual = 43,
    EqualEqualEqual = 44,
    BangEqualEqual = 45,
    Shl = 46,
    Shr = 47,
    UShr = 48,
    Ampersand = 49,
    Pipe = 50,
    Caret = 51,
    Bang = 52,
    Tilde = 53,
    AmpersandAmpersand = 54,
    PipePipe = 55,
    Question = 56,
    Colon = 57,
    Equal = 58,
    PlusEqual = 59,
    MinusEqual = 60,
    StarEqual = 61,
    PercentEqual = 62,
    ShlEqual = 63,
    ShrEqual = 64,
    UShrEqual = 65,
    AmpersandEqual = 66,
    PipeEqual = 67,
    CaretEqual = 68,
    FatArrow = 69,
    Slash = 70,
    SlashEqual = 71,
    Dot = 72,
    DotDotDot = 73,
    Comma = 74,
    Semicolon = 75,

    // === Delimiters (80-95) ===
    LeftParen = 80,
    RightParen = 81,
    LeftBracket = 82,
    RightBracket = 83,
    LeftBrace = 84,
    RightBrace = 85,

    // === Trivia (112-127) ===
    /// Run of whitespace (SP, TAB, VT, FF, NBSP, U+FEFF, Unicode Zs).
    Whitespace = 112,
    /// One line terminator: LF, CR, CR LF, LS, or PS.
    Newline = 113,
    /// `//` to end of line (terminator not included).
    LineComment = 114,
    /// `/* ... */` including the delimiters; may span lines.
    BlockComment = 115,

    // === Errors (240-254) ===
    /// Character with no lexical rule (one full UTF-8 character).
    UnexpectedChar = 240,
    /// String reaching a line terminator or EOF before its closing quote.
    UnterminatedString = 241,
    /// Template reaching EOF before its closing `` ` ``.
    UnterminatedTemplate = 242,
    /// Regex literal reaching a line terminator or EOF before its closing `/`.
    UnterminatedRegex = 243,
    /// Block comment reaching EOF before `*/`.
    UnterminatedComment = 244,
    /// Malformed numeric literal (`0x`, `1e+`, `3in`, ...).
    InvalidNumber = 245,
    /// Null byte (U+0000) inside source content.
    InteriorNull = 246,

    // === Control (255) ===
    /// End of input. Zero-length; repeats forever.
    Eof = 255,
}

impl RawTag {
    /// Fixed source text for punctuators and delimiters.
    ///
    /// Returns `None` for tags whose lexeme varies (identifiers, literals,
    /// trivia, errors).
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            RawTag::Plus => Some("+"),
            RawTag::Minus => Some("-"),
            RawTag::Star => Some("*"),
            RawTag::Percent => Some("%"),
            RawTag::PlusPlus => Some("++"),
            RawTag::MinusMinus => Some("--"),
            RawTag::Less => Some("<"),
            RawTag::Greater => Some(">"),
            RawTag::LessEqual => Some("<="),
            RawTag::GreaterEqual => Some(">="),
            RawTag::EqualEqual => Some("=="),
            RawTag::BangEqual => Some("!="),
            RawTag::EqualEqualEqual => Some("==="),
            RawTag::BangEqualEqual => Some("!=="),
            RawTag::Shl => Some("<<"),
            RawTag::Shr => Some(">>"),
            RawTag::UShr => Some(">>>"),
            RawTag::Ampersand => Some("&"),
            RawTag::Pipe => Some("|"),
            RawTag::Caret => Some("^"),
            RawTag::Bang => Some("!"),
            RawTag::Tilde => Some("~"),
            RawTag::AmpersandAmpersand => Some("&&"),
            RawTag::PipePipe => Some("||"),
            RawTag::Question => Some("?"),
            RawTag::Colon => Some(":"),
            RawTag::Equal => Some("="),
            RawTag::PlusEqual => Some("+="),
            RawTag::MinusEqual => Some("-="),
            RawTag::StarEqual => Some("*="),
            RawTag::PercentEqual => Some("%="),
            RawTag::ShlEqual => Some("<<="),
            RawTag::ShrEqual => Some(">>="),
            RawTag::UShrEqual => Some(">>>="),
            RawTag::AmpersandEqual => Some("&="),
            RawTag::PipeEqual => Some("|="),
            RawTag::CaretEqual => Some("^="),
            RawTag::FatArrow => Some("=>"),
            RawTag::Slash => Some("/"),
            RawTag::SlashEqual => Some("/="),
            RawTag::Dot => Some("."),
            RawTag::DotDotDot => Some("..."),
            RawTag::Comma => Some(","),
            RawTag::Semicolon => Some(";"),
            RawTag::LeftParen => Some("("),
            RawTag::RightParen => Some(")"),
            RawTag::LeftBracket => Some("["),
            RawTag::RightBracket => Some("]"),
            RawTag::LeftBrace => Some("{"),
            RawTag::RightBrace => Some("}"),
            _ => None,
        }
    }

    /// Human-readable description for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            RawTag::Plus => "`+`",
            RawTag::Minus => "`-`",
            RawTag::Star => "`*`",
            RawTag::Percent => "`%`",
            RawTag::PlusPlus => "`++`",
            RawTag::MinusMinus => "`--`",
            RawTag::Less => "`<`",
            RawTag::Greater => "`>`",
            RawTag::LessEqual => "`<=`",
            RawTag::GreaterEqual => "`>=`",
            RawTag::EqualEqual => "`==`",
            RawTag::BangEqual => "`!=`",
            RawTag::EqualEqualEqual => "`===`",
            RawTag::BangEqualEqual => "`!==`",
            RawTag::Shl => "`<<`",
            RawTag::Shr => "`>>`",
            RawTag::UShr => "`>>>`",
            RawTag::Ampersand => "`&`",
            RawTag::Pipe => "`|`",
            RawTag::Caret => "`^`",
            RawTag::Bang => "`!`",
            RawTag::Tilde => "`~`",
            RawTag::AmpersandAmpersand => "`&&`",
            RawTag::PipePipe => "`||`",
            RawTag::Question => "`?`",
            RawTag::Colon => "`:`",
            RawTag::Equal => "`=`",
            RawTag::PlusEqual => "`+=`",
            RawTag::MinusEqual => "`-=`",
            RawTag::StarEqual => "`*=`",
            RawTag::PercentEqual => "`%=`",
            RawTag::ShlEqual => "`<<=`",
            RawTag::ShrEqual => "`>>=`",
            RawTag::UShrEqual => "`>>>=`",
            RawTag::AmpersandEqual => "`&=`",
            RawTag::PipeEqual => "`|=`",
            RawTag::CaretEqual => "`^=`",
            RawTag::FatArrow => "`=>`",
            RawTag::Slash => "`/`",
            RawTag::SlashEqual => "`/=`",
            RawTag::Dot => "`.`",
            RawTag::DotDotDot => "`...`",
            RawTag::Comma => "`,`",
            RawTag::Semicolon => "`;`",
            RawTag::LeftParen => "`(`",
            RawTag::RightParen => "`)`",
            RawTag::LeftBracket => "`[`",
            RawTag::RightBracket => "`]`",
            RawTag::LeftBrace => "`{`",
            RawTag::RightBrace => "`}`",
            RawTag::Ident => "identifier",
            RawTag::Decimal => "numeric literal",
            RawTag::HexNumber => "hex numeric literal",
            RawTag::OctalNumber => "octal numeric literal",
            RawTag::BinNumber => "binary numeric literal",
            RawTag::String => "string literal",
            RawTag::Regex => "regular expression literal",
            RawTag::TemplateHead => "template head",
            RawTag::TemplateMiddle => "template middle",
            RawTag::TemplateTail => "template tail",
            RawTag::TemplateNoSub => "template literal",
            RawTag::Whitespace => "whitespace",
            RawTag::Newline => "line terminator",
            RawTag::LineComment => "line comment",
            RawTag::BlockComment => "block comment",
            RawTag::UnexpectedChar => "unexpected character",
            RawTag::UnterminatedString => "unterminated string",
            RawTag::UnterminatedTemplate => "unterminated template",
            RawTag::UnterminatedRegex => "unterminated regular expression",
            RawTag::UnterminatedComment => "unterminated comment",
            RawTag::InvalidNumber => "invalid numeric literal",
            RawTag::InteriorNull => "interior null byte",
            RawTag::Eof => "end of file",
        }
    }

    /// Returns `true` for tokens the cooking layer never emits: whitespace,
    /// line terminators, and comments.
    ///
    /// Line terminators are trivia in ECMAScript, but the driver records
    /// crossing one as the automatic-semicolon hint before discarding it.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace | RawTag::Newline | RawTag::LineComment | RawTag::BlockComment
        )
    }

    /// Returns `true` for tags in the error range.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= RawTag::UnexpectedChar as u8 && (self as u8) < RawTag::Eof as u8
    }

    /// Returns `true` for the four template literal parts.
    #[inline]
    pub fn is_template_part(self) -> bool {
        matches!(
            self,
            RawTag::TemplateHead
                | RawTag::TemplateMiddle
                | RawTag::TemplateTail
                | RawTag::TemplateNoSub
        )
    }
}

/// Raw token: tag plus byte length. No position — the caller tracks the
/// running offset, so the scanner stays allocation-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    // === RawTag discriminants ===

    #[test]
    fn repr_u8_semantic_ranges() {
        // Identifiers & Literals: 0-15
        assert_eq!(RawTag::Ident as u8, 0);
        assert_eq!(RawTag::Decimal as u8, 1);
        assert_eq!(RawTag::HexNumber as u8, 2);
        assert_eq!(RawTag::OctalNumber as u8, 3);
        assert_eq!(RawTag::BinNumber as u8, 4);
        assert_eq!(RawTag::String as u8, 5);
        assert_eq!(RawTag::Regex as u8, 6);

        // Template Literals: 16-19
        assert_eq!(RawTag::TemplateHead as u8, 16);
        assert_eq!(RawTag::TemplateMiddle as u8, 17);
        assert_eq!(RawTag::TemplateTail as u8, 18);
        assert_eq!(RawTag::TemplateNoSub as u8, 19);

        // Punctuators: 32-79
        assert_eq!(RawTag::Plus as u8, 32);
        assert_eq!(RawTag::Semicolon as u8, 75);

        // Delimiters: 80-95
        assert_eq!(RawTag::LeftParen as u8, 80);
        assert_eq!(RawTag::RightBrace as u8, 85);

        // Trivia: 112-127
        assert_eq!(RawTag::Whitespace as u8, 112);
        assert_eq!(RawTag::Newline as u8, 113);
        assert_eq!(RawTag::LineComment as u8, 114);
        assert_eq!(RawTag::BlockComment as u8, 115);

        // Errors: 240-254
        assert_eq!(RawTag::UnexpectedChar as u8, 240);
        assert_eq!(RawTag::UnterminatedTemplate as u8, 242);
        assert_eq!(RawTag::InteriorNull as u8, 246);

        // Control: 255
        assert_eq!(RawTag::Eof as u8, 255);
    }

    #[test]
    fn tag_is_one_byte() {
        assert_eq!(std::mem::size_of::<RawTag>(), 1);
    }

    // === Lexeme ===

    #[test]
    fn fixed_lexeme_single_char_punctuators() {
        assert_eq!(RawTag::Plus.lexeme(), Some("+"));
        assert_eq!(RawTag::Minus.lexeme(), Some("-"));
        assert_eq!(RawTag::Star.lexeme(), Some("*"));
        assert_eq!(RawTag::Slash.lexeme(), Some("/"));
        assert_eq!(RawTag::Percent.lexeme(), Some("%"));
        assert_eq!(RawTag::Caret.lexeme(), Some("^"));
        assert_eq!(RawTag::Ampersand.lexeme(), Some("&"));
        assert_eq!(RawTag::Pipe.lexeme(), Some("|"));
        assert_eq!(RawTag::Tilde.lexeme(), Some("~"));
        assert_eq!(RawTag::Bang.lexeme(), Some("!"));
        assert_eq!(RawTag::Equal.lexeme(), Some("="));
        assert_eq!(RawTag::Less.lexeme(), Some("<"));
        assert_eq!(RawTag::Greater.lexeme(), Some(">"));
        assert_eq!(RawTag::Dot.lexeme(), Some("."));
        assert_eq!(RawTag::Question.lexeme(), Some("?"));
    }

    #[test]
    fn fixed_lexeme_compound_punctuators() {
        assert_eq!(RawTag::FatArrow.lexeme(), Some("=>"));
        assert_eq!(RawTag::DotDotDot.lexeme(), Some("..."));
        assert_eq!(RawTag::EqualEqual.lexeme(), Some("=="));
        assert_eq!(RawTag::EqualEqualEqual.lexeme(), Some("==="));
        assert_eq!(RawTag::BangEqualEqual.lexeme(), Some("!=="));
        assert_eq!(RawTag::AmpersandAmpersand.lexeme(), Some("&&"));
        assert_eq!(RawTag::PipePipe.lexeme(), Some("||"));
        assert_eq!(RawTag::Shl.lexeme(), Some("<<"));
        assert_eq!(RawTag::UShr.lexeme(), Some(">>>"));
        assert_eq!(RawTag::UShrEqual.lexeme(), Some(">>>="));
        assert_eq!(RawTag::SlashEqual.lexeme(), Some("/="));
    }

    #[test]
    fn fixed_lexeme_delimiters() {
        assert_eq!(RawTag::LeftParen.lexeme(), Some("("));
        assert_eq!(RawTag::RightParen.lexeme(), Some(")"));
        assert_eq!(RawTag::LeftBracket.lexeme(), Some("["));
        assert_eq!(RawTag::RightBracket.lexeme(), Some("]"));
        assert_eq!(RawTag::LeftBrace.lexeme(), Some("{"));
        assert_eq!(RawTag::RightBrace.lexeme(), Some("}"));
        assert_eq!(RawTag::Comma.lexeme(), Some(","));
        assert_eq!(RawTag::Colon.lexeme(), Some(":"));
        assert_eq!(RawTag::Semicolon.lexeme(), Some(";"));
    }

    #[test]
    fn variable_lexeme_returns_none() {
        assert_eq!(RawTag::Ident.lexeme(), None);
        assert_eq!(RawTag::Decimal.lexeme(), None);
        assert_eq!(RawTag::HexNumber.lexeme(), None);
        assert_eq!(RawTag::String.lexeme(), None);
        assert_eq!(RawTag::Regex.lexeme(), None);
        assert_eq!(RawTag::TemplateHead.lexeme(), None);
        assert_eq!(RawTag::TemplateNoSub.lexeme(), None);
        assert_eq!(RawTag::Whitespace.lexeme(), None);
        assert_eq!(RawTag::UnexpectedChar.lexeme(), None);
        assert_eq!(RawTag::Eof.lexeme(), None);
    }

    // === Name ===

    #[test]
    fn name_returns_readable_description() {
        assert_eq!(RawTag::Ident.name(), "identifier");
        assert_eq!(RawTag::Decimal.name(), "numeric literal");
        assert_eq!(RawTag::HexNumber.name(), "hex numeric literal");
        assert_eq!(RawTag::Regex.name(), "regular expression literal");
        assert_eq!(RawTag::TemplateHead.name(), "template head");
        assert_eq!(RawTag::TemplateNoSub.name(), "template literal");
        assert_eq!(RawTag::Plus.name(), "`+`");
        assert_eq!(RawTag::FatArrow.name(), "`=>`");
        assert_eq!(RawTag::UShrEqual.name(), "`>>>=`");
        assert_eq!(RawTag::Eof.name(), "end of file");
        assert_eq!(RawTag::UnexpectedChar.name(), "unexpected character");
        assert_eq!(RawTag::InteriorNull.name(), "interior null byte");
        assert_eq!(RawTag::UnterminatedString.name(), "unterminated string");
    }

    // === Trivia ===

    #[test]
    fn trivia_classification() {
        assert!(RawTag::Whitespace.is_trivia());
        assert!(RawTag::LineComment.is_trivia());
        assert!(RawTag::BlockComment.is_trivia());

        // Line terminators are trivia in ECMAScript (the driver records
        // the ASI hint before dropping them).
        assert!(RawTag::Newline.is_trivia());

        assert!(!RawTag::Ident.is_trivia());
        assert!(!RawTag::Eof.is_trivia());
    }

    // === Errors ===

    #[test]
    fn error_classification() {
        assert!(RawTag::UnexpectedChar.is_error());
        assert!(RawTag::UnterminatedString.is_error());
        assert!(RawTag::UnterminatedTemplate.is_error());
        assert!(RawTag::UnterminatedRegex.is_error());
        assert!(RawTag::UnterminatedComment.is_error());
        assert!(RawTag::InvalidNumber.is_error());
        assert!(RawTag::InteriorNull.is_error());

        assert!(!RawTag::Ident.is_error());
        assert!(!RawTag::Eof.is_error());
        assert!(!RawTag::Whitespace.is_error());
    }

    #[test]
    fn template_part_classification() {
        assert!(RawTag::TemplateHead.is_template_part());
        assert!(RawTag::TemplateMiddle.is_template_part());
        assert!(RawTag::TemplateTail.is_template_part());
        assert!(RawTag::TemplateNoSub.is_template_part());
        assert!(!RawTag::String.is_template_part());
    }

    // === RawToken ===

    #[test]
    fn raw_token_construction() {
        let tok = RawToken {
            tag: RawTag::Ident,
            len: 5,
        };
        assert_eq!(tok.tag, RawTag::Ident);
        assert_eq!(tok.len, 5);
    }

    #[test]
    fn raw_token_is_copy() {
        let tok = RawToken {
            tag: RawTag::Plus,
            len: 1,
        };
        let tok2 = tok; // Copy
        assert_eq!(tok, tok2);
    }
}
