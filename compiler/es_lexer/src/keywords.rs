//! Keyword resolution for the cooking layer.
//!
//! The raw scanner emits every identifier-shaped lexeme as `Ident`; this
//! module decides which of those are reserved words. The lookup function
//! uses the identifier's length as a first-pass filter (reserved words
//! range from 2-10 chars), then matches against the words of that length.
//!
//! Three word classes:
//! 1. **Reserved words** — keywords, `null`, `true`, `false`, and the
//!    future-reserved `enum` and `await`. Always resolved.
//! 2. **Strict-mode reserved words** — `implements`, `interface`, `let`,
//!    `package`, `private`, `protected`, `public`, `static`. Lexed as
//!    identifiers; [`strict_reserved_lookup`] lets the parser reject them
//!    in strict-mode code.
//! 3. Everything else — ordinary identifiers.

use std::fmt;

/// An ECMAScript reserved word.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Return,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,
    /// `null` literal.
    Null,
    /// `true` literal.
    True,
    /// `false` literal.
    False,
    /// Future-reserved in all code.
    Enum,
    /// Future-reserved in module code.
    Await,
}

impl Keyword {
    /// The source text of this keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
            Keyword::Yield => "yield",
            Keyword::Null => "null",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Enum => "enum",
            Keyword::Await => "await",
        }
    }

    /// True for keywords that end an expression (`this`, `super`, and the
    /// literal keywords). A `/` after one of these is division; after any
    /// other keyword (`return`, `typeof`, `in`, ...) it opens a regex.
    pub const fn ends_expression(self) -> bool {
        matches!(
            self,
            Keyword::This | Keyword::Super | Keyword::Null | Keyword::True | Keyword::False
        )
    }

    /// True for `enum` and `await`, which are reserved but carry no grammar
    /// production yet.
    pub const fn is_future_reserved(self) -> bool {
        matches!(self, Keyword::Enum | Keyword::Await)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a reserved word by text.
///
/// Returns the corresponding [`Keyword`] if the text is reserved, `None`
/// for ordinary identifiers (including the strict-mode-only set — those
/// are handled separately by [`strict_reserved_lookup`]).
///
/// Uses length-bucketing for fast rejection: identifiers whose length
/// falls outside the 2-10 range are rejected without any comparison.
#[inline]
pub fn lookup(text: &str) -> Option<Keyword> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: all reserved words are 2-10 chars of ASCII lowercase
    if !(2..=10).contains(&len) {
        return None;
    }
    if !bytes[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "do" => Some(Keyword::Do),
            "if" => Some(Keyword::If),
            "in" => Some(Keyword::In),
            _ => None,
        },
        3 => match text {
            "for" => Some(Keyword::For),
            "new" => Some(Keyword::New),
            "try" => Some(Keyword::Try),
            "var" => Some(Keyword::Var),
            _ => None,
        },
        4 => match text {
            "case" => Some(Keyword::Case),
            "else" => Some(Keyword::Else),
            "enum" => Some(Keyword::Enum),
            "null" => Some(Keyword::Null),
            "this" => Some(Keyword::This),
            "true" => Some(Keyword::True),
            "void" => Some(Keyword::Void),
            "with" => Some(Keyword::With),
            _ => None,
        },
        5 => match text {
            "await" => Some(Keyword::Await),
            "break" => Some(Keyword::Break),
            "catch" => Some(Keyword::Catch),
            "class" => Some(Keyword::Class),
            "const" => Some(Keyword::Const),
            "false" => Some(Keyword::False),
            "super" => Some(Keyword::Super),
            "throw" => Some(Keyword::Throw),
            "while" => Some(Keyword::While),
            "yield" => Some(Keyword::Yield),
            _ => None,
        },
        6 => match text {
            "delete" => Some(Keyword::Delete),
            "export" => Some(Keyword::Export),
            "import" => Some(Keyword::Import),
            "return" => Some(Keyword::Return),
            "switch" => Some(Keyword::Switch),
            "typeof" => Some(Keyword::Typeof),
            _ => None,
        },
        7 => match text {
            "default" => Some(Keyword::Default),
            "extends" => Some(Keyword::Extends),
            "finally" => Some(Keyword::Finally),
            _ => None,
        },
        8 => match text {
            "continue" => Some(Keyword::Continue),
            "debugger" => Some(Keyword::Debugger),
            "function" => Some(Keyword::Function),
            _ => None,
        },
        10 => match text {
            "instanceof" => Some(Keyword::Instanceof),
            _ => None,
        },
        _ => None,
    }
}

/// Check if an identifier is reserved in strict-mode code.
///
/// Returns the static keyword string if it matches, `None` otherwise.
/// These lex as ordinary identifiers; the parser consults this when the
/// surrounding code is strict.
///
/// Strict-reserved: `implements`, `interface`, `let`, `package`,
/// `private`, `protected`, `public`, `static`.
pub fn strict_reserved_lookup(text: &str) -> Option<&'static str> {
    match text {
        "implements" => Some("implements"),
        "interface" => Some("interface"),
        "let" => Some("let"),
        "package" => Some("package"),
        "private" => Some("private"),
        "protected" => Some("protected"),
        "public" => Some("public"),
        "static" => Some("static"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Reserved word lookup ===

    #[test]
    fn control_flow_keywords() {
        assert_eq!(lookup("if"), Some(Keyword::If));
        assert_eq!(lookup("else"), Some(Keyword::Else));
        assert_eq!(lookup("for"), Some(Keyword::For));
        assert_eq!(lookup("in"), Some(Keyword::In));
        assert_eq!(lookup("do"), Some(Keyword::Do));
        assert_eq!(lookup("while"), Some(Keyword::While));
        assert_eq!(lookup("switch"), Some(Keyword::Switch));
        assert_eq!(lookup("case"), Some(Keyword::Case));
        assert_eq!(lookup("default"), Some(Keyword::Default));
        assert_eq!(lookup("break"), Some(Keyword::Break));
        assert_eq!(lookup("continue"), Some(Keyword::Continue));
        assert_eq!(lookup("return"), Some(Keyword::Return));
    }

    #[test]
    fn declaration_keywords() {
        assert_eq!(lookup("var"), Some(Keyword::Var));
        assert_eq!(lookup("const"), Some(Keyword::Const));
        assert_eq!(lookup("function"), Some(Keyword::Function));
        assert_eq!(lookup("class"), Some(Keyword::Class));
        assert_eq!(lookup("extends"), Some(Keyword::Extends));
        assert_eq!(lookup("import"), Some(Keyword::Import));
        assert_eq!(lookup("export"), Some(Keyword::Export));
    }

    #[test]
    fn operator_keywords() {
        assert_eq!(lookup("typeof"), Some(Keyword::Typeof));
        assert_eq!(lookup("instanceof"), Some(Keyword::Instanceof));
        assert_eq!(lookup("delete"), Some(Keyword::Delete));
        assert_eq!(lookup("void"), Some(Keyword::Void));
        assert_eq!(lookup("new"), Some(Keyword::New));
    }

    #[test]
    fn exception_keywords() {
        assert_eq!(lookup("try"), Some(Keyword::Try));
        assert_eq!(lookup("catch"), Some(Keyword::Catch));
        assert_eq!(lookup("finally"), Some(Keyword::Finally));
        assert_eq!(lookup("throw"), Some(Keyword::Throw));
        assert_eq!(lookup("debugger"), Some(Keyword::Debugger));
    }

    #[test]
    fn literal_keywords() {
        assert_eq!(lookup("null"), Some(Keyword::Null));
        assert_eq!(lookup("true"), Some(Keyword::True));
        assert_eq!(lookup("false"), Some(Keyword::False));
    }

    #[test]
    fn future_reserved() {
        assert_eq!(lookup("enum"), Some(Keyword::Enum));
        assert_eq!(lookup("await"), Some(Keyword::Await));
        assert!(Keyword::Enum.is_future_reserved());
        assert!(Keyword::Await.is_future_reserved());
        assert!(!Keyword::Var.is_future_reserved());
    }

    #[test]
    fn non_keywords_return_none() {
        assert_eq!(lookup("foo"), None);
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup("console"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("undefined"), None); // a global, not a keyword
    }

    #[test]
    fn case_sensitivity() {
        assert_eq!(lookup("If"), None);
        assert_eq!(lookup("VAR"), None);
        assert_eq!(lookup("True"), None);
        assert_eq!(lookup("NULL"), None);
    }

    #[test]
    fn length_boundary_rejection() {
        // Longer than 10 chars rejected immediately
        assert_eq!(lookup("instanceofx"), None);
        assert_eq!(lookup("constructor"), None);
    }

    #[test]
    fn non_alpha_start_rejection() {
        assert_eq!(lookup("_if"), None);
        assert_eq!(lookup("$var"), None);
    }

    #[test]
    fn keyword_as_str_round_trips() {
        for kw in [
            Keyword::Break,
            Keyword::Function,
            Keyword::Instanceof,
            Keyword::Null,
            Keyword::Await,
        ] {
            assert_eq!(lookup(kw.as_str()), Some(kw));
        }
    }

    // === Regex-goal classification ===

    #[test]
    fn expression_ending_keywords() {
        assert!(Keyword::This.ends_expression());
        assert!(Keyword::Super.ends_expression());
        assert!(Keyword::Null.ends_expression());
        assert!(Keyword::True.ends_expression());
        assert!(Keyword::False.ends_expression());

        // `return /x/` and `typeof /x/` are regex contexts
        assert!(!Keyword::Return.ends_expression());
        assert!(!Keyword::Typeof.ends_expression());
        assert!(!Keyword::In.ends_expression());
    }

    // === Strict-mode reserved words ===

    #[test]
    fn strict_reserved_detected() {
        assert_eq!(strict_reserved_lookup("implements"), Some("implements"));
        assert_eq!(strict_reserved_lookup("interface"), Some("interface"));
        assert_eq!(strict_reserved_lookup("let"), Some("let"));
        assert_eq!(strict_reserved_lookup("package"), Some("package"));
        assert_eq!(strict_reserved_lookup("private"), Some("private"));
        assert_eq!(strict_reserved_lookup("protected"), Some("protected"));
        assert_eq!(strict_reserved_lookup("public"), Some("public"));
        assert_eq!(strict_reserved_lookup("static"), Some("static"));
    }

    #[test]
    fn strict_reserved_not_in_keyword_table() {
        assert_eq!(lookup("let"), None);
        assert_eq!(lookup("static"), None);
        assert_eq!(lookup("implements"), None);
    }

    #[test]
    fn non_strict_reserved_returns_none() {
        assert_eq!(strict_reserved_lookup("var"), None);
        assert_eq!(strict_reserved_lookup("foo"), None);
        assert_eq!(strict_reserved_lookup("Let"), None); // case-sensitive
    }
}
