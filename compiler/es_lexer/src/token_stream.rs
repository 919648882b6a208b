//! Pull-based cursor over a lexed token vector.
//!
//! The parser consumes tokens through this interface: `peek` for lookahead,
//! `advance` to commit. Past the end, both keep returning the final EOF
//! token, so a parser never needs an `Option` on its hot path.

use crate::{lex, LexError, LexerConfig, StringInterner, Token, TokenKind};

pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Wrap an already-lexed token vector.
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    /// Lex `source` and return a stream over its tokens plus the errors.
    pub fn from_source(
        source: &str,
        interner: &StringInterner,
        config: LexerConfig,
    ) -> (Self, Vec<LexError>) {
        let out = lex(source, interner, config);
        (TokenStream::new(out.tokens), out.errors)
    }

    /// The current token without consuming it. At the end of the stream
    /// this is the EOF token, forever.
    pub fn peek(&self) -> Token {
        self.nth(self.pos)
    }

    /// Look `n` tokens past the current one (`peek_ahead(0)` == `peek`).
    pub fn peek_ahead(&self, n: usize) -> Token {
        self.nth(self.pos.saturating_add(n))
    }

    /// Consume and return the current token. Saturates at EOF: once the
    /// stream is exhausted, every call returns the EOF token again.
    pub fn advance(&mut self) -> Token {
        let tok = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token only if its kind matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True once `advance` has consumed the EOF token (or the stream was
    /// empty to begin with).
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Number of tokens in the underlying vector, EOF included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens, ignoring the cursor.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn nth(&self, index: usize) -> Token {
        match self.tokens.get(index) {
            Some(tok) => *tok,
            // Lexed streams always end with EOF; an empty vector only
            // happens when a caller built one by hand.
            None => match self.tokens.last() {
                Some(last) if last.kind == TokenKind::Eof => *last,
                _ => Token::dummy(TokenKind::Eof),
            },
        }
    }
}

/// Draining iteration yields each token once, EOF included, then stops.
impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.tokens.len() {
            return None;
        }
        let tok = self.tokens[self.pos];
        self.pos += 1;
        Some(tok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tokens.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TokenStream {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use crate::{Punct, TokenKind};
    use pretty_assertions::assert_eq;

    fn stream(source: &str) -> TokenStream {
        let interner = StringInterner::new();
        let (stream, errors) = TokenStream::from_source(source, &interner, LexerConfig::default());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        stream
    }

    #[test]
    fn peek_does_not_consume() {
        let s = stream("a + b");
        let first = s.peek();
        assert_eq!(s.peek(), first);
        assert!(matches!(first.kind, TokenKind::Ident(_)));
    }

    #[test]
    fn advance_walks_the_stream() {
        let mut s = stream("a + b");
        assert!(matches!(s.advance().kind, TokenKind::Ident(_)));
        assert_eq!(s.advance().kind, TokenKind::Punct(Punct::Plus));
        assert!(matches!(s.advance().kind, TokenKind::Ident(_)));
        assert_eq!(s.advance().kind, TokenKind::Eof);
    }

    #[test]
    fn eof_repeats_forever() {
        let mut s = stream("x");
        s.advance(); // x
        s.advance(); // EOF
        assert!(s.is_exhausted());
        assert_eq!(s.advance().kind, TokenKind::Eof);
        assert_eq!(s.peek().kind, TokenKind::Eof);
    }

    #[test]
    fn peek_ahead_lookahead() {
        let s = stream("a = 1");
        assert_eq!(s.peek_ahead(0), s.peek());
        assert_eq!(s.peek_ahead(1).kind, TokenKind::Punct(Punct::Eq));
        assert_eq!(s.peek_ahead(99).kind, TokenKind::Eof);
    }

    #[test]
    fn eat_matches_kind() {
        let mut s = stream("; x");
        assert!(s.eat(TokenKind::Punct(Punct::Semicolon)));
        assert!(!s.eat(TokenKind::Punct(Punct::Semicolon)));
        assert!(matches!(s.peek().kind, TokenKind::Ident(_)));
    }

    #[test]
    fn iterator_yields_each_token_once() {
        let s = stream("a b");
        let kinds: Vec<_> = s.map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[2], TokenKind::Eof);
    }

    #[test]
    fn empty_hand_built_stream_peeks_eof() {
        let s = TokenStream::new(Vec::new());
        assert_eq!(s.peek().kind, TokenKind::Eof);
        assert!(s.is_exhausted());
    }
}
