//! Low-level ECMAScript tokenizer (standalone, zero es_* dependencies).
//!
//! This crate turns UTF-8 source text into a stream of raw tokens: `(tag,
//! length)` pairs with no heap allocation per token. It knows the full ES6
//! lexical grammar -- punctuators, string and template literals, regular
//! expression literals, numeric literals, comments, and the Unicode
//! whitespace and identifier rules -- but deliberately does NOT:
//!
//! - resolve keywords (`var` comes out as an identifier)
//! - validate or decode escape sequences
//! - parse numeric values
//! - produce diagnostics with positions
//!
//! Those belong to the cooking layer in `es_lexer`. The split keeps this
//! crate dependency-free within the workspace so external tools
//! (highlighters, formatters) can use it without pulling in the rest of
//! the pipeline.
//!
//! # Usage
//!
//! ```
//! use es_lexer_core::{LexGoal, RawScanner, RawTag, SourceBuffer};
//!
//! let buf = SourceBuffer::new("var x = 42");
//! let mut scanner = RawScanner::new(buf.cursor());
//! let tok = scanner.next_token(LexGoal::Regex);
//! assert_eq!(tok.tag, RawTag::Ident); // keywords resolve downstream
//! assert_eq!(tok.len, 3);
//! ```
//!
//! Because every token carries its exact byte length and nothing is
//! skipped (whitespace, newlines, and comments are tokens too), the
//! concatenation of all token slices reproduces the source byte for byte.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{tokenize, LexGoal, RawScanner};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use tag::{RawTag, RawToken};
