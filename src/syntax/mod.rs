//! HTML syntax support
//!
//! Provides the lexical and structural view of a document that range
//! resolution runs on:
//! - Language detection from file extensions
//! - Per-line tokens (tags, comments, doctype, text)
//! - Open/close tag matching
//!
//! ## Architecture
//!
//! ```text
//! Document text → HtmlStructure::parse (tree-sitter-html)
//!              → Tokenizer  (token_at / next_token / first_tag_in_line)
//!              → TagMatcher (match_tag)
//! ```
//!
//! The resolver only sees the two traits, so any host that can tokenize
//! lines and pair tags can drive it.

mod languages;
mod matching;
mod structure;
mod tokens;

pub use languages::LanguageId;
pub use matching::{TagMatcher, TagPair};
pub use structure::HtmlStructure;
pub use tokens::{LineTokens, LineWalk, TagRole, Token, TokenKind, Tokenizer};
