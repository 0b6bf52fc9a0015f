//! Tag matching contract

use serde::Serialize;

use crate::model::{Position, Range};

/// The open and close tag spans of one paired element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagPair {
    pub open: Range,
    pub close: Range,
}

/// Structural tag matching supplied by the host.
pub trait TagMatcher {
    /// Given a position on a tag, the open/close pair it belongs to.
    ///
    /// Returns `None` for self-closing, void and unmatched tags, and for
    /// positions that are not on a tag at all.
    fn match_tag(&self, pos: Position) -> Option<TagPair>;
}
