//! Tag-range resolution
//!
//! Expands an arbitrary selection into a span that starts on a tag and ends
//! on the close tag of the last tag the selection touches. Expansion only
//! ever grows the span outward: a fragment that is too large is harmless, one
//! that cuts through markup corrupts the document when written back.
//!
//! ```text
//! sel:        <div>a</div>
//!             <p>H[i
//!             th]ere</p>
//! resolved:   <div>a</div>
//!             [<p>Hi
//!             there</p>]
//! ```

use serde::Serialize;

use crate::model::{Position, Range};
use crate::syntax::{TagMatcher, Token, Tokenizer};

/// Why a selection could not be expanded to a tag-aligned range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unresolved {
    /// No scanned line holds a tag token
    NoStartTag,
    /// No tag in the scanned lines closes at or after the selection end
    NoEndTag,
}

/// How a resolution was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum Outcome {
    /// The selection was empty; nothing to expand
    Collapsed,
    /// The selection was expanded to a tag-aligned range
    Expanded,
    /// Expansion failed; the range is collapsed at the selection start
    Unresolved(Unresolved),
}

/// Result of resolving a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub range: Range,
    pub outcome: Outcome,
}

impl Resolution {
    fn collapsed(at: Position, outcome: Outcome) -> Self {
        Self {
            range: Range::collapsed(at),
            outcome,
        }
    }

    /// Whether the range covers existing markup (as opposed to an insertion point)
    pub fn is_expanded(&self) -> bool {
        self.outcome == Outcome::Expanded
    }
}

/// Resolve `selection` into a well-formed, tag-aligned range.
///
/// Empty selections, and selections for which no tag boundary is found,
/// resolve to an empty range at the selection start.
pub fn resolve_range<S>(structure: &S, selection: Range) -> Resolution
where
    S: Tokenizer + TagMatcher,
{
    if selection.is_empty() {
        return Resolution::collapsed(selection.start, Outcome::Collapsed);
    }

    let start = expand_start(structure, selection);
    let end = expand_end(structure, selection);

    match (start, end) {
        (Some(start), Some(end)) if start <= end => {
            tracing::debug!(?selection, ?start, ?end, "expanded selection to tag range");
            Resolution {
                range: Range::new(start, end),
                outcome: Outcome::Expanded,
            }
        }
        (None, _) => {
            tracing::debug!(?selection, "no tag in selection, using empty range");
            Resolution::collapsed(
                selection.start,
                Outcome::Unresolved(Unresolved::NoStartTag),
            )
        }
        _ => {
            tracing::debug!(?selection, "no closing tag reaches selection end, using empty range");
            Resolution::collapsed(selection.start, Outcome::Unresolved(Unresolved::NoEndTag))
        }
    }
}

/// Position of the first tag touched by the selection
pub fn expand_start<S>(structure: &S, selection: Range) -> Option<Position>
where
    S: Tokenizer + TagMatcher,
{
    selection.lines().find_map(|line| {
        scan_tag(structure, selection, line).map(|tag| Position::new(line, tag.start))
    })
}

/// End of the first close tag, scanning line by line, that reaches the selection end.
///
/// The close tag may lie past the selection's last line.
pub fn expand_end<S>(structure: &S, selection: Range) -> Option<Position>
where
    S: Tokenizer + TagMatcher,
{
    selection.lines().find_map(|line| {
        let tag = scan_tag(structure, selection, line)?;
        let pair = structure.match_tag(Position::new(line, tag.start))?;
        (pair.close.end >= selection.end).then_some(pair.close.end)
    })
}

/// The tag a line contributes to the scan
fn scan_tag<S>(structure: &S, selection: Range, line: usize) -> Option<Token>
where
    S: Tokenizer + TagMatcher,
{
    if line == selection.start.line {
        if let Some(anchor) = enclosing_open_tag(structure, selection) {
            return Some(anchor);
        }
    }
    structure.first_tag_in_line(line)
}

/// Innermost open tag on the selection's first line whose element spans
/// the whole selection
fn enclosing_open_tag<S>(structure: &S, selection: Range) -> Option<Token>
where
    S: Tokenizer + TagMatcher,
{
    let at = selection.start;
    let candidates: Vec<Token> = structure
        .walk_line(at.line)
        .take_while(|token| token.start <= at.column)
        .filter(Token::is_open_tag)
        .collect();

    candidates.into_iter().rev().find(|token| {
        structure
            .match_tag(Position::new(at.line, token.start))
            .is_some_and(|pair| pair.close.end >= selection.end)
    })
}
