//! Host editor contracts
//!
//! The fragment editor never owns the text buffer or the cursor. It reads
//! and writes them through these traits; `model::EditorState` is the
//! implementation shipped with the crate.

use std::ops::RangeInclusive;
use std::path::Path;

use crate::model::{Position, Range};
use crate::syntax::{LanguageId, TagMatcher, Tokenizer};

/// The text buffer being edited
pub trait HostDocument {
    /// Full document text
    fn text(&self) -> String;

    /// Text between two positions (end exclusive)
    fn text_range(&self, start: Position, end: Position) -> String;

    /// Replace the text between two positions with `text`
    fn replace_range(&mut self, text: &str, start: Position, end: Position);

    /// Re-apply the document's indentation rules to one line
    fn reindent_line(&mut self, line: usize);

    /// Re-indent a run of lines
    fn reindent_lines(&mut self, lines: RangeInclusive<usize>) {
        for line in lines {
            self.reindent_line(line);
        }
    }

    fn line_count(&self) -> usize;

    /// Location on disk, used to resolve relative stylesheet links
    fn file_path(&self) -> Option<&Path>;
}

/// An editor view: a document plus the user's selection and its structure
pub trait HostEditor {
    type Document: HostDocument;
    type Structure: Tokenizer + TagMatcher;

    fn document(&self) -> &Self::Document;

    fn document_mut(&mut self) -> &mut Self::Document;

    /// The current selection, normalized so that `start <= end`
    fn current_selection(&self) -> Range;

    /// Language at the selection start
    fn language_at_selection(&self) -> LanguageId;

    /// Tokenizer and tag matcher for the document's current text
    fn structure(&self) -> &Self::Structure;
}
