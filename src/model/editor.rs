//! Editor state - a document with the user's selection

use super::document::Document;
use super::position::{Position, Range, Selection};
use crate::host::HostEditor;
use crate::syntax::{HtmlStructure, LanguageId};

/// A single editor view over one document
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub document: Document,
    pub selection: Selection,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(mut self, anchor: Position, head: Position) -> Self {
        self.selection = Selection::new(anchor, head);
        self
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }
}

impl HostEditor for EditorState {
    type Document = Document;
    type Structure = HtmlStructure;

    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn current_selection(&self) -> Range {
        self.selection.range()
    }

    fn language_at_selection(&self) -> LanguageId {
        if !self.document.language.is_html() {
            return self.document.language;
        }
        self.document
            .structure()
            .language_at(self.selection.range().start)
    }

    fn structure(&self) -> &HtmlStructure {
        self.document.structure()
    }
}
