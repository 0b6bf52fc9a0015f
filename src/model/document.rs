//! Document model - the HTML text buffer and its parsed structure

use ropey::Rope;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::position::Position;
use crate::config::IndentConfig;
use crate::host::HostDocument;
use crate::syntax::{HtmlStructure, LanguageId};

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Detected language
    pub language: LanguageId,
    /// Document revision counter (incremented on each edit)
    pub revision: u64,
    /// Indentation used by `reindent_line`
    pub indent: IndentConfig,
    /// Tokens and tag pairs for the current revision
    structure: HtmlStructure,
}

impl Document {
    /// Create a new empty HTML document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create an HTML document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
            language: LanguageId::Html,
            revision: 0,
            indent: IndentConfig::default(),
            structure: HtmlStructure::parse(text),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let language = LanguageId::from_path(&path);
        Ok(Self {
            buffer: Rope::from(content.as_str()),
            file_path: Some(path),
            is_modified: false,
            language,
            revision: 0,
            indent: IndentConfig::default(),
            structure: HtmlStructure::parse(&content),
        })
    }

    pub fn with_indent(mut self, indent: IndentConfig) -> Self {
        self.indent = indent;
        self
    }

    /// Write the buffer to `path`
    pub fn save_to(&mut self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.buffer.to_string())?;
        if self.file_path.as_deref() == Some(path) {
            self.is_modified = false;
        }
        tracing::info!("Saved document to {}", path.display());
        Ok(())
    }

    /// Parsed structure of the current text
    pub fn structure(&self) -> &HtmlStructure {
        &self.structure
    }

    /// Get the length of a line (excluding newline character)
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx < self.buffer.len_lines() {
            let line = self.buffer.line(line_idx);
            line.len_chars().saturating_sub(
                if line.len_chars() > 0 && line.chars().last() == Some('\n') {
                    1
                } else {
                    0
                },
            )
        } else {
            0
        }
    }

    /// Convert a position to a buffer char offset, clamping to the document
    pub fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(pos.line);
        line_start + pos.column.min(self.line_length(pos.line))
    }

    /// Column after a line's leading spaces and tabs
    pub fn first_non_whitespace_column(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(line_idx);
        line.chars().take_while(|c| matches!(c, ' ' | '\t')).count()
    }

    /// Replace the leading indentation of `line` without re-parsing.
    ///
    /// Returns whether the buffer changed.
    fn apply_indent(&mut self, line: usize) -> bool {
        if line >= self.buffer.len_lines() {
            return false;
        }

        let column = self.first_non_whitespace_column(line);
        let line_start = self.buffer.line_to_char(line);
        let rest = self.buffer.slice(line_start + column..line_start + self.line_length(line));
        if rest.chars().all(|c| c == '\r') {
            // Blank lines keep whatever they have
            return false;
        }

        let Some(level) = self.structure.indent_level(line, column) else {
            tracing::trace!(line, "line starts inside opaque content, not re-indenting");
            return false;
        };

        let wanted = self.indent.indentation(level);
        let current: String = self.buffer.slice(line_start..line_start + column).to_string();
        if current == wanted {
            return false;
        }

        self.buffer.remove(line_start..line_start + column);
        self.buffer.insert(line_start, &wanted);
        true
    }

    fn mark_edited(&mut self) {
        self.is_modified = true;
        self.revision = self.revision.wrapping_add(1);
        self.structure = HtmlStructure::parse(&self.buffer.to_string());
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for Document {
    fn text(&self) -> String {
        self.buffer.to_string()
    }

    fn text_range(&self, start: Position, end: Position) -> String {
        let start = self.position_to_offset(start);
        let end = self.position_to_offset(end).max(start);
        self.buffer.slice(start..end).to_string()
    }

    fn replace_range(&mut self, text: &str, start: Position, end: Position) {
        let start = self.position_to_offset(start);
        let end = self.position_to_offset(end).max(start);
        self.buffer.remove(start..end);
        self.buffer.insert(start, text);
        self.mark_edited();
    }

    fn reindent_line(&mut self, line: usize) {
        if self.apply_indent(line) {
            self.mark_edited();
        }
    }

    /// Re-indents the run against the structure parsed before it and parses
    /// once at the end. A line's level only depends on the line numbers of
    /// earlier lines, which re-indenting never moves.
    fn reindent_lines(&mut self, lines: RangeInclusive<usize>) {
        let mut changed = false;
        for line in lines {
            changed |= self.apply_indent(line);
        }
        if changed {
            self.mark_edited();
        }
    }

    fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}
