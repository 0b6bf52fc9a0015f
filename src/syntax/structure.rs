//! Tree-sitter backed HTML structure
//!
//! Parses a document once and answers the two questions range resolution
//! asks: which tokens sit on a line, and which tags pair up. Positions coming
//! out of tree-sitter are byte based; everything stored here is converted to
//! character columns.

use tree_sitter::{Language, Node, Parser, Point};

use super::languages::LanguageId;
use super::matching::{TagMatcher, TagPair};
use super::tokens::{LineTokens, TagRole, Token, TokenKind, Tokenizer};
use crate::model::{Position, Range};

/// Token, pairing and embedded-language index for one HTML source text
#[derive(Debug, Clone, Default)]
pub struct HtmlStructure {
    lines: Vec<LineTokens>,
    pairs: Vec<TagPair>,
    /// Open and close tag spans, sorted by start, pointing into `pairs`
    tag_index: Vec<(Range, usize)>,
    /// `<style>` / `<script>` bodies
    embedded: Vec<(Range, LanguageId)>,
    /// Spans whose inner lines must not be re-indented (comments, raw text, multi-line tags)
    opaque: Vec<Range>,
}

impl HtmlStructure {
    /// Parse `source` as HTML.
    ///
    /// Never fails: when the parser cannot run, the result treats every line
    /// as plain text, which makes range resolution fall back to an empty range.
    pub fn parse(source: &str) -> Self {
        let language: Language = tree_sitter_html::LANGUAGE.into();
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&language) {
            tracing::error!("Failed to set HTML language: {}", e);
            return Builder::new(source).finish();
        }

        let Some(tree) = parser.parse(source, None) else {
            tracing::warn!("HTML parse produced no tree, treating document as text");
            return Builder::new(source).finish();
        };

        let mut builder = Builder::new(source);
        builder.visit(tree.root_node());
        let structure = builder.finish();
        tracing::trace!(
            lines = structure.lines.len(),
            pairs = structure.pairs.len(),
            "parsed HTML structure"
        );
        structure
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Tokens of a line, if the line exists
    pub fn line(&self, line: usize) -> Option<&LineTokens> {
        self.lines.get(line)
    }

    /// Every matched open/close pair in document order of the open tag
    pub fn pairs(&self) -> &[TagPair] {
        &self.pairs
    }

    /// Language in effect at `pos`: embedded CSS/JS inside style and script bodies
    pub fn language_at(&self, pos: Position) -> LanguageId {
        self.embedded
            .iter()
            .find(|(range, _)| range.contains(pos))
            .map(|(_, lang)| *lang)
            .unwrap_or(LanguageId::Html)
    }

    /// Structural indent level of `line`, whose first non-blank character is at `column`.
    ///
    /// Counts paired elements opened on an earlier line and still open at
    /// `column`. Returns `None` when the line starts inside a comment, raw
    /// text or a tag carried over from a previous line.
    pub fn indent_level(&self, line: usize, column: usize) -> Option<usize> {
        let at = Position::new(line, column);

        if self
            .opaque
            .iter()
            .any(|span| span.start.line < line && span.end > at)
        {
            return None;
        }

        Some(
            self.pairs
                .iter()
                .filter(|pair| pair.open.start.line < line && pair.close.start > at)
                .count(),
        )
    }
}

impl Tokenizer for HtmlStructure {
    fn token_at(&self, pos: Position) -> Option<Token> {
        self.lines.get(pos.line)?.token_at(pos.column)
    }

    fn next_token(&self, pos: Position) -> Option<Token> {
        self.lines.get(pos.line)?.next_after(pos.column)
    }
}

impl TagMatcher for HtmlStructure {
    fn match_tag(&self, pos: Position) -> Option<TagPair> {
        let idx = self.tag_index.partition_point(|(range, _)| range.start <= pos);
        let (range, pair) = self.tag_index.get(idx.checked_sub(1)?)?;
        if range.contains(pos) {
            self.pairs.get(*pair).copied()
        } else {
            None
        }
    }
}

/// Convert a byte column to a character column on a given line
fn byte_to_char_col(line: &str, byte_col: usize) -> usize {
    let byte_col = byte_col.min(line.len());
    let mut valid_byte = byte_col;
    while valid_byte > 0 && !line.is_char_boundary(valid_byte) {
        valid_byte -= 1;
    }
    line[..valid_byte].chars().count()
}

struct Builder<'s> {
    lines: Vec<&'s str>,
    tokens: Vec<Vec<Token>>,
    pairs: Vec<TagPair>,
    embedded: Vec<(Range, LanguageId)>,
    opaque: Vec<Range>,
}

impl<'s> Builder<'s> {
    fn new(source: &'s str) -> Self {
        // Split on '\n' only, matching tree-sitter rows (and ropey lines)
        let lines: Vec<&str> = source.split('\n').collect();
        let tokens = vec![Vec::new(); lines.len()];
        Self {
            lines,
            tokens,
            pairs: Vec::new(),
            embedded: Vec::new(),
            opaque: Vec::new(),
        }
    }

    fn position(&self, point: Point) -> Position {
        let line = self.lines.get(point.row).copied().unwrap_or("");
        Position::new(point.row, byte_to_char_col(line, point.column))
    }

    fn span(&self, node: &Node) -> Range {
        Range::new(
            self.position(node.start_position()),
            self.position(node.end_position()),
        )
    }

    fn visit(&mut self, node: Node) {
        if node.is_missing() {
            return;
        }

        match node.kind() {
            "start_tag" => self.push_tag(&node, TagRole::Open),
            "end_tag" | "erroneous_end_tag" => self.push_tag(&node, TagRole::Close),
            "self_closing_tag" => self.push_tag(&node, TagRole::SelfClosing),
            "comment" => {
                let span = self.span(&node);
                self.opaque.push(span);
                self.push_span(TokenKind::Comment, span);
            }
            "doctype" => {
                let span = self.span(&node);
                self.push_span(TokenKind::Doctype, span);
            }
            "element" | "script_element" | "style_element" => {
                self.record_element(&node);
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    fn push_tag(&mut self, node: &Node, role: TagRole) {
        let span = self.span(node);
        if span.start.line != span.end.line {
            self.opaque.push(span);
        }
        self.push_span(TokenKind::Tag(role), span);
    }

    /// Record the element's open/close pair and, for style/script, its body language
    fn record_element(&mut self, node: &Node) {
        let mut open = None;
        let mut close = None;
        let mut raw = None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.is_missing() {
                continue;
            }
            match child.kind() {
                "start_tag" => open = Some(self.span(&child)),
                "end_tag" => close = Some(self.span(&child)),
                "raw_text" => raw = Some(self.span(&child)),
                _ => {}
            }
        }

        if let Some(raw) = raw {
            self.opaque.push(raw);
            match node.kind() {
                "style_element" => self.embedded.push((raw, LanguageId::Css)),
                "script_element" => self.embedded.push((raw, LanguageId::JavaScript)),
                _ => {}
            }
        }

        if let (Some(open), Some(close)) = (open, close) {
            if !close.is_empty() {
                self.pairs.push(TagPair { open, close });
            }
        }
    }

    /// Add a token for `span`, split across lines when it spans several
    fn push_span(&mut self, kind: TokenKind, span: Range) {
        for row in span.lines() {
            let Some(line) = self.lines.get(row) else {
                break;
            };
            let line_len = line.chars().count();
            let start = if row == span.start.line {
                span.start.column
            } else {
                0
            };
            let end = if row == span.end.line {
                span.end.column
            } else {
                line_len
            };
            let kind = match kind {
                TokenKind::Tag(_) if row > span.start.line => TokenKind::TagTail,
                other => other,
            };
            if start < end {
                self.tokens[row].push(Token::new(kind, start, end));
            }
        }
    }

    fn finish(self) -> HtmlStructure {
        let lines = self
            .tokens
            .into_iter()
            .zip(&self.lines)
            .map(|(mut tokens, text)| {
                tokens.sort_by_key(|t| (t.start, t.end));
                LineTokens {
                    tokens: fill_gaps(tokens, text.chars().count()),
                }
            })
            .collect();

        let mut tag_index: Vec<(Range, usize)> = self
            .pairs
            .iter()
            .enumerate()
            .flat_map(|(idx, pair)| [(pair.open, idx), (pair.close, idx)])
            .collect();
        tag_index.sort_by_key(|(range, _)| range.start);

        HtmlStructure {
            lines,
            pairs: self.pairs,
            tag_index,
            embedded: self.embedded,
            opaque: self.opaque,
        }
    }
}

/// Cover every column of a line: uncovered stretches become text tokens
fn fill_gaps(tokens: Vec<Token>, line_len: usize) -> Vec<Token> {
    let mut filled = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut column = 0;
    for token in tokens {
        if token.start < column {
            // Overlaps a previous token; keep the first
            continue;
        }
        if token.start > column {
            filled.push(Token::new(TokenKind::Text, column, token.start));
        }
        column = token.end;
        filled.push(token);
    }
    if column < line_len {
        filled.push(Token::new(TokenKind::Text, column, line_len));
    }
    filled
}
