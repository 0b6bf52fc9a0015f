//! Line tokens and the tokenizer contract
//!
//! A token is a lexical unit confined to one line. Only tag tokens take part
//! in range resolution; every other kind is skipped by the line scans.

use crate::model::Position;

/// Which side of an element a tag token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRole {
    Open,
    Close,
    SelfClosing,
}

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Tag(TagRole),
    /// Part of a tag that began on an earlier line (attributes, `>`)
    TagTail,
    Comment,
    Doctype,
    Text,
}

/// A single token within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start column (0-indexed, inclusive)
    pub start: usize,
    /// End column (exclusive)
    pub end: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self.kind, TokenKind::Tag(_))
    }

    pub fn is_open_tag(&self) -> bool {
        matches!(self.kind, TokenKind::Tag(TagRole::Open))
    }

    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column < self.end
    }
}

/// Tokens for a single line
#[derive(Debug, Clone, Default)]
pub struct LineTokens {
    /// Tokens sorted by start column, non-overlapping
    pub tokens: Vec<Token>,
}

impl LineTokens {
    /// The token covering `column`, if any
    pub fn token_at(&self, column: usize) -> Option<Token> {
        for token in &self.tokens {
            if token.contains(column) {
                return Some(*token);
            }
            if token.start > column {
                break; // tokens are sorted, no need to continue
            }
        }
        None
    }

    /// The first token starting strictly after `column`
    pub fn next_after(&self, column: usize) -> Option<Token> {
        self.tokens.iter().find(|t| t.start > column).copied()
    }
}

/// Host tokenization of a document, one line at a time.
pub trait Tokenizer {
    /// The token whose span contains or starts at `pos`
    fn token_at(&self, pos: Position) -> Option<Token>;

    /// The token starting strictly after `pos` on the same line
    fn next_token(&self, pos: Position) -> Option<Token>;

    /// Walk the tokens of `line` from column 0
    fn walk_line(&self, line: usize) -> LineWalk<'_, Self>
    where
        Self: Sized,
    {
        LineWalk::new(self, line)
    }

    /// The first tag token on `line`, or `None` when the line holds no tag.
    ///
    /// A scan that stops advancing is treated as "no tag" rather than looping.
    fn first_tag_in_line(&self, line: usize) -> Option<Token>
    where
        Self: Sized,
    {
        self.walk_line(line).find(Token::is_tag)
    }
}

/// Left-to-right scan over one line's tokens.
///
/// Every step must move strictly forward; the first token that does not
/// ends the walk.
pub struct LineWalk<'a, T> {
    tokenizer: &'a T,
    line: usize,
    current: Option<Token>,
    started: bool,
    stalled: bool,
}

impl<'a, T: Tokenizer> LineWalk<'a, T> {
    fn new(tokenizer: &'a T, line: usize) -> Self {
        Self {
            tokenizer,
            line,
            current: None,
            started: false,
            stalled: false,
        }
    }

    /// Whether the walk was cut short by a token that failed to advance
    pub fn stalled(&self) -> bool {
        self.stalled
    }
}

impl<T: Tokenizer> Iterator for LineWalk<'_, T> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.stalled {
            return None;
        }

        let next = if !self.started {
            self.started = true;
            self.tokenizer.token_at(Position::new(self.line, 0))
        } else {
            let previous = self.current?;
            let next = self
                .tokenizer
                .next_token(Position::new(self.line, previous.start))?;
            if next.start <= previous.start || next.end <= previous.end {
                tracing::debug!(
                    line = self.line,
                    previous = ?previous,
                    next = ?next,
                    "token scan did not advance, treating line as tagless"
                );
                self.stalled = true;
                self.current = None;
                return None;
            }
            Some(next)
        };

        self.current = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tokenizer over literal token lists, for exercising the walk guard
    struct Fixed(Vec<LineTokens>);

    impl Tokenizer for Fixed {
        fn token_at(&self, pos: Position) -> Option<Token> {
            let line = self.0.get(pos.line)?;
            line.token_at(pos.column).or_else(|| line.next_after(pos.column))
        }

        fn next_token(&self, pos: Position) -> Option<Token> {
            self.0.get(pos.line)?.next_after(pos.column)
        }
    }

    /// Tokenizer that keeps returning the same zero-width token
    struct Stuck;

    impl Tokenizer for Stuck {
        fn token_at(&self, _pos: Position) -> Option<Token> {
            Some(Token::new(TokenKind::Text, 0, 0))
        }

        fn next_token(&self, _pos: Position) -> Option<Token> {
            Some(Token::new(TokenKind::Text, 0, 0))
        }
    }

    fn line(tokens: &[(TokenKind, usize, usize)]) -> LineTokens {
        LineTokens {
            tokens: tokens
                .iter()
                .map(|&(kind, start, end)| Token::new(kind, start, end))
                .collect(),
        }
    }

    #[test]
    fn test_token_at_and_next_after() {
        let tokens = line(&[
            (TokenKind::Text, 0, 2),
            (TokenKind::Tag(TagRole::Open), 2, 5),
            (TokenKind::Text, 5, 9),
        ]);
        assert_eq!(tokens.token_at(3).map(|t| t.start), Some(2));
        assert_eq!(tokens.token_at(9), None);
        assert_eq!(tokens.next_after(2).map(|t| t.start), Some(5));
        assert_eq!(tokens.next_after(5), None);
    }

    #[test]
    fn test_first_tag_skips_non_tag_tokens() {
        let tokenizer = Fixed(vec![line(&[
            (TokenKind::Text, 0, 4),
            (TokenKind::Comment, 4, 12),
            (TokenKind::Tag(TagRole::Close), 12, 16),
            (TokenKind::Tag(TagRole::Open), 16, 19),
        ])]);
        let tag = tokenizer.first_tag_in_line(0);
        assert_eq!(tag, Some(Token::new(TokenKind::Tag(TagRole::Close), 12, 16)));
    }

    #[test]
    fn test_first_tag_none_for_text_line() {
        let tokenizer = Fixed(vec![line(&[(TokenKind::Text, 0, 20)])]);
        assert_eq!(tokenizer.first_tag_in_line(0), None);
    }

    #[test]
    fn test_first_tag_none_for_missing_line() {
        let tokenizer = Fixed(vec![]);
        assert_eq!(tokenizer.first_tag_in_line(3), None);
    }

    #[test]
    fn test_non_advancing_tokenizer_terminates() {
        let mut walk = Stuck.walk_line(0);
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.stalled());
        assert_eq!(Stuck.first_tag_in_line(0), None);
    }
}
