//! Command-line argument parsing
//!
//! Supports:
//! - Resolving a selection to its tag range (`resolve`)
//! - Running a full edit session with a replacement fragment (`edit`)
//! - Listing linked stylesheets (`stylesheets`)
//! - Listing registered commands (`commands`)
//!
//! Selections are given as `LINE:COL-LINE:COL`, 1-indexed like editor
//! status bars, and converted to 0-indexed positions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{Position, Selection};

/// Edit HTML fragments by tag range
#[derive(Parser, Debug)]
#[command(name = "tagedit", version, about = "Edit HTML fragments by tag range")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/tagedit/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print the tag-aligned range and fragment a selection resolves to
    Resolve {
        /// HTML document
        file: PathBuf,
        /// Selection as LINE:COL-LINE:COL (or LINE:COL for an empty selection)
        #[arg(short, long, value_parser = parse_selection)]
        selection: Selection,
        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Replace the fragment a selection resolves to and re-indent it
    Edit {
        /// HTML document
        file: PathBuf,
        /// Selection as LINE:COL-LINE:COL (or LINE:COL to insert)
        #[arg(short, long, value_parser = parse_selection)]
        selection: Selection,
        /// File holding the edited fragment ("-" reads stdin)
        #[arg(short, long, value_name = "FILE")]
        fragment: PathBuf,
        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
        output: Option<PathBuf>,
        /// Overwrite the input document
        #[arg(long)]
        in_place: bool,
    },
    /// List stylesheets linked from a document
    Stylesheets {
        /// HTML document
        file: PathBuf,
    },
    /// List registered commands and their keybindings
    Commands,
}

/// Errors from parsing a `LINE:COL-LINE:COL` selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionParseError {
    /// A position was not of the form LINE:COL
    MissingColon(String),
    /// A line or column was not a number
    InvalidNumber(String),
    /// Lines and columns start at 1
    ZeroIndex(String),
}

impl std::fmt::Display for SelectionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColon(s) => write!(f, "expected LINE:COL, got '{}'", s),
            Self::InvalidNumber(s) => write!(f, "'{}' is not a number", s),
            Self::ZeroIndex(s) => write!(f, "lines and columns start at 1, got '{}'", s),
        }
    }
}

impl std::error::Error for SelectionParseError {}

fn parse_index(s: &str) -> Result<usize, SelectionParseError> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| SelectionParseError::InvalidNumber(s.to_string()))?;
    // Convert from 1-indexed (user input) to 0-indexed (internal)
    value
        .checked_sub(1)
        .ok_or_else(|| SelectionParseError::ZeroIndex(s.to_string()))
}

/// Parse a 1-indexed `LINE:COL` into a 0-indexed position
pub fn parse_position(s: &str) -> Result<Position, SelectionParseError> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| SelectionParseError::MissingColon(s.to_string()))?;
    Ok(Position::new(parse_index(line)?, parse_index(column)?))
}

/// Parse `LINE:COL-LINE:COL` (anchor-head) or `LINE:COL` (collapsed)
pub fn parse_selection(s: &str) -> Result<Selection, SelectionParseError> {
    match s.split_once('-') {
        Some((anchor, head)) => Ok(Selection::new(
            parse_position(anchor)?,
            parse_position(head)?,
        )),
        None => Ok(Selection::collapsed(parse_position(s)?)),
    }
}

/// Format a 0-indexed position the way users type it
pub fn format_position(pos: Position) -> String {
    format!("{}:{}", pos.line + 1, pos.column + 1)
}
