//! tagedit - WYSIWYG editing of HTML fragments
//!
//! Resolves an arbitrary selection in an HTML document to a well-formed,
//! tag-aligned fragment, hands it to a rich-text editing surface, and
//! splices the edited result back into the document.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod messages;
pub mod model;
pub mod resolve;
pub mod session;
pub mod stylesheets;
pub mod surface;
pub mod syntax;
pub mod tracing;

// Re-export commonly used types
pub use commands::{Cmd, CommandId};
pub use config::TageditConfig;
pub use messages::SessionMsg;
pub use model::{Document, EditorState, Position, Range};
pub use resolve::{resolve_range, Resolution};
pub use session::FragmentEditor;
