//! Editor model - the document, its selection and position types

pub mod document;
pub mod editor;
pub mod position;

pub use document::Document;
pub use editor::EditorState;
pub use position::{Position, Range, Selection};
