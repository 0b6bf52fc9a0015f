//! Language identification and detection
//!
//! Maps file extensions to language IDs. Fragment editing only runs when the
//! language at the selection is HTML; the embedded languages exist so that a
//! selection inside `<style>` or `<script>` is recognised as not-HTML.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Html,
    Css,
    JavaScript,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "htm" | "xhtml" => LanguageId::Html,
            "css" => LanguageId::Css,
            "js" | "mjs" | "cjs" => LanguageId::JavaScript,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Stable lowercase identifier (`"html"`, `"css"`, ...)
    pub fn id(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "text",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::JavaScript => "javascript",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Html => "HTML",
            LanguageId::Css => "CSS",
            LanguageId::JavaScript => "JavaScript",
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, LanguageId::Html)
    }
}
