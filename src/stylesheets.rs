//! Stylesheet discovery for the editing surface
//!
//! Best-effort, regex based: finds `<link ... href="...">` values that name a
//! local stylesheet relative to the document, so the surface can render the
//! fragment with the page's styles. Anything that does not match is skipped.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<link\s+(?:[^>]*?\s+)?href\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("link href pattern is valid")
});

/// `scheme:` prefix of an absolute URL (`http:`, `data:`, ...)
static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid"));

/// All `href` values of `<link>` elements, in document order
pub fn link_hrefs(text: &str) -> Vec<&str> {
    LINK_HREF
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .collect()
}

/// Whether `href` is a document-relative path to a file with one of `extensions`
pub fn is_relative_stylesheet(href: &str, extensions: &[String]) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('/') || href.starts_with("..") {
        return false;
    }
    if URL_SCHEME.is_match(href) {
        return false;
    }

    let path = href.split(['?', '#']).next().unwrap_or(href);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Stylesheet paths linked from `text`, resolved against `document_dir`
pub fn discover_stylesheets(
    text: &str,
    document_dir: Option<&Path>,
    extensions: &[String],
) -> Vec<PathBuf> {
    let sheets: Vec<PathBuf> = link_hrefs(text)
        .into_iter()
        .filter(|href| is_relative_stylesheet(href, extensions))
        .map(|href| {
            let href = href.trim();
            let path = href.split(['?', '#']).next().unwrap_or(href);
            match document_dir {
                Some(dir) => dir.join(path),
                None => PathBuf::from(path),
            }
        })
        .collect();

    tracing::debug!(count = sheets.len(), "discovered stylesheets");
    sheets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css() -> Vec<String> {
        vec!["css".to_string()]
    }

    #[test]
    fn test_link_hrefs_handles_attribute_order_and_quotes() {
        let text = r#"<link rel="stylesheet" href="a.css"><LINK href='b.css' rel=stylesheet>"#;
        assert_eq!(link_hrefs(text), vec!["a.css", "b.css"]);
    }

    #[test]
    fn test_rejects_absolute_parent_and_urls() {
        assert!(!is_relative_stylesheet("/abs/b.css", &css()));
        assert!(!is_relative_stylesheet("../c.css", &css()));
        assert!(!is_relative_stylesheet("https://cdn.example.com/x.css", &css()));
        assert!(!is_relative_stylesheet("styles/icon.png", &css()));
        assert!(is_relative_stylesheet("styles/a.css", &css()));
        assert!(is_relative_stylesheet("./a.CSS?v=3", &css()));
    }

    #[test]
    fn test_discover_resolves_against_document_dir() {
        let text = r#"<link href="styles/a.css"><link href="/abs/b.css"><link href="../c.css">"#;
        let sheets = discover_stylesheets(text, Some(Path::new("/site/pages")), &css());
        assert_eq!(sheets, vec![PathBuf::from("/site/pages/styles/a.css")]);
    }

    #[test]
    fn test_discover_without_document_dir_keeps_relative_path() {
        let sheets = discover_stylesheets(r#"<link href="main.css">"#, None, &css());
        assert_eq!(sheets, vec![PathBuf::from("main.css")]);
    }

    #[test]
    fn test_malformed_markup_yields_nothing() {
        let sheets = discover_stylesheets(r#"<link href="broken.css"#, None, &css());
        assert!(sheets.is_empty());
    }
}
