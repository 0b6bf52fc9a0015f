//! Stylesheet discovery tests

use std::path::{Path, PathBuf};

use tagedit::stylesheets::{discover_stylesheets, is_relative_stylesheet, link_hrefs};
use tagedit::TageditConfig;

fn default_extensions() -> Vec<String> {
    TageditConfig::default().stylesheet_extensions
}

#[test]
fn test_only_document_relative_sheets_resolve() {
    let text = concat!(
        "<head>\n",
        "  <link rel=\"stylesheet\" href=\"styles/a.css\">\n",
        "  <link rel=\"stylesheet\" href=\"/abs/b.css\">\n",
        "  <link rel=\"stylesheet\" href=\"../c.css\">\n",
        "</head>"
    );
    let sheets = discover_stylesheets(text, Some(Path::new("/srv/site")), &default_extensions());
    assert_eq!(sheets, vec![PathBuf::from("/srv/site/styles/a.css")]);
}

#[test]
fn test_document_order_is_preserved() {
    let text = r#"<link href="z.css"><link href="a.css"><link href="m.css">"#;
    let sheets = discover_stylesheets(text, Some(Path::new("/p")), &default_extensions());
    assert_eq!(
        sheets,
        vec![
            PathBuf::from("/p/z.css"),
            PathBuf::from("/p/a.css"),
            PathBuf::from("/p/m.css"),
        ]
    );
}

#[test]
fn test_non_stylesheet_links_are_skipped() {
    let text = r#"<link rel="icon" href="favicon.ico"><link rel="preload" href="font.woff2">"#;
    assert_eq!(link_hrefs(text), vec!["favicon.ico", "font.woff2"]);
    assert!(discover_stylesheets(text, None, &default_extensions()).is_empty());
}

#[test]
fn test_protocol_relative_and_scheme_urls_are_skipped() {
    let extensions = default_extensions();
    assert!(!is_relative_stylesheet("//cdn.example.com/a.css", &extensions));
    assert!(!is_relative_stylesheet("file:///tmp/a.css", &extensions));
    assert!(!is_relative_stylesheet("", &extensions));
}

#[test]
fn test_query_string_is_stripped_from_path() {
    let sheets = discover_stylesheets(
        r#"<link href="theme.css?v=12#dark">"#,
        Some(Path::new("/w")),
        &default_extensions(),
    );
    assert_eq!(sheets, vec![PathBuf::from("/w/theme.css")]);
}
