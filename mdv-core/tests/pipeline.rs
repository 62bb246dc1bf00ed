//! Integration tests for the mdv-core pipeline
//!
//! These exercise the full document flow end-to-end: load from disk,
//! heading extraction, TOC construction, HTML rendering, and image path
//! rewriting against the document's own directory.

use mdv_core::{Document, TocNode};
use std::fs;
use tempfile::TempDir;

/// Write a markdown file into its own directory and load it
fn load_doc(content: &str) -> (Document, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("doc.md");
    fs::write(&path, content).expect("failed to write test document");
    let doc = Document::load(&path).expect("failed to load test document");
    (doc, dir)
}

fn collect_ids(nodes: &[TocNode], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.id.clone());
        collect_ids(&node.children, out);
    }
}

#[test]
fn load_builds_nested_toc() {
    let content = "\
# User Guide

## Installation

### From Source

## Usage

# Appendix
";
    let (doc, _dir) = load_doc(content);

    assert_eq!(doc.toc.len(), 2);
    assert_eq!(doc.toc[0].title, "User Guide");
    assert_eq!(doc.toc[0].children.len(), 2);
    assert_eq!(doc.toc[0].children[0].title, "Installation");
    assert_eq!(doc.toc[0].children[0].children[0].title, "From Source");
    assert_eq!(doc.toc[1].title, "Appendix");
}

#[test]
fn every_toc_id_has_an_anchor_in_the_html() {
    let content = "# Alpha & Beta\n\n## The `run` step\n\n### Pinned {#pinned-here}\n";
    let (doc, _dir) = load_doc(content);
    let html = doc.render();

    let mut ids = Vec::new();
    collect_ids(&doc.toc, &mut ids);
    assert_eq!(ids.len(), 3);
    for id in ids {
        assert!(
            html.contains(&format!("id=\"{}\"", id)),
            "anchor {} missing from rendered HTML",
            id
        );
    }
}

#[test]
fn relative_images_resolve_through_virtual_host() {
    let content = "\
# Pictures

![local](images/pic.png)

![remote](https://example.com/pic.png)
";
    let (doc, _dir) = load_doc(content);
    let html = doc.render();

    assert!(
        html.contains("src=\"https://appassets.example/images/pic.png\""),
        "local image not rewritten: {}",
        html
    );
    assert!(
        html.contains("src=\"https://example.com/pic.png\""),
        "remote image was touched: {}",
        html
    );
}

#[test]
fn escaping_image_reference_is_left_alone() {
    let content = "![escape](../outside/pic.png)\n";
    let (doc, _dir) = load_doc(content);
    let html = doc.render();

    assert!(html.contains("src=\"../outside/pic.png\""));
    assert!(!html.contains("appassets.example"));
}

#[test]
fn reload_rebuilds_everything() {
    let (mut doc, dir) = load_doc("# Before\n\n![a](a.png)\n");
    assert_eq!(doc.title(), Some("Before"));
    assert!(doc.render().contains("https://appassets.example/a.png"));

    fs::write(dir.path().join("doc.md"), "# After\n\n## Fresh Section\n").unwrap();
    doc.reload().unwrap();

    assert_eq!(doc.rev, 2);
    assert_eq!(doc.title(), Some("After"));
    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].children[0].id, "fresh-section");
    assert!(!doc.render().contains("a.png"));
}

#[test]
fn document_statistics() {
    let (doc, _dir) = load_doc("# Stats\n\nOne two three four.\n");
    assert_eq!(doc.title(), Some("Stats"));
    assert_eq!(doc.word_count(), 5);
}
