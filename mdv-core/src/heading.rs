//! Heading extraction and anchor id generation

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::render::markdown_options;

/// A heading in the markdown document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// Extract headings from markdown text in document order.
///
/// Inline markup inside a heading is flattened to plain text (code spans keep
/// their literal content, line breaks become single spaces). An explicit
/// `{#id}` heading attribute takes precedence over the generated slug.
/// Headings whose flattened text is blank are skipped.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut open: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(text, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                open = Some((level as u8, id.map(|s| s.into_string()), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, buf)) = open.take() {
                    let text = buf.trim();
                    if text.is_empty() {
                        continue;
                    }
                    let id = id.unwrap_or_else(|| slugify(text));
                    headings.push(Heading {
                        level,
                        text: text.to_string(),
                        id,
                    });
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Generate a GitHub-style anchor id from heading text.
///
/// Matches the auto-identifier scheme of the rendering pipeline: lowercase,
/// whitespace to hyphens, everything outside `[a-z0-9-_]` stripped, hyphen
/// runs collapsed, leading/trailing hyphens trimmed. All-punctuation or empty
/// input falls back to `"section"` so the result is always a usable id.
pub fn slugify(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            id.push('-');
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
            id.push(c);
        }
    }

    // Collapse hyphen runs left by stripped characters or whitespace runs
    let mut collapsed = String::with_capacity(id.len());
    let mut prev_hyphen = false;
    for c in id.chars() {
        if c == '-' {
            if !prev_hyphen {
                collapsed.push(c);
            }
            prev_hyphen = true;
        } else {
            collapsed.push(c);
            prev_hyphen = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "section".to_string()
    } else {
        trimmed.to_string()
    }
}
