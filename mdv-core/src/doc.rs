//! Document model with Rope-based text storage

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::heading::{self, Heading};
use crate::image;
use crate::render;
use crate::toc::{self, TocNode};

/// The main document structure
///
/// Headings and the TOC forest are rebuilt wholesale on every (re)load; no
/// structure is patched incrementally.
#[derive(Clone)]
pub struct Document {
    pub path: PathBuf,
    pub rope: Rope,
    pub headings: Vec<Heading>,
    pub toc: Vec<TocNode>,
    pub loaded_mtime: Option<SystemTime>,
    pub disk_mtime: Option<SystemTime>,
    pub rev: u64,
}

impl Document {
    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let content = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;

        let rope = Rope::from_str(&content);
        let headings = heading::extract_headings(&content);
        let toc = toc::build_toc(&headings);

        let mtime = fs::metadata(&abs_path).ok().and_then(|m| m.modified().ok());

        Ok(Self {
            path: abs_path,
            rope,
            headings,
            toc,
            loaded_mtime: mtime,
            disk_mtime: mtime,
            rev: 1,
        })
    }

    /// Reload the document from disk, discarding the previous structures
    pub fn reload(&mut self) -> Result<()> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to reload file: {}", self.path.display()))?;

        self.rope = Rope::from_str(&content);
        self.headings = heading::extract_headings(&content);
        self.toc = toc::build_toc(&self.headings);

        let mtime = fs::metadata(&self.path).ok().and_then(|m| m.modified().ok());
        self.loaded_mtime = mtime;
        self.disk_mtime = mtime;
        self.rev += 1;

        log::debug!("reloaded {} (rev {})", self.path.display(), self.rev);

        Ok(())
    }

    /// Directory containing the document, used as the image resolution base
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Render the document to an HTML body with image srcs rewritten to the
    /// virtual-host form
    pub fn render(&self) -> String {
        let markdown: String = self.rope.chunks().collect();
        let html = render::render_html(&markdown);
        image::rewrite_image_paths(&html, self.base_dir())
    }

    /// Title of the document: text of the first heading, if any
    pub fn title(&self) -> Option<&str> {
        self.headings.first().map(|h| h.text.as_str())
    }

    /// Count word tokens in the plain-text projection of the document
    pub fn word_count(&self) -> usize {
        let markdown: String = self.rope.chunks().collect();
        render::plain_text(&markdown)
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .count()
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}
