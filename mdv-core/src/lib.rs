//! MDV Core - Document model, outline extraction, and HTML post-processing
//!
//! This crate contains the core logic for mdv, independent of any UI surface:
//! - Document model with Rope-based text storage
//! - Heading extraction and GitHub-style anchor generation
//! - Hierarchical table of contents construction
//! - Relative image path rewriting for a sandboxed rendering surface
//! - Configuration management
//! - File watching (optional feature)

pub mod config;
pub mod doc;
pub mod heading;
pub mod image;
pub mod render;
pub mod toc;

#[cfg(feature = "watch")]
pub mod watch;

// Re-export commonly used types
pub use config::Config;
pub use doc::Document;
pub use heading::Heading;
pub use toc::{build_toc, TocNode};
