//! MDV - Markdown viewer core: HTML rendering with TOC and image resolution

use anyhow::{Context, Result};
use clap::Parser;
use mdv_core::{Config, Document, TocNode};
use std::path::PathBuf;

/// Render a markdown file to HTML with TOC anchors and resolved image paths
#[derive(Parser, Debug)]
#[command(name = "mdv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to markdown file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the table of contents instead of HTML
    #[arg(long)]
    toc: bool,

    /// Write rendered HTML to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep running and re-render whenever the file changes on disk
    #[cfg(feature = "watch")]
    #[arg(short, long)]
    watch: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    log::debug!("loaded config: {:?}", config);

    let mut doc = Document::load(&args.file)
        .with_context(|| format!("Failed to load document: {}", args.file.display()))?;
    log::info!(
        "loaded {} ({} words{})",
        doc.path.display(),
        doc.word_count(),
        doc.title().map(|t| format!(", \"{}\"", t)).unwrap_or_default()
    );

    emit(&doc, &args)?;

    #[cfg(feature = "watch")]
    if args.watch {
        watch_loop(&mut doc, &args, &config)?;
    }

    Ok(())
}

/// Write the requested view of the document to the requested destination
fn emit(doc: &Document, args: &Args) -> Result<()> {
    if args.toc {
        for node in &doc.toc {
            print_toc(node, 0);
        }
        return Ok(());
    }

    let html = doc.render();
    match &args.output {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => print!("{}", html),
    }
    Ok(())
}

fn print_toc(node: &TocNode, depth: usize) {
    println!("{:indent$}{} #{}", "", node.title, node.id, indent = depth * 2);
    for child in &node.children {
        print_toc(child, depth + 1);
    }
}

#[cfg(feature = "watch")]
fn watch_loop(doc: &mut Document, args: &Args, config: &Config) -> Result<()> {
    use mdv_core::watch::FileWatcher;
    use std::time::Duration;

    let mut watcher = FileWatcher::new(&doc.path)
        .with_context(|| format!("Failed to watch: {}", doc.path.display()))?;
    log::info!("watching {} for changes", doc.path.display());

    loop {
        std::thread::sleep(Duration::from_millis(50));
        if watcher.check_changed(config.watch.debounce_ms) {
            doc.reload().context("Failed to reload document")?;
            log::info!("reloaded {} (rev {})", doc.path.display(), doc.rev);
            emit(doc, args)?;
        }
    }
}
