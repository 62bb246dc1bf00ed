//! File watching for external changes

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default debounce period applied between a change notification and reload.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Watches a document for external modifications.
///
/// Change notifications are debounced on the caller's side: the caller polls
/// [`check_changed`](Self::check_changed) and a change is reported only once
/// the debounce period has elapsed since the last raw event, so editor save
/// bursts collapse into a single reload.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<()>,
    watched_path: PathBuf,
    last_event: Option<Instant>,
}

impl FileWatcher {
    /// Create a new file watcher for the given path
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let watched_path = path.to_path_buf();
        let notify_path = watched_path.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let relevant = matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                );
                if relevant && event.paths.iter().any(|p| p == &notify_path) {
                    let _ = tx.send(());
                }
            }
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch file: {}", path.display()))?;

        // Watch the parent directory too, for editors that save via atomic rename
        if let Some(parent) = path.parent() {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch directory: {}", parent.display()))?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            watched_path,
            last_event: None,
        })
    }

    /// Poll for a change. Returns true once a change has been seen and the
    /// debounce period has elapsed since the last raw event.
    pub fn check_changed(&mut self, debounce_ms: u64) -> bool {
        while self.receiver.try_recv().is_ok() {
            self.last_event = Some(Instant::now());
        }

        if let Some(last) = self.last_event {
            if last.elapsed() >= Duration::from_millis(debounce_ms) {
                self.last_event = None;
                return true;
            }
        }

        false
    }

    /// True when a raw event has arrived but the debounce has not elapsed yet
    pub fn has_pending(&self) -> bool {
        self.last_event.is_some()
    }

    /// Get the watched file path
    pub fn path(&self) -> &Path {
        &self.watched_path
    }
}
