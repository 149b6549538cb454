use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use anyhow::Context;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tally_core::Msg;
use tally_logging::{tally_debug, tally_warn};

use super::document::{edit_range, line_offset, load_document};

/// Watches one document and forwards each changed snapshot to the watch loop.
///
/// The parent directory is watched rather than the file, so editors that
/// save by writing a temporary file and renaming it over the original keep
/// being followed. Dropping the watcher stops the notification thread.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
}

impl DocumentWatcher {
    /// Sends the current snapshot right away, then one per file change.
    pub fn start(path: &Path, line: Option<usize>, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        let path = fs::canonicalize(path)
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        let dir = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?
            .to_path_buf();

        let mut feed = DocumentFeed::new(path, line, msg_tx);
        feed.reload()?;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if feed.is_relevant(&event) => feed.reload_or_warn(),
            Ok(_) => {}
            Err(err) => tally_warn!("file watch error: {}", err),
        })
        .context("failed to create file watcher")?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", dir.display()))?;
        tally_debug!("Watching directory {:?}", dir);

        Ok(Self { _watcher: watcher })
    }
}

/// Reloads the document and turns content changes into messages.
struct DocumentFeed {
    path: PathBuf,
    line: Option<usize>,
    last: Option<Arc<str>>,
    msg_tx: mpsc::Sender<Msg>,
    warned: bool,
}

impl DocumentFeed {
    fn new(path: PathBuf, line: Option<usize>, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            path,
            line,
            last: None,
            msg_tx,
            warned: false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|path| path.file_name() == self.path.file_name())
    }

    /// Returns whether a new snapshot was sent.
    fn reload(&mut self) -> anyhow::Result<bool> {
        let text = load_document(&self.path)?;
        if self.last.as_deref() == Some(text.as_str()) {
            return Ok(false);
        }

        let edit = edit_range(self.last.as_deref().unwrap_or(""), &text);
        let focus = self.line.map(|line| line_offset(&text, line));
        let text: Arc<str> = Arc::from(text);
        self.last = Some(text.clone());

        // A closed receiver means the watch loop is gone; nothing left to feed.
        let _ = self.msg_tx.send(Msg::DocumentChanged { edit, text });
        if let Some(position) = focus {
            let _ = self.msg_tx.send(Msg::FocusMoved { position });
        }
        Ok(true)
    }

    /// Warns once per run of failures; mid-save reads often fail transiently.
    fn reload_or_warn(&mut self) {
        match self.reload() {
            Ok(_) => self.warned = false,
            Err(err) if !self.warned => {
                tally_warn!("{:#}", err);
                self.warned = true;
            }
            Err(_) => {}
        }
    }
}
