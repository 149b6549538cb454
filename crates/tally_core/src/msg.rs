use std::sync::Arc;

use crate::TallyConfig;

/// Byte range of the document touched by an edit, in the new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditRange {
    pub start: usize,
    pub end: usize,
}

impl EditRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Covers the whole of `text`, for hosts that reload instead of patching.
    pub fn whole(text: &str) -> Self {
        Self::new(0, text.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host edited the document; carries the new read-only snapshot.
    DocumentChanged { edit: EditRange, text: Arc<str> },
    /// Cursor or focus moved to a byte offset in the current snapshot.
    FocusMoved { position: usize },
    /// The debounce timer for `generation` elapsed.
    RefreshDue { generation: u64 },
    /// Host replaced the configuration.
    ConfigChanged(TallyConfig),
    ToggleFocusWarning,
    ToggleModelineSummary,
    /// User asked for the tabular summary.
    SummaryRequested,
}
