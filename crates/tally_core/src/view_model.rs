use crate::SectionId;

/// One inline badge, anchored at a section's header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub offset: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub id: SectionId,
    pub words: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub badges: Vec<Badge>,
    pub status_line: Option<String>,
    pub warning: Option<String>,
    pub summary: Vec<SummaryRow>,
    /// An edit is waiting for its debounced refresh; badges may be stale.
    pub refresh_pending: bool,
}
