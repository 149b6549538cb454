//! Review tally core: form/response classification, section scanning,
//! word counting, and the pure refresh state machine.
mod classify;
mod config;
mod count;
mod effect;
mod msg;
mod report;
mod scan;
mod state;
mod update;
mod view_model;

pub use classify::{Classifier, LineKind, RuleError};
pub use config::{BuiltinRule, RuleSpec, TallyConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_WORD_THRESHOLD};
pub use count::{count_line_words, count_words, ResponseWordCounter};
pub use effect::Effect;
pub use msg::{EditRange, Msg};
pub use report::{
    format_badge, format_status_line, format_warning, render_summary_table, Reporter,
    SectionReport, Status,
};
pub use scan::{
    parse_major_header, scan_sections, section_at, Section, SectionId, MAJOR_MARKER,
    MINOR_MARKER,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, Badge, SummaryRow};
