use std::sync::Arc;
use std::time::Duration;

use crate::report::{format_badge, format_status_line, format_warning, summary_status};
use crate::view_model::{AppViewModel, Badge, SummaryRow};
use crate::{Classifier, Reporter, RuleError, SectionReport, TallyConfig};

/// Everything the host needs between events. Reports are rebuilt from the
/// document snapshot on every refresh and are never a source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    config: TallyConfig,
    reporter: Reporter,
    document: Arc<str>,
    focus: Option<usize>,
    generation: u64,
    pending_refresh: Option<u64>,
    full_report: Vec<SectionReport>,
    focus_report: Option<SectionReport>,
    refresh_count: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let config = TallyConfig::default();
        let reporter = Reporter::new(Classifier::default(), config.word_threshold);
        Self {
            config,
            reporter,
            document: Arc::from(""),
            focus: None,
            generation: 0,
            pending_refresh: None,
            full_report: Vec::new(),
            focus_report: None,
            refresh_count: 0,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TallyConfig) -> Result<Self, RuleError> {
        let reporter = Reporter::from_config(&config)?;
        Ok(Self {
            config,
            reporter,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn full_report(&self) -> &[SectionReport] {
        &self.full_report
    }

    pub fn focus_report(&self) -> Option<&SectionReport> {
        self.focus_report.as_ref()
    }

    pub fn pending_refresh(&self) -> Option<u64> {
        self.pending_refresh
    }

    /// Number of full recomputations run so far.
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn view(&self) -> AppViewModel {
        let badges = self
            .full_report
            .iter()
            .map(|report| Badge {
                offset: report.start,
                text: format_badge(report),
            })
            .collect();
        let summary = self
            .full_report
            .iter()
            .map(|report| SummaryRow {
                id: report.id.clone(),
                words: report.words,
                status: summary_status(report.status),
            })
            .collect();
        let status_line = if self.config.show_modeline_summary {
            format_status_line(self.focus_report.as_ref())
        } else {
            None
        };
        let warning = if self.config.show_focus_warning {
            self.focus_report
                .as_ref()
                .and_then(|report| format_warning(report, self.reporter.threshold()))
        } else {
            None
        };

        AppViewModel {
            badges,
            status_line,
            warning,
            summary,
            refresh_pending: self.pending_refresh.is_some(),
        }
    }

    /// Returns whether the view changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.config.debounce_interval_ms)
    }

    pub(crate) fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub(crate) fn set_document(&mut self, text: Arc<str>) {
        self.document = text;
    }

    /// Starts a new debounce generation, superseding any pending one.
    pub(crate) fn next_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.pending_refresh = Some(self.generation);
        self.generation
    }

    /// Consumes the pending refresh if `generation` is the latest one.
    pub(crate) fn take_pending(&mut self, generation: u64) -> bool {
        if self.pending_refresh == Some(generation) {
            self.pending_refresh = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn apply_config(&mut self, config: TallyConfig, reporter: Reporter) {
        self.config = config;
        self.reporter = reporter;
        self.mark_dirty();
    }

    pub(crate) fn toggle_focus_warning(&mut self) {
        self.config.show_focus_warning = !self.config.show_focus_warning;
        self.mark_dirty();
    }

    pub(crate) fn toggle_modeline_summary(&mut self) {
        self.config.show_modeline_summary = !self.config.show_modeline_summary;
        self.mark_dirty();
    }

    pub(crate) fn refresh_full(&mut self) {
        self.full_report = self.reporter.build_full_report(&self.document);
        self.refresh_count += 1;
        self.refresh_focus();
        self.mark_dirty();
    }

    pub(crate) fn move_focus(&mut self, position: usize) {
        self.focus = Some(position);
        self.refresh_focus();
    }

    fn refresh_focus(&mut self) {
        let next = self
            .focus
            .and_then(|position| self.reporter.build_focus_report(&self.document, position));
        if next != self.focus_report {
            self.focus_report = next;
            self.mark_dirty();
        }
    }
}
