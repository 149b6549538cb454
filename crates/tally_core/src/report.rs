use std::fmt::Write as _;
use std::ops::Range;

use serde::Serialize;

use crate::classify::{Classifier, RuleError};
use crate::config::TallyConfig;
use crate::count::ResponseWordCounter;
use crate::scan::{scan_sections, section_at, Section, SectionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Ok,
    Under { deficit: u64 },
}

impl Status {
    /// `Ok` once `words` reaches `threshold`; a threshold of zero or below
    /// is always met.
    pub fn for_count(words: u32, threshold: i64) -> Self {
        let words = i64::from(words);
        if words >= threshold {
            Status::Ok
        } else {
            Status::Under {
                deficit: (threshold - words) as u64,
            }
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    pub fn deficit(self) -> Option<u64> {
        match self {
            Status::Ok => None,
            Status::Under { deficit } => Some(deficit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub id: SectionId,
    pub start: usize,
    pub end: usize,
    pub words: u32,
    #[serde(flatten)]
    pub status: Status,
}

impl SectionReport {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Scanner plus counter plus threshold: everything needed to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    counter: ResponseWordCounter,
    threshold: i64,
}

impl Reporter {
    pub fn new(classifier: Classifier, threshold: i64) -> Self {
        Self {
            counter: ResponseWordCounter::new(classifier),
            threshold,
        }
    }

    pub fn from_config(config: &TallyConfig) -> Result<Self, RuleError> {
        let classifier = Classifier::from_rules(&config.classifier_rules)?;
        Ok(Self::new(classifier, config.word_threshold))
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn classifier(&self) -> &Classifier {
        self.counter.classifier()
    }

    /// Every section in document order.
    pub fn build_full_report(&self, document: &str) -> Vec<SectionReport> {
        scan_sections(document)
            .into_iter()
            .map(|section| self.report_section(document, section))
            .collect()
    }

    /// The section containing `position`, if any header precedes it.
    pub fn build_focus_report(&self, document: &str, position: usize) -> Option<SectionReport> {
        section_at(document, position).map(|section| self.report_section(document, section))
    }

    fn report_section(&self, document: &str, section: Section) -> SectionReport {
        let words = self.counter.count_range(document, section.range.clone());
        SectionReport {
            id: section.id,
            start: section.range.start,
            end: section.range.end,
            words,
            status: Status::for_count(words, self.threshold),
        }
    }
}

/// Inline badge anchored at a section header, e.g. `[HC:512w OK]`.
pub fn format_badge(report: &SectionReport) -> String {
    match report.status {
        Status::Ok => format!("[HC:{}w OK]", report.words),
        Status::Under { deficit } => format!("[HC:{}w WARN -{}]", report.words, deficit),
    }
}

/// Status line for the focused section; `None` when nothing needs saying.
pub fn format_status_line(report: Option<&SectionReport>) -> Option<String> {
    let report = report?;
    let deficit = report.status.deficit()?;
    Some(format!("HC P#{}: {}w (-{})", report.id, report.words, deficit))
}

pub fn format_warning(report: &SectionReport, threshold: i64) -> Option<String> {
    let deficit = report.status.deficit()?;
    Some(format!(
        "Paper #{} review is {} words short of {}",
        report.id, deficit, threshold
    ))
}

/// Plain-text `SectionId | WordCount | Status` table in document order.
pub fn render_summary_table(reports: &[SectionReport]) -> String {
    const HEADERS: [&str; 3] = ["SectionId", "WordCount", "Status"];

    let rows: Vec<[String; 3]> = reports
        .iter()
        .map(|report| {
            [
                report.id.clone(),
                report.words.to_string(),
                summary_status(report.status),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    if rows.is_empty() {
        out.push_str("(no sections)\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

pub(crate) fn summary_status(status: Status) -> String {
    match status {
        Status::Ok => "OK".to_string(),
        Status::Under { deficit } => format!("UNDER by {deficit}"),
    }
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let _ = writeln!(
        out,
        "{:<w0$} | {:>w1$} | {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
    );
}
