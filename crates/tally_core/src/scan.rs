//! Section boundary scanning.
//!
//! A section opens at a major header line (`==+== Paper #<digits>`) and runs
//! up to, but not including, the next major header or the end of the
//! document. Minor headers (`==-==`) and malformed major headers are plain
//! lines inside whatever section contains them.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

pub const MAJOR_MARKER: &str = "==+==";
pub const MINOR_MARKER: &str = "==-==";

/// Opaque section label taken from the header line. Not assumed unique.
pub type SectionId = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    pub id: SectionId,
    /// Byte range in the document: header line start up to the next header.
    pub range: Range<usize>,
}

/// Returns the section id if `line` (without terminator) opens a section.
pub fn parse_major_header(line: &str) -> Option<SectionId> {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    let header_re =
        HEADER_RE.get_or_init(|| Regex::new(r"^==\+== Paper #([0-9]+)").expect("header pattern"));
    header_re
        .captures(line)
        .map(|caps| caps[1].to_string())
}

/// Single left-to-right pass over the document collecting every section.
pub fn scan_sections(document: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Option<(SectionId, usize)> = None;

    for (start, line) in line_spans(document, 0) {
        let Some(id) = parse_major_header(line) else {
            continue;
        };
        if let Some((prev_id, prev_start)) = open.take() {
            sections.push(Section {
                id: prev_id,
                range: prev_start..start,
            });
        }
        open = Some((id, start));
    }

    if let Some((id, start)) = open {
        sections.push(Section {
            id,
            range: start..document.len(),
        });
    }
    sections
}

/// Finds the section containing `position` without scanning the whole
/// document: backward to the nearest header, then forward to the next one.
///
/// Positions past the end are clamped to the end of the document.
pub fn section_at(document: &str, position: usize) -> Option<Section> {
    let position = floor_char_boundary(document, position);
    let mut start = line_start_at(document, position);

    loop {
        let line = line_at(document, start);
        if let Some(id) = parse_major_header(line) {
            let body_start = next_line_start(document, start);
            let end = line_spans(document, body_start)
                .find(|(_, line)| parse_major_header(line).is_some())
                .map_or(document.len(), |(offset, _)| offset);
            return Some(Section {
                id,
                range: start..end,
            });
        }
        if start == 0 {
            return None;
        }
        start = line_start_at(document, start - 1);
    }
}

/// Iterates `(offset, line)` pairs from `from` onwards, lines stripped of
/// `\n` and a preceding `\r`. An unterminated last line is included.
pub(crate) fn line_spans(document: &str, from: usize) -> impl Iterator<Item = (usize, &str)> {
    let tail = document.get(from..).unwrap_or("");
    tail.split_inclusive('\n').scan(from, |offset, raw| {
        let start = *offset;
        *offset += raw.len();
        Some((start, strip_terminator(raw)))
    })
}

/// Clamps `range` into the document and onto char boundaries.
pub(crate) fn clamp_range(document: &str, range: Range<usize>) -> Range<usize> {
    let end = floor_char_boundary(document, range.end);
    let start = floor_char_boundary(document, range.start.min(end));
    start..end
}

fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

fn floor_char_boundary(document: &str, index: usize) -> usize {
    let mut index = index.min(document.len());
    while !document.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn line_start_at(document: &str, position: usize) -> usize {
    document[..position].rfind('\n').map_or(0, |idx| idx + 1)
}

fn next_line_start(document: &str, start: usize) -> usize {
    document[start..]
        .find('\n')
        .map_or(document.len(), |idx| start + idx + 1)
}

fn line_at(document: &str, start: usize) -> &str {
    let rest = &document[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    strip_terminator(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_spans_report_offsets_and_strip_crlf() {
        let spans: Vec<_> = line_spans("a\r\nbc\nd", 0).collect();
        assert_eq!(spans, vec![(0, "a"), (3, "bc"), (6, "d")]);
    }

    #[test]
    fn line_spans_from_middle() {
        let spans: Vec<_> = line_spans("a\nbc\nd", 2).collect();
        assert_eq!(spans, vec![(2, "bc"), (5, "d")]);
    }

    #[test]
    fn clamp_range_respects_char_boundaries() {
        let doc = "aé";
        assert_eq!(clamp_range(doc, 0..2), 0..1);
        assert_eq!(clamp_range(doc, 5..9), 3..3);
    }
}
