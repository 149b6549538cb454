use pretty_assertions::assert_eq;
use tally_core::{parse_major_header, scan_sections, section_at, Section};

const TWO_PAPERS: &str = "\
==+== HotCRP Paper Review Form
==+== Paper #1
Overall merit:
Fine work.
==+== Paper #2
==-== Title: Something
Needs more evaluation.
";

fn assert_contiguous(document: &str, sections: &[Section]) {
    for pair in sections.windows(2) {
        assert!(pair[0].range.start <= pair[1].range.start);
        assert_eq!(pair[0].range.end, pair[1].range.start);
    }
    if let Some(last) = sections.last() {
        assert_eq!(last.range.end, document.len());
    }
}

#[test]
fn parses_major_headers_only() {
    assert_eq!(parse_major_header("==+== Paper #42"), Some("42".to_string()));
    assert_eq!(
        parse_major_header("==+== Paper #7 (shepherded)"),
        Some("7".to_string())
    );
    assert_eq!(parse_major_header("==-== Paper #42"), None);
    assert_eq!(parse_major_header("==+== Paper #"), None);
    assert_eq!(parse_major_header("==+== Paper #x1"), None);
    assert_eq!(parse_major_header(" ==+== Paper #1"), None);
}

#[test]
fn sections_are_contiguous_and_ordered() {
    let sections = scan_sections(TWO_PAPERS);
    let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let first_header = TWO_PAPERS.find("==+== Paper #1").unwrap();
    let second_header = TWO_PAPERS.find("==+== Paper #2").unwrap();
    assert_eq!(sections[0].range, first_header..second_header);
    assert_eq!(sections[1].range, second_header..TWO_PAPERS.len());
    assert_contiguous(TWO_PAPERS, &sections);
}

#[test]
fn no_headers_means_no_sections() {
    assert!(scan_sections("").is_empty());
    assert!(scan_sections("just some text\nand more\n").is_empty());
    assert!(scan_sections("==+== Paper #abc\n").is_empty());
}

#[test]
fn malformed_headers_are_swallowed() {
    let doc = "==+== Paper #3\nbody\n==+== Paper #oops\nmore body\n";
    let sections = scan_sections(doc);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].range, 0..doc.len());
}

#[test]
fn repeated_ids_are_kept_in_document_order() {
    let doc = "==+== Paper #9\na\n==+== Paper #2\nb\n==+== Paper #9\nc";
    let sections = scan_sections(doc);
    let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["9", "2", "9"]);
    assert_contiguous(doc, &sections);
}

#[test]
fn crlf_documents_scan_the_same() {
    let doc = "==+== Paper #1\r\nyes\r\n==+== Paper #2\r\nno\r\n";
    let sections = scan_sections(doc);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].range.start, doc.find("==+== Paper #2").unwrap());
    assert_contiguous(doc, &sections);
}

#[test]
fn section_at_agrees_with_full_scan() {
    let sections = scan_sections(TWO_PAPERS);
    for position in 0..=TWO_PAPERS.len() {
        let expected = sections
            .iter()
            .find(|s| s.range.contains(&position))
            .or_else(|| sections.last().filter(|s| s.range.end == position))
            .cloned();
        assert_eq!(section_at(TWO_PAPERS, position), expected, "position {position}");
    }
}

#[test]
fn section_at_before_first_header_is_none() {
    assert_eq!(section_at(TWO_PAPERS, 3), None);
    assert_eq!(section_at("no headers here", 5), None);
    assert_eq!(section_at("", 0), None);
}

#[test]
fn section_at_clamps_out_of_range_positions() {
    let section = section_at(TWO_PAPERS, usize::MAX).unwrap();
    assert_eq!(section.id, "2");
}
