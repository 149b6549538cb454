use std::fs;
use std::path::Path;

use anyhow::Context;
use tally_core::EditRange;
use tally_engine::decode_document;
use tally_logging::tally_debug;

pub(crate) fn load_document(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded =
        decode_document(&bytes).with_context(|| format!("failed to decode {}", path.display()))?;
    tally_debug!(
        "Loaded {:?}: {} bytes as {}",
        path,
        bytes.len(),
        decoded.encoding_label
    );
    Ok(decoded.text)
}

/// Byte offset of the start of 1-based `line`, clamped to the document end.
pub(crate) fn line_offset(text: &str, line: usize) -> usize {
    if line <= 1 {
        return 0;
    }
    text.match_indices('\n')
        .nth(line - 2)
        .map_or(text.len(), |(idx, _)| idx + 1)
}

/// 1-based line number containing `offset`.
pub(crate) fn line_number_at(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset].iter().filter(|b| **b == b'\n').count() + 1
}

pub(crate) fn line_text_at(text: &str, offset: usize) -> &str {
    let rest = text.get(offset..).unwrap_or("");
    let line = rest.split('\n').next().unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}

/// Smallest range of `new` that differs from `old`.
pub(crate) fn edit_range(old: &str, new: &str) -> EditRange {
    let prefix = old
        .bytes()
        .zip(new.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .bytes()
        .rev()
        .zip(new.bytes().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    EditRange::new(prefix, new.len() - suffix)
}
