use std::ops::Range;

use crate::classify::{Classifier, LineKind};
use crate::scan::{clamp_range, line_spans};

/// Counts only response lines, as decided by the wrapped [`Classifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseWordCounter {
    classifier: Classifier,
}

impl ResponseWordCounter {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn count_range(&self, document: &str, range: Range<usize>) -> u32 {
        count_words(document, range, &self.classifier)
    }
}

/// Words in the response lines of `document[range]`.
///
/// Form lines are skipped whole, even when they contain words. The last
/// line is counted up to `range.end` whether or not it is terminated.
pub fn count_words(document: &str, range: Range<usize>, classifier: &Classifier) -> u32 {
    let range = clamp_range(document, range);
    let text = &document[range];
    line_spans(text, 0)
        .filter(|(_, line)| classifier.classify(line) == LineKind::Response)
        .map(|(_, line)| count_line_words(line))
        .sum()
}

/// Number of maximal runs of word characters (letters, digits, `_`).
pub fn count_line_words(line: &str) -> u32 {
    let mut count = 0;
    let mut in_word = false;
    for c in line.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            count += 1;
        }
        in_word = is_word;
    }
    count
}
