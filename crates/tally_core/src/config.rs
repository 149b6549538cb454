use serde::{Deserialize, Serialize};

pub const DEFAULT_WORD_THRESHOLD: i64 = 500;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Built-in line categories that are always form text when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinRule {
    /// Lines opening a section or a subsection (`==+==` / `==-==`).
    SectionHeader,
    /// A line holding nothing but one bracketed note.
    BracketedNote,
    /// A label starting at column 0 and ending in a colon.
    PromptLine,
    /// Empty or whitespace-only lines.
    BlankLine,
}

impl BuiltinRule {
    pub const ALL: [BuiltinRule; 4] = [
        BuiltinRule::SectionHeader,
        BuiltinRule::BracketedNote,
        BuiltinRule::PromptLine,
        BuiltinRule::BlankLine,
    ];
}

/// One entry of the ordered classifier rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSpec {
    Builtin(BuiltinRule),
    /// A regular expression that must match the whole line.
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub word_threshold: i64,
    pub classifier_rules: Vec<RuleSpec>,
    pub debounce_interval_ms: u64,
    pub show_focus_warning: bool,
    pub show_modeline_summary: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            word_threshold: DEFAULT_WORD_THRESHOLD,
            classifier_rules: default_rules(),
            debounce_interval_ms: DEFAULT_DEBOUNCE_MS,
            show_focus_warning: true,
            show_modeline_summary: true,
        }
    }
}

fn default_rules() -> Vec<RuleSpec> {
    BuiltinRule::ALL.into_iter().map(RuleSpec::Builtin).collect()
}
