//! # Explanation Levels
//!
//! The five fixed simplification tiers and the prompt builder.
//!
//! The table is a process-wide constant. Ranks run 1..=5 and a lookup outside
//! that range is an error, never a silent default.

mod errors;

pub use errors::{LevelError, LevelResult};

/// Lowest selectable rank
pub const MIN_LEVEL: i64 = 1;

/// Highest selectable rank
pub const MAX_LEVEL: i64 = 5;

/// Rank preselected on a fresh form
pub const DEFAULT_LEVEL: i64 = MIN_LEVEL;

/// A single simplification tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDefinition {
    /// Rank in 1..=5
    pub rank: i64,

    /// Short label, also written to the log sink
    pub label: &'static str,

    /// Instruction placed in front of the user's text
    pub template: &'static str,

    /// Legend tooltip shown next to the slider
    pub hint: &'static str,
}

static LEVELS: [LevelDefinition; 5] = [
    LevelDefinition {
        rank: 1,
        label: "I'm 5",
        template: "Explain the following text like I'm 5 years old. Use very simple words and short sentences.",
        hint: "Super simple words and examples. No jargon.",
    },
    LevelDefinition {
        rank: 2,
        label: "Middle School",
        template: "Explain the following text to a middle school student. Be clear, fun, and educational.",
        hint: "Middle school level, basic understanding, light detail.",
    },
    LevelDefinition {
        rank: 3,
        label: "High School",
        template: "Explain the following text to a high school student. Keep it casual but detailed.",
        hint: "High school level, more precise, but still casual.",
    },
    LevelDefinition {
        rank: 4,
        label: "College",
        template: "Explain the following text to a college student. Use technical language, but keep it understandable.",
        hint: "College level, technical, but still readable.",
    },
    LevelDefinition {
        rank: 5,
        label: "Intern",
        template: "Explain the following text to a new intern in the field. Be professional and detailed.",
        hint: "Intern level, assume base knowledge, go deeper.",
    },
];

/// All levels in rank order
pub fn all() -> &'static [LevelDefinition] {
    &LEVELS
}

/// Look up a level by rank
pub fn lookup(rank: i64) -> LevelResult<&'static LevelDefinition> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&rank) {
        return Err(LevelError::OutOfRange(rank));
    }
    Ok(&LEVELS[(rank - MIN_LEVEL) as usize])
}

/// Build the prompt sent to the completion service.
///
/// The text is embedded verbatim between triple single quotes.
pub fn build_prompt(level: &LevelDefinition, text: &str) -> String {
    format!("{}\n\nText:\n'''\n{}\n'''", level.template, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_five_levels() {
        assert_eq!(all().len(), 5);
        for (i, level) in all().iter().enumerate() {
            assert_eq!(level.rank, i as i64 + 1);
        }
    }

    #[test]
    fn test_lookup_labels() {
        assert_eq!(lookup(1).unwrap().label, "I'm 5");
        assert_eq!(lookup(2).unwrap().label, "Middle School");
        assert_eq!(lookup(3).unwrap().label, "High School");
        assert_eq!(lookup(4).unwrap().label, "College");
        assert_eq!(lookup(5).unwrap().label, "Intern");
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert_eq!(lookup(0), Err(LevelError::OutOfRange(0)));
        assert_eq!(lookup(6), Err(LevelError::OutOfRange(6)));
        assert_eq!(lookup(-1), Err(LevelError::OutOfRange(-1)));
        assert_eq!(LevelError::OutOfRange(9).status_code(), 400);
    }

    #[test]
    fn test_prompt_for_level_one() {
        let prompt = build_prompt(lookup(1).unwrap(), "What is quantum computing?");
        assert_eq!(
            prompt,
            "Explain the following text like I'm 5 years old. Use very simple words and short sentences.\n\nText:\n'''\nWhat is quantum computing?\n'''"
        );
    }

    #[test]
    fn test_prompt_keeps_text_verbatim() {
        let text = "  <b>tags</b>, commas, 'quotes'\n\nand ''' fences  ";
        for level in all() {
            let prompt = build_prompt(level, text);
            assert!(prompt.starts_with(level.template));
            assert!(prompt.contains(text));
        }
    }

    #[test]
    fn test_prompt_with_empty_text() {
        let prompt = build_prompt(lookup(5).unwrap(), "");
        assert!(prompt.ends_with("Text:\n'''\n\n'''"));
    }
}
