// WHY: closed set of user-selectable operations; dispatch to the pure core lives here
// so the buffer controller never matches on individual filters

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::normalizer::{fix_spacing, launder_all, smart_debreak, strip_formatting, to_sentence_case};

/// Operation selected by the user
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleanAction {
    SmartDebreak,
    StripFormatting,
    FixSpacing,
    SentenceCase,
    LaunderAll,
    AiPolish,
    AiSummarize,
}

impl CleanAction {
    pub const ALL: [CleanAction; 7] = [
        CleanAction::SmartDebreak,
        CleanAction::StripFormatting,
        CleanAction::FixSpacing,
        CleanAction::SentenceCase,
        CleanAction::LaunderAll,
        CleanAction::AiPolish,
        CleanAction::AiSummarize,
    ];

    /// True for actions served by the external completion collaborator
    pub fn is_ai(self) -> bool {
        matches!(self, CleanAction::AiPolish | CleanAction::AiSummarize)
    }

    /// Run a local filter; `None` for AI actions
    pub fn apply(self, text: &str) -> Option<String> {
        let result = match self {
            CleanAction::SmartDebreak => smart_debreak(text),
            CleanAction::StripFormatting => strip_formatting(text),
            CleanAction::FixSpacing => fix_spacing(text),
            CleanAction::SentenceCase => to_sentence_case(text),
            CleanAction::LaunderAll => launder_all(text),
            CleanAction::AiPolish | CleanAction::AiSummarize => return None,
        };
        Some(result)
    }

    /// Notice shown after the action succeeds
    pub fn success_message(self) -> &'static str {
        match self {
            CleanAction::SmartDebreak => "Lines de-broken successfully.",
            CleanAction::StripFormatting => "Formatting stripped.",
            CleanAction::FixSpacing => "Whitespace normalized.",
            CleanAction::SentenceCase => "Converted to sentence case.",
            CleanAction::LaunderAll => "Full cycle complete.",
            CleanAction::AiPolish => "AI Polish complete.",
            CleanAction::AiSummarize => "AI Summary complete.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_actions_dispatch_to_core() {
        let text = "  exam-\nple **x**  ";
        assert_eq!(CleanAction::SmartDebreak.apply(text), Some(smart_debreak(text)));
        assert_eq!(CleanAction::StripFormatting.apply(text), Some(strip_formatting(text)));
        assert_eq!(CleanAction::FixSpacing.apply(text), Some(fix_spacing(text)));
        assert_eq!(CleanAction::SentenceCase.apply(text), Some(to_sentence_case(text)));
        assert_eq!(CleanAction::LaunderAll.apply(text), Some("example x".to_string()));
    }

    #[test]
    fn test_ai_actions_do_not_run_locally() {
        for action in CleanAction::ALL {
            assert_eq!(action.apply("text").is_none(), action.is_ai(), "{action:?}");
        }
    }

    #[test]
    fn test_serde_names_match_action_identifiers() {
        let json = serde_json::to_string(&CleanAction::SmartDebreak).unwrap();
        assert_eq!(json, "\"SMART_DEBREAK\"");
        let parsed: CleanAction = serde_json::from_str("\"AI_SUMMARIZE\"").unwrap();
        assert_eq!(parsed, CleanAction::AiSummarize);
    }

    #[test]
    fn test_cli_names_are_kebab_case() {
        let parsed = CleanAction::from_str("launder-all", true).unwrap();
        assert_eq!(parsed, CleanAction::LaunderAll);
    }
}
