//! System prompts for the direct (non-agent) chat path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const TUTOR_BASE: &str = "You are Professor Jarvis, an expert educational AI tutor.";

/// How a direct chat message should be answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Normal,
    Coding,
    Quiz,
    Eli5,
    Flashcard,
    Tutor,
}

impl ChatMode {
    pub const ALL: [ChatMode; 6] = [
        ChatMode::Normal,
        ChatMode::Coding,
        ChatMode::Quiz,
        ChatMode::Eli5,
        ChatMode::Flashcard,
        ChatMode::Tutor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Normal => "normal",
            ChatMode::Coding => "coding",
            ChatMode::Quiz => "quiz",
            ChatMode::Eli5 => "eli5",
            ChatMode::Flashcard => "flashcard",
            ChatMode::Tutor => "tutor",
        }
    }

    /// Build the system prompt for `message`.
    ///
    /// `current_time` is only used by [`ChatMode::Normal`].
    pub fn system_prompt(self, message: &str, current_time: &str) -> String {
        match self {
            ChatMode::Normal => format!(
                "You are Jarvis, an advanced AI assistant specializing in coding, education, and general knowledge.\n\n\
                 {current_time}\n\n\
                 Be helpful, concise, and accurate."
            ),
            ChatMode::Coding => format!(
                "You are Jarvis, an expert programming assistant.\nTask: {message}\nProvide clean, documented code."
            ),
            ChatMode::Quiz => format!(
                "{TUTOR_BASE}\nMODE: QUIZ\nGenerate 3-5 multiple choice questions on: {message}"
            ),
            ChatMode::Eli5 => format!("{TUTOR_BASE}\nMODE: ELI5\nExplain simply: {message}"),
            ChatMode::Flashcard => {
                format!("{TUTOR_BASE}\nMODE: FLASHCARDS\nGenerate terms for: {message}")
            }
            ChatMode::Tutor => format!("{TUTOR_BASE}\nMODE: TUTOR\nGuide the user on: {message}"),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown mode names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = ChatMode::ALL.iter().map(|m| m.as_str()).collect();
        write!(f, "unknown chat mode '{}' (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for ChatMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ChatMode::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!("quiz".parse::<ChatMode>().unwrap(), ChatMode::Quiz);
        assert_eq!(" ELI5 ".parse::<ChatMode>().unwrap(), ChatMode::Eli5);
        for mode in ChatMode::ALL {
            assert_eq!(mode.to_string().parse::<ChatMode>().unwrap(), mode);
        }
        let err = "poetry".parse::<ChatMode>().unwrap_err();
        assert!(err.to_string().contains("expected one of: normal, coding"));
    }

    #[test]
    fn coding_prompt_embeds_task() {
        assert_eq!(
            ChatMode::Coding.system_prompt("reverse a list", ""),
            "You are Jarvis, an expert programming assistant.\nTask: reverse a list\nProvide clean, documented code."
        );
    }

    #[test]
    fn educational_modes_share_the_tutor_persona() {
        for (mode, marker) in [
            (ChatMode::Quiz, "MODE: QUIZ\nGenerate 3-5 multiple choice questions on: rust"),
            (ChatMode::Eli5, "MODE: ELI5\nExplain simply: rust"),
            (ChatMode::Flashcard, "MODE: FLASHCARDS\nGenerate terms for: rust"),
            (ChatMode::Tutor, "MODE: TUTOR\nGuide the user on: rust"),
        ] {
            let prompt = mode.system_prompt("rust", "");
            assert!(prompt.starts_with(TUTOR_BASE), "{mode}");
            assert!(prompt.ends_with(marker), "{mode}");
        }
    }

    #[test]
    fn normal_prompt_carries_time() {
        let prompt = ChatMode::Normal.system_prompt("xyzzy", "Current date and time: 2026-01-01");
        assert!(prompt.contains("\n\nCurrent date and time: 2026-01-01\n\n"));
        assert!(!prompt.contains("xyzzy"));
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(ChatMode::default(), ChatMode::Normal);
    }
}
