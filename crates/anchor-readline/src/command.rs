//! Parsing of REPL input lines.

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/start",
    "/end",
    "/exit-safety",
    "/new",
    "/resume",
    "/history",
    "/help",
    "/quit",
];

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    End,
    ExitSafety,
    New,
    Resume,
    History,
    Help,
    Quit,
    /// Free text for the companion.
    Say(String),
    Unknown(String),
}

impl Command {
    /// Parses a line; `None` for blank input.
    ///
    /// While `conversing`, only slash forms are commands, so a bare `quit`
    /// or `?` is sent to the companion as text.
    pub fn parse(line: &str, conversing: bool) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let command = match trimmed {
            "/quit" | "/exit" => Command::Quit,
            "quit" | "exit" if !conversing => Command::Quit,
            "?" if !conversing => Command::Help,
            "/start" => Command::Start,
            "/end" => Command::End,
            "/exit-safety" => Command::ExitSafety,
            "/new" => Command::New,
            "/resume" => Command::Resume,
            "/history" => Command::History,
            "/help" => Command::Help,
            other if other.starts_with('/') => Command::Unknown(other.to_string()),
            other => Command::Say(other.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_ignored() {
        assert_eq!(Command::parse("", false), None);
        assert_eq!(Command::parse("   \t ", false), None);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(Command::parse("/start", false), Some(Command::Start));
        assert_eq!(Command::parse(" /end ", false), Some(Command::End));
        assert_eq!(Command::parse("/exit-safety", false), Some(Command::ExitSafety));
        assert_eq!(Command::parse("/new", false), Some(Command::New));
        assert_eq!(Command::parse("/resume", false), Some(Command::Resume));
        assert_eq!(Command::parse("/history", false), Some(Command::History));
        assert_eq!(Command::parse("?", false), Some(Command::Help));
    }

    #[test]
    fn test_quit_aliases() {
        for line in ["quit", "exit", "/quit", "/exit"] {
            assert_eq!(Command::parse(line, false), Some(Command::Quit));
        }
    }

    #[test]
    fn test_bare_words_are_text_while_conversing() {
        for word in ["quit", "exit", "?"] {
            assert_eq!(
                Command::parse(word, true),
                Some(Command::Say(word.into()))
            );
        }
        assert_eq!(Command::parse("/quit", true), Some(Command::Quit));
        assert_eq!(Command::parse("/help", true), Some(Command::Help));
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(
            Command::parse("  I'm stressed about work \n", false),
            Some(Command::Say("I'm stressed about work".into()))
        );
    }

    #[test]
    fn test_unknown_slash_command() {
        assert_eq!(
            Command::parse("/breathe", false),
            Some(Command::Unknown("/breathe".into()))
        );
    }

    #[test]
    fn test_every_completion_candidate_parses() {
        for name in COMMANDS {
            assert!(!matches!(
                Command::parse(name, false),
                Some(Command::Unknown(_)) | None
            ));
        }
    }
}
