//! Terminal screens.

use anchor_core::content::{
    self, BEFORE_YOU_BEGIN, CRISIS_LINES, DISCLAIMER, GROUNDING_PROMPT, SAFETY_MESSAGE,
    SUPPORT_SITES,
};
use anchor_core::session::{ENCOURAGEMENT, Message, MessageRole, SessionSummary};
use anchor_core::store::HistoryEntry;
use colored::Colorize;

use crate::command::COMMANDS;

pub fn disclaimer() {
    println!("{}", "=== Before you begin ===".bright_magenta().bold());
    println!("{}", DISCLAIMER.bright_yellow());
    for note in BEFORE_YOU_BEGIN {
        println!("  {}", note);
    }
    println!();
}

pub fn home(has_saved_session: bool) {
    println!("{}", "=== Anchor ===".bright_magenta().bold());
    println!("{}", "A few minutes to feel a bit calmer.".bright_black());
    println!();
    println!("{} {}", "Tip of the day:".bright_green(), content::tip_of_the_day());
    println!();
    println!("{}", "Support".bright_black());
    for site in SUPPORT_SITES {
        println!("  {} {}", site.name, site.url.bright_black());
    }
    println!();
    if has_saved_session {
        println!(
            "{}",
            "An unfinished session was found. Type '/resume' to continue it.".yellow()
        );
    }
    println!(
        "{}",
        "Type '/start' to begin, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
}

pub fn help() {
    println!("{}", "Commands".bright_magenta());
    for name in COMMANDS {
        println!("  {:<14}{}", name, describe(name).bright_black());
    }
}

fn describe(command: &str) -> &'static str {
    match command {
        "/start" => "Begin a calming session",
        "/end" => "Finish the session and see its summary",
        "/exit-safety" => "Leave the support screen",
        "/new" => "Start another session after a summary",
        "/resume" => "Continue the unfinished session",
        "/history" => "List recent sessions",
        "/help" => "Show this list",
        "/quit" => "Leave Anchor",
        _ => "",
    }
}

pub fn message(message: &Message) {
    match message.role() {
        MessageRole::Assistant => {
            println!("{}", "[Anchor]".bright_magenta());
            for line in message.content().lines() {
                println!("{}", line.bright_blue());
            }
        }
        MessageRole::User => println!("{}", format!("> {}", message.content()).green()),
        MessageRole::System => {}
    }
    println!();
}

pub fn safety_screen() {
    println!();
    println!("{}", "=== You are not alone ===".bright_red().bold());
    println!("{}", SAFETY_MESSAGE);
    println!();
    for line in CRISIS_LINES {
        println!("  {:<20}{}", line.name, line.number.bright_white().bold());
    }
    println!();
    println!("{}", GROUNDING_PROMPT.bright_blue());
    println!();
    println!(
        "{}",
        "Type '/exit-safety' when you are ready to leave this screen.".bright_black()
    );
}

pub fn summary(summary: &SessionSummary) {
    println!();
    println!("{}", "=== Session complete ===".bright_magenta().bold());
    println!("{} {}", "Technique:".bright_green(), summary.technique);
    println!("{} {}", "Takeaway:".bright_green(), summary.takeaway);
    println!("{} {}", "Messages shared:".bright_green(), summary.message_count);
    println!();
    println!("{}", ENCOURAGEMENT.bright_blue());
    println!();
    println!(
        "{}",
        "Type '/new' to start another session or 'quit' to exit.".bright_black()
    );
}

pub fn history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No completed sessions yet.".bright_black());
        return;
    }

    println!("{}", "Recent sessions".bright_magenta());
    for entry in entries {
        println!("  {}", history_line(entry));
    }
}

fn history_line(entry: &HistoryEntry) -> String {
    let date = entry
        .completed_at
        .split('T')
        .next()
        .unwrap_or(&entry.completed_at);
    let noun = if entry.summary.message_count == 1 {
        "message"
    } else {
        "messages"
    };
    format!(
        "{}  {} ({} {})",
        date, entry.summary.technique, entry.summary.message_count, noun
    )
}

pub fn notice(text: &str) {
    println!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", format!("Error: {}", text).red());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: usize) -> HistoryEntry {
        HistoryEntry {
            id: "id-1".into(),
            completed_at: "2026-03-14T09:30:00+00:00".into(),
            summary: SessionSummary {
                technique: "Grounding and Breathing".into(),
                takeaway: "t".into(),
                message_count: count,
            },
        }
    }

    #[test]
    fn test_history_line_shows_date_and_count() {
        assert_eq!(
            history_line(&entry(4)),
            "2026-03-14  Grounding and Breathing (4 messages)"
        );
        assert_eq!(
            history_line(&entry(1)),
            "2026-03-14  Grounding and Breathing (1 message)"
        );
    }

    #[test]
    fn test_every_command_is_described() {
        for name in COMMANDS {
            assert!(!describe(name).is_empty(), "{name} has no description");
        }
    }
}
