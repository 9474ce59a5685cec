use chrono::{Datelike, Local};

pub const TIPS: &[&str] = &[
    "Take a deep breath and count to ten.",
    "Drink a glass of water to refresh your mind.",
    "Step outside and enjoy the fresh air.",
    "Write down three things you're grateful for.",
    "Stretch your body for five minutes.",
    "Listen to your favorite calming music.",
    "Close your eyes and visualize a peaceful place.",
    "Take a short walk to clear your mind.",
    "Practice box breathing: inhale for 4, hold for 4, exhale for 4, hold for 4.",
    "Read an inspiring quote or passage.",
    "Declutter your workspace for a fresh start.",
    "Smile at yourself in the mirror.",
    "Do a quick 5-minute meditation.",
    "Focus on naming 5 things you can see around you.",
    "Call a friend or loved one for a chat.",
    "Write down your thoughts in a journal.",
    "Light a candle or incense for a calming aroma.",
    "Repeat a positive affirmation to yourself.",
    "Plan one fun activity for the week ahead.",
    "Take a moment to appreciate your achievements.",
];

/// Tip for a given day of the month (1-31).
pub fn tip_for_day(day_of_month: u32) -> &'static str {
    TIPS[day_of_month as usize % TIPS.len()]
}

pub fn tip_of_the_day() -> &'static str {
    tip_for_day(Local::now().day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_rotation_wraps() {
        assert_eq!(TIPS.len(), 20);
        assert_eq!(tip_for_day(1), TIPS[1]);
        assert_eq!(tip_for_day(20), TIPS[0]);
        assert_eq!(tip_for_day(31), TIPS[11]);
    }
}
