//! Static wellbeing content shown around the conversation.

mod crisis;
mod tips;

pub use crisis::{
    CRISIS_LINES, CrisisLine, GROUNDING_PROMPT, SAFETY_MESSAGE, SUPPORT_SITES, SupportSite,
};
pub use tips::{TIPS, tip_for_day, tip_of_the_day};

/// Shown once, before the first session, until the user accepts it.
pub const DISCLAIMER: &str = "Anchor is an AI demo. Not for medical emergencies.";

/// Preparation notes shown with the disclaimer and on the home screen.
pub const BEFORE_YOU_BEGIN: &[&str] = &[
    "Find a quiet space.",
    "Take a deep breath.",
    "You are safe here.",
];
