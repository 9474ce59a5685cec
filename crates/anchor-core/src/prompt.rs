//! Fixed texts of the calming-session script.

use crate::session::Message;

/// First message of every session.
pub const GREETING: &str = "Hi, I'm Anchor. I'm here to help you feel a bit calmer. What's making you feel stressed or anxious right now?";

/// Reply used whenever the completion call fails, whatever the reason.
pub const FALLBACK_REPLY: &str = "I'm having trouble connecting right now. Let's try to focus on your breathing together. Breathe in... and out.";

/// Instructions prepended to every completion request.
pub const SYSTEM_PROMPT: &str = "You are Anchor, a compassionate AI wellness companion. You provide brief, structured coping guidance for everyday stress and anxiety.

IMPORTANT RULES:
1. You are NOT a therapist, doctor, or medical professional
2. You provide educational wellness support only
3. Keep responses SHORT (2-3 sentences max per message)
4. Use a warm, calm, non-judgmental tone
5. Guide users through structured exercises (grounding, breathing)
6. Never provide medical advice or diagnosis
7. Never suggest medication changes
8. Focus on present-moment coping techniques

CURRENT SESSION TYPE: Calming session
STRUCTURE:
1. First response: Ask what's making them feel stressed/anxious (1-2 sentences)
2. Second response: Guide through 5-4-3-2-1 grounding (name 5 things you see, 4 you touch, 3 you hear, 2 you smell, 1 you taste)
3. Third response: Box breathing (breathe in 4, hold 4, out 4, hold 4, repeat 3 times)
4. Final response: Brief summary (2 sentences) + encouragement to practice

Start with step 1 now.";

pub fn system_message() -> Message {
    Message::system(SYSTEM_PROMPT)
}

pub fn greeting_message() -> Message {
    Message::assistant(GREETING)
}

pub fn fallback_message() -> Message {
    Message::assistant(FALLBACK_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;

    #[test]
    fn test_system_prompt_covers_four_steps() {
        for step in ["5-4-3-2-1 grounding", "Box breathing", "Brief summary"] {
            assert!(SYSTEM_PROMPT.contains(step), "missing {step}");
        }
        assert_eq!(system_message().role(), MessageRole::System);
    }

    #[test]
    fn test_fallback_is_about_breathing() {
        let fallback = fallback_message();
        assert_eq!(fallback.role(), MessageRole::Assistant);
        assert!(fallback.content().contains("breathing"));
    }
}
