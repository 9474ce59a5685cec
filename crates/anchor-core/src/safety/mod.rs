//! Safety interception for user input.
//!
//! Every candidate message goes through a [`RiskClassifier`] before it is
//! appended to the log or sent upstream. The shipped classifier is a plain
//! case-insensitive phrase matcher: any hit counts, surrounding context is
//! ignored.

/// Outcome of checking one candidate message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub safe: bool,
    /// The phrase that matched, when unsafe.
    pub trigger: Option<String>,
}

impl SafetyVerdict {
    pub fn safe() -> Self {
        Self {
            safe: true,
            trigger: None,
        }
    }

    pub fn unsafe_with(trigger: impl Into<String>) -> Self {
        Self {
            safe: false,
            trigger: Some(trigger.into()),
        }
    }
}

/// Phrases that divert a conversation to the crisis screen, in match order.
pub const RISK_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "want to die",
    "harm myself",
    "hurt myself",
    "cut myself",
    "better off dead",
    "no reason to live",
    "have a plan",
    "going to do it",
    "not worth living",
];

/// Decides whether a user message may enter the conversation.
///
/// Implementations must be pure and synchronous.
pub trait RiskClassifier: Send + Sync {
    fn check(&self, candidate: &str) -> SafetyVerdict;
}

/// Literal substring matcher over an ordered phrase list. First match wins.
#[derive(Debug, Clone)]
pub struct KeywordRiskClassifier {
    phrases: Vec<String>,
}

impl KeywordRiskClassifier {
    /// Builds a classifier over custom phrases. Phrases are lowercased once here.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for KeywordRiskClassifier {
    fn default() -> Self {
        Self::new(RISK_PHRASES.iter().copied())
    }
}

impl RiskClassifier for KeywordRiskClassifier {
    fn check(&self, candidate: &str) -> SafetyVerdict {
        let lowered = candidate.to_lowercase();

        match self.phrases.iter().find(|p| lowered.contains(p.as_str())) {
            Some(phrase) => {
                tracing::warn!(trigger = %phrase, "Safety trigger detected");
                SafetyVerdict::unsafe_with(phrase.clone())
            }
            None => SafetyVerdict::safe(),
        }
    }
}

/// Checks `candidate` against the built-in phrase list.
pub fn check_safety(candidate: &str) -> SafetyVerdict {
    KeywordRiskClassifier::default().check(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_my_life_triggers() {
        let verdict = check_safety("I want to end my life");
        assert_eq!(verdict, SafetyVerdict::unsafe_with("end my life"));
    }

    #[test]
    fn test_every_phrase_matches_in_any_case() {
        for phrase in RISK_PHRASES {
            let shouted = format!("honestly {} right now", phrase.to_uppercase());
            let verdict = check_safety(&shouted);
            assert!(!verdict.safe, "'{phrase}' should be unsafe");
            assert_eq!(verdict.trigger.as_deref(), Some(*phrase));
        }
    }

    #[test]
    fn test_first_phrase_in_list_wins() {
        // "want to die" appears before "suicide" in the text, but later in the list
        let verdict = check_safety("I want to die, thinking about suicide");
        assert_eq!(verdict.trigger.as_deref(), Some("suicide"));
    }

    #[test]
    fn test_ordinary_stress_is_safe() {
        for text in [
            "I'm stressed about work",
            "My exam is tomorrow and I can't focus",
            "desk, lamp, window, mug, plant",
            "",
        ] {
            assert_eq!(check_safety(text), SafetyVerdict::safe(), "{text}");
        }
    }

    #[test]
    fn test_matches_inside_words() {
        // Conservative by design: substring hits count regardless of context
        let verdict = check_safety("We have a planning meeting");
        assert_eq!(verdict.trigger.as_deref(), Some("have a plan"));
    }

    #[test]
    fn test_custom_phrases_are_lowercased() {
        let classifier = KeywordRiskClassifier::new(["Panic Attack", ""]);
        assert_eq!(classifier.phrases(), ["panic attack"]);
        assert!(!classifier.check("having a PANIC ATTACK").safe);
        assert!(classifier.check("end my life").safe);
    }
}
