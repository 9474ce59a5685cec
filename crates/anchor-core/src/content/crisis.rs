//! Crisis resources shown on the safety screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisLine {
    pub name: &'static str,
    pub number: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportSite {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SAFETY_MESSAGE: &str = "I'm really sorry you're feeling this way. I can't provide the help you need right now, but there are people who can support you immediately.";

pub const CRISIS_LINES: &[CrisisLine] = &[
    CrisisLine {
        name: "Lifeline (24/7)",
        number: "13 11 14",
    },
    CrisisLine {
        name: "Suicide Call Back",
        number: "1300 659 467",
    },
    CrisisLine {
        name: "Emergency",
        number: "000",
    },
];

pub const GROUNDING_PROMPT: &str = "While you reach out for help, try to take a deep breath. Name 3 things you can see around you right now.";

pub const SUPPORT_SITES: &[SupportSite] = &[
    SupportSite {
        name: "Lifeline Australia",
        url: "https://www.lifeline.org.au",
    },
    SupportSite {
        name: "Beyond Blue",
        url: "https://www.beyondblue.org.au",
    },
    SupportSite {
        name: "Suicide Call Back Service",
        url: "https://www.suicidecallbackservice.org.au",
    },
];
