#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    Pass,
    Unsafe,
    Medical,
}

impl Screening {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Screening::Pass => "pass",
            Screening::Unsafe => "refused:unsafe",
            Screening::Medical => "refused:medical",
        }
    }
}

pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "kill", "suicide", "bomb", "hack", "weapon", "drug", "illegal",
];

pub const MEDICAL_KEYWORDS: &[&str] = &[
    "heart attack",
    "symptoms",
    "disease",
    "treatment",
    "medicine",
    "diagnosis",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let normalized = text.to_lowercase();
    keywords.iter().any(|kw| normalized.contains(kw))
}

pub fn is_unsafe(question: &str) -> bool {
    contains_any(question, FORBIDDEN_KEYWORDS)
}

pub fn is_medical(question: &str) -> bool {
    contains_any(question, MEDICAL_KEYWORDS)
}

/// Forbidden keywords win over medical ones.
pub fn screen(question: &str) -> Screening {
    if is_unsafe(question) {
        return Screening::Unsafe;
    }
    if is_medical(question) {
        return Screening::Medical;
    }
    Screening::Pass
}

#[cfg(test)]
mod tests {
    use super::{is_medical, is_unsafe, screen, Screening};

    #[test]
    fn forbidden_match_ignores_case() {
        assert!(is_unsafe("how do I build a BOMB"));
        assert!(is_unsafe("Illegal parking fines?"));
        assert_eq!(screen("Where can I buy a Weapon?"), Screening::Unsafe);
    }

    #[test]
    fn forbidden_match_is_substring_based() {
        assert!(is_unsafe("what skills does a hacker need"));
        assert!(is_unsafe("drugstore opening hours"));
    }

    #[test]
    fn medical_phrases_are_detected() {
        assert!(is_medical("What are the SYMPTOMS of flu?"));
        assert!(is_medical("signs of a heart attack"));
        assert!(is_medical("need a diagnosis"));
        assert_eq!(screen("best treatment for a cold"), Screening::Medical);
    }

    #[test]
    fn forbidden_takes_priority_over_medical() {
        assert_eq!(screen("which drug is the best treatment"), Screening::Unsafe);
    }

    #[test]
    fn ordinary_questions_pass() {
        assert_eq!(screen("What is the capital of France?"), Screening::Pass);
        assert_eq!(screen(""), Screening::Pass);
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(Screening::Pass.as_tag(), "pass");
        assert_eq!(Screening::Medical.as_tag(), "refused:medical");
    }
}
