//! Owner, due-date and decision-maker cues
//!
//! Every detector works on a single sentence and returns the matched text,
//! or `None` when the sentence carries no cue.

use super::extraction::ACTION_VERBS;
use regex::Regex;
use std::sync::LazyLock;

/// Capitalized words that look like names but never are.
const NOT_A_NAME: &[&str] = &[
    "I", "We", "You", "They", "He", "She", "It", "This", "That", "These", "Those", "There",
    "Someone", "Somebody", "Anyone", "Everyone", "Nobody", "Who", "What", "Which", "When", "Where",
    "Why", "How", "Please", "Need", "Needs", "Want", "Plan", "Planning", "Going", "Time", "Team",
    "Ready", "Also", "Then", "Now", "Next", "Remember", "Let", "Let's", "Just", "Still", "Be",
    "Due", "Ok", "Okay", "Yes", "No", "Hi", "Hello", "Thanks", "The", "A", "An", "And", "But",
    "So", "If", "Or",
];

/// Imperative sentence openers, matched case-insensitively alongside the action verbs.
const IMPERATIVE_OPENERS: &[&str] = &[
    "try", "move", "happy", "able", "make", "get", "set", "ship", "finish", "start", "remind",
    "ask", "reach", "go", "write", "check", "push", "merge", "share", "book", "draft", "reply",
    "forward", "escalate", "assign", "sync", "confirm", "follow",
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid cue pattern {pattern:?}: {e}"))
}

static MENTION: LazyLock<Regex> = LazyLock::new(|| compile(r"@([A-Za-z][\w.-]*)"));

static ASSIGNED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i:assigned to|owner\s*:|owned by)\s*([A-Z][\w'-]*)"));

static NAME_WILL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b([A-Z][a-z][\w'-]*)\s+(?:will|to|can|should|is going to)\s+[a-z]")
});

static NAME_PLEASE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b([A-Z][a-z][\w'-]*),\s*(?i:can you|could you|please)"));

static DUE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)\b(?:by|before|due|until|on)\s+(?:the\s+|this\s+|next\s+)?",
        r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday",
        r"|jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?",
        r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?",
        r"|tomorrow|today|tonight|eod|eow|end of (?:the )?\w+|week|month|sprint",
        r"|\d{1,2}/\d{1,2}(?:/\d{2,4})?|q[1-4])\b",
    ))
});

static DUE_BARE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\b(?:tomorrow|eod|asap)\b"));

static DECIDER: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"\b([A-Z][a-z][\w'-]*)\s+",
        r"(?:to decide|to approve|decides|approves|signs off|will decide|will approve)\b",
    ))
});

static APPROVAL_FROM: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i:approval from|sign-off from|signoff from)\s+([A-Z][\w'-]*)")
});

fn is_name(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    !NOT_A_NAME.contains(&candidate)
        && !ACTION_VERBS.contains(&lower.as_str())
        && !IMPERATIVE_OPENERS.contains(&lower.as_str())
}

/// First capture group of the first match whose capture passes `is_name`.
fn named_capture(regex: &Regex, sentence: &str) -> Option<String> {
    regex
        .captures_iter(sentence)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', '-', '\'']))
        .find(|name| is_name(name))
        .map(str::to_string)
}

/// Detect the owner of the work described in `sentence`.
pub fn detect_owner(sentence: &str) -> Option<String> {
    named_capture(&MENTION, sentence)
        .or_else(|| named_capture(&ASSIGNED, sentence))
        .or_else(|| named_capture(&NAME_PLEASE, sentence))
        .or_else(|| named_capture(&NAME_WILL, sentence))
}

/// Detect a due-date phrase such as `by Friday` or `before the December`.
pub fn detect_due(sentence: &str) -> Option<String> {
    [&*DUE_PHRASE, &*DUE_BARE]
        .into_iter()
        .find_map(|regex| regex.find(sentence))
        .map(|m| m.as_str().to_string())
}

/// Detect who makes the decision described in `sentence`.
pub fn detect_decision_maker(sentence: &str) -> Option<String> {
    named_capture(&APPROVAL_FROM, sentence).or_else(|| named_capture(&DECIDER, sentence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in [
            &MENTION,
            &ASSIGNED,
            &NAME_WILL,
            &NAME_PLEASE,
            &DUE_PHRASE,
            &DUE_BARE,
            &DECIDER,
            &APPROVAL_FROM,
        ] {
            LazyLock::force(pattern);
        }
    }

    #[test]
    fn test_owner_cues() {
        assert_eq!(detect_owner("@maria please review the PR"), Some("maria".to_string()));
        assert_eq!(
            detect_owner("Login fix assigned to Priya."),
            Some("Priya".to_string())
        );
        assert_eq!(
            detect_owner("Owner: Tom for the migration"),
            Some("Tom".to_string())
        );
        assert_eq!(
            detect_owner("Alex will fix the login bug"),
            Some("Alex".to_string())
        );
        assert_eq!(
            detect_owner("Jordan, can you update the docs?"),
            Some("Jordan".to_string())
        );
    }

    #[test]
    fn test_owner_rejects_pronouns() {
        assert_eq!(detect_owner("We will fix the login bug"), None);
        assert_eq!(detect_owner("Someone should review this"), None);
        assert_eq!(detect_owner("Can we add SSO integration?"), None);
        assert_eq!(detect_owner("Need to deploy the patch"), None);
    }

    #[test]
    fn test_owner_rejects_imperative_verbs() {
        assert_eq!(detect_owner("Deploy to staging by Friday."), None);
        assert_eq!(detect_owner("Send to the client tomorrow."), None);
        assert_eq!(detect_owner("Add to the release checklist."), None);
        assert_eq!(detect_owner("Try to fix the login bug."), None);
        assert_eq!(
            detect_owner("Deploy to staging, Priya will verify it."),
            Some("Priya".to_string())
        );
    }

    #[test]
    fn test_due_cues() {
        assert_eq!(detect_due("Ship it by Friday"), Some("by Friday".to_string()));
        assert_eq!(
            detect_due("Can we add SSO before the December release?"),
            Some("before the December".to_string())
        );
        assert_eq!(detect_due("due 12/15 at the latest"), Some("due 12/15".to_string()));
        assert_eq!(detect_due("finish by end of sprint"), Some("by end of sprint".to_string()));
        assert_eq!(detect_due("land it by next week"), Some("by next week".to_string()));
        assert_eq!(detect_due("need this ASAP"), Some("ASAP".to_string()));
        assert_eq!(detect_due("target Q3 launch by Q3"), Some("by Q3".to_string()));
        assert_eq!(detect_due("review the design"), None);
        assert_eq!(detect_due("depends on the vendor"), None);
    }

    #[test]
    fn test_decision_maker_cues() {
        assert_eq!(
            detect_decision_maker("Need approval from Dana before we start"),
            Some("Dana".to_string())
        );
        assert_eq!(
            detect_decision_maker("Morgan to decide between the vendors"),
            Some("Morgan".to_string())
        );
        assert_eq!(detect_decision_maker("Should we prioritize mobile?"), None);
    }
}
