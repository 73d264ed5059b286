//! Keyword extraction heuristics
//!
//! Each extractor is a pure function of the message text. Identifiers are
//! numbered densely per call, so the same text always yields the same ids.

use super::cues::{detect_decision_maker, detect_due, detect_owner};
use super::items::{
    ActionItem, Decision, DecisionStatus, ExtractionKind, ExtractionList, GapFlag, GapFlags, Issue,
    IssueStatus, Level, Risk, Severity,
};
use crate::util::{contains_phrase, sentences, truncate_str};

pub(crate) const ACTION_VERBS: &[&str] = &[
    "add",
    "create",
    "implement",
    "evaluate",
    "fix",
    "update",
    "review",
    "test",
    "deploy",
    "schedule",
    "send",
    "prepare",
];

const RISK_TABLE: &[(&str, Level, Level)] = &[
    ("timeline", Level::High, Level::High),
    ("deadline", Level::High, Level::High),
    ("blocked", Level::High, Level::High),
    ("urgent", Level::Medium, Level::High),
    ("threat", Level::High, Level::High),
    ("bug", Level::Medium, Level::Medium),
    ("issue", Level::Medium, Level::Medium),
    ("scope", Level::Medium, Level::Medium),
    ("capacity", Level::Medium, Level::High),
    ("dependency", Level::Medium, Level::Medium),
];

const ISSUE_KEYWORDS: &[&str] = &[
    "blocked", "down", "bug", "error", "problem", "issue", "broken", "outage", "failing",
];
const CRITICAL_ISSUE_KEYWORDS: &[&str] = &["down", "blocked", "broken", "outage"];

const DECISION_CUES: &[&str] = &[
    "should we",
    "can we",
    "decide",
    "prioritize",
    "choose",
    "approve",
    "whether",
];

const DESCRIPTION_LIMIT: usize = 120;

/// Run the extractor for `kind` over `text`.
pub fn extract(kind: ExtractionKind, text: &str) -> ExtractionList {
    match kind {
        ExtractionKind::ActionItems => ExtractionList::ActionItems(extract_action_items(text)),
        ExtractionKind::Risks => ExtractionList::Risks(extract_risks(text)),
        ExtractionKind::Issues => ExtractionList::Issues(extract_issues(text)),
        ExtractionKind::Decisions => ExtractionList::Decisions(extract_decisions(text)),
    }
}

fn describe(sentence: &str) -> String {
    let trimmed = sentence.trim().trim_end_matches(['.', '!', '?']).trim();
    if trimmed.len() > DESCRIPTION_LIMIT {
        format!("{}...", truncate_str(trimmed, DESCRIPTION_LIMIT))
    } else {
        trimmed.to_string()
    }
}

fn words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Whether `word` is `base` or one of its regular inflections.
fn is_word_form(word: &str, base: &str) -> bool {
    if word == base {
        return true;
    }
    if let Some(rest) = word.strip_prefix(base) {
        if matches!(rest, "s" | "es" | "ed" | "d" | "ing") {
            return true;
        }
        // doubled final consonant: "planned"
        if let Some(last) = base.chars().last()
            && let Some(tail) = rest.strip_prefix(last)
            && matches!(tail, "ed" | "ing")
        {
            return true;
        }
    }
    // silent e: "updating"
    base.strip_suffix('e')
        .and_then(|stem| word.strip_prefix(stem))
        .is_some_and(|rest| rest == "ing")
}

fn contains_word_form(sentence: &str, base: &str) -> bool {
    words(sentence).any(|word| is_word_form(&word, base))
}

fn flags_where(conditions: &[(bool, GapFlag)]) -> GapFlags {
    conditions
        .iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, flag)| *flag)
        .collect()
}

/// One action item per sentence containing an action verb.
///
/// Text without any action verb yields a single follow-up item whose cues
/// are taken from the whole text.
pub fn extract_action_items(text: &str) -> Vec<ActionItem> {
    let build = |ordinal: usize, description: String, scope: &str| {
        let owner = detect_owner(scope);
        let due = detect_due(scope);
        let flags = flags_where(&[
            (owner.is_none(), GapFlag::MissingOwner),
            (due.is_none(), GapFlag::MissingDueDate),
        ]);
        ActionItem {
            id: ExtractionKind::ActionItems.item_id(ordinal),
            description,
            owner,
            due,
            flags,
        }
    };

    let items: Vec<ActionItem> = sentences(text)
        .into_iter()
        .filter(|sentence| {
            ACTION_VERBS
                .iter()
                .any(|verb| contains_word_form(sentence, verb))
        })
        .enumerate()
        .map(|(index, sentence)| build(index + 1, describe(sentence), sentence))
        .collect();

    if items.is_empty() {
        vec![build(1, "Follow up on message content".to_string(), text)]
    } else {
        items
    }
}

/// One risk per keyword of the risk table present in the text.
pub fn extract_risks(text: &str) -> Vec<Risk> {
    let sentences = sentences(text);
    let mut risks = Vec::new();
    for (keyword, likelihood, impact) in RISK_TABLE {
        let Some(sentence) = sentences
            .iter()
            .find(|s| contains_phrase(&s.to_lowercase(), keyword))
        else {
            continue;
        };
        let owner = detect_owner(sentence);
        risks.push(Risk {
            id: ExtractionKind::Risks.item_id(risks.len() + 1),
            description: format!("{} concern: {}", capitalize(keyword), describe(sentence)),
            likelihood: *likelihood,
            impact: *impact,
            flags: flags_where(&[(owner.is_none(), GapFlag::MissingOwner)]),
            owner,
        });
    }

    if risks.is_empty() {
        risks.push(Risk {
            id: ExtractionKind::Risks.item_id(1),
            description: "Potential communication gap or unclear requirements".to_string(),
            likelihood: Level::Low,
            impact: Level::Medium,
            owner: None,
            flags: [GapFlag::MissingOwner].into(),
        });
    }
    risks
}

/// One issue per sentence carrying an issue keyword; empty when none.
pub fn extract_issues(text: &str) -> Vec<Issue> {
    sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let hits: Vec<&str> = ISSUE_KEYWORDS
                .iter()
                .copied()
                .filter(|keyword| contains_word_form(sentence, keyword))
                .collect();
            let first = *hits.first()?;
            let severity = if hits.iter().any(|k| CRITICAL_ISSUE_KEYWORDS.contains(k)) {
                Severity::Critical
            } else {
                Severity::High
            };
            Some((first, severity, sentence))
        })
        .enumerate()
        .map(|(index, (keyword, severity, sentence))| {
            let owner = detect_owner(sentence);
            Issue {
                id: ExtractionKind::Issues.item_id(index + 1),
                description: format!("{} identified: {}", capitalize(keyword), describe(sentence)),
                severity,
                status: IssueStatus::Open,
                flags: flags_where(&[(owner.is_none(), GapFlag::MissingOwner)]),
                owner,
            }
        })
        .collect()
}

/// One pending decision per sentence carrying a decision cue; empty when none.
pub fn extract_decisions(text: &str) -> Vec<Decision> {
    sentences(text)
        .into_iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            DECISION_CUES.iter().any(|cue| contains_phrase(&lower, cue))
        })
        .enumerate()
        .map(|(index, sentence)| {
            let decision_maker = detect_decision_maker(sentence);
            Decision {
                id: ExtractionKind::Decisions.item_id(index + 1),
                description: format!("Decision needed: {}", describe(sentence)),
                status: DecisionStatus::Pending,
                flags: flags_where(&[(
                    decision_maker.is_none(),
                    GapFlag::MissingDecisionMaker,
                )]),
                decision_maker,
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_forms() {
        assert!(is_word_form("add", "add"));
        assert!(is_word_form("adds", "add"));
        assert!(is_word_form("added", "add"));
        assert!(is_word_form("fixes", "fix"));
        assert!(is_word_form("updating", "update"));
        assert!(is_word_form("updated", "update"));
        assert!(is_word_form("planned", "plan"));
        assert!(!is_word_form("address", "add"));
        assert!(!is_word_form("testimony", "test"));
        assert!(!is_word_form("padding", "add"));
    }

    #[test]
    fn test_action_items_per_sentence() {
        let items = extract_action_items(
            "Alex will fix the login bug by Friday. Someone should review the API docs.",
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "AI-001");
        assert_eq!(items[0].description, "Alex will fix the login bug by Friday");
        assert_eq!(items[0].owner.as_deref(), Some("Alex"));
        assert_eq!(items[0].due.as_deref(), Some("by Friday"));
        assert!(items[0].flags.is_empty());
        assert_eq!(items[1].id, "AI-002");
        assert_eq!(
            items[1].flags,
            [GapFlag::MissingOwner, GapFlag::MissingDueDate].into()
        );
    }

    #[test]
    fn test_action_item_fallback() {
        let items = extract_action_items("What's the status of the authentication feature?");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "AI-001");
        assert_eq!(items[0].description, "Follow up on message content");
        assert!(items[0].flags.contains(&GapFlag::MissingOwner));
        assert!(items[0].flags.contains(&GapFlag::MissingDueDate));
    }

    #[test]
    fn test_sso_request_due_date_detected() {
        let items = extract_action_items("Can we add SSO integration before the December release?");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].due.as_deref(), Some("before the December"));
        assert_eq!(items[0].flags, [GapFlag::MissingOwner].into());
    }

    #[test]
    fn test_gap_flags_follow_cues() {
        let corpus = [
            ("Please review the deck.", false, false),
            ("Review the deck by Monday.", false, true),
            ("@sam please review the deck.", true, false),
            ("Priya will deploy the hotfix tomorrow.", true, true),
            ("Update the roadmap before Q2.", false, true),
            ("Send the notes to the team.", false, false),
            ("Deploy to staging by Friday.", false, true),
            ("Send to the client tomorrow.", false, true),
            ("Try to fix the login bug.", false, false),
        ];
        for (text, has_owner, has_due) in corpus {
            let items = extract_action_items(text);
            assert_eq!(items.len(), 1, "{text}");
            let flags = &items[0].flags;
            assert_eq!(!flags.contains(&GapFlag::MissingOwner), has_owner, "{text}");
            assert_eq!(!flags.contains(&GapFlag::MissingDueDate), has_due, "{text}");
        }
    }

    #[test]
    fn test_risks_table_order() {
        let risks = extract_risks("The deadline is tight. There is a bug in the timeline view.");
        let descriptions: Vec<&str> = risks.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(risks.len(), 3);
        assert!(descriptions[0].starts_with("Timeline concern"));
        assert!(descriptions[1].starts_with("Deadline concern"));
        assert!(descriptions[2].starts_with("Bug concern"));
        assert_eq!(risks[0].likelihood, Level::High);
        assert_eq!(risks[2].impact, Level::Medium);
        assert_eq!(risks[2].id, "RISK-003");
    }

    #[test]
    fn test_risks_fallback() {
        let risks = extract_risks("Thanks for the help!");
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].likelihood, Level::Low);
        assert_eq!(risks[0].impact, Level::Medium);
        assert!(risks[0].flags.contains(&GapFlag::MissingOwner));
    }

    #[test]
    fn test_issues() {
        let issues = extract_issues(
            "Checkout is down for EU users. There is an error in the export. All good otherwise.",
        );
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].description, "Down identified: Checkout is down for EU users");
        assert_eq!(issues[1].severity, Severity::High);
        assert_eq!(issues[1].status, IssueStatus::Open);
        assert!(extract_issues("We downloaded the file.").is_empty());
        assert!(extract_issues("Everything is fine.").is_empty());
    }

    #[test]
    fn test_decisions() {
        let decisions = extract_decisions(
            "Should we prioritize mobile? Need approval from Dana on whether to ship.",
        );
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].id, "DEC-001");
        assert_eq!(decisions[0].flags, [GapFlag::MissingDecisionMaker].into());
        assert_eq!(decisions[1].decision_maker.as_deref(), Some("Dana"));
        assert!(decisions[1].flags.is_empty());
        assert!(extract_decisions("Thanks!").is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Can we add SSO? The timeline is at risk. Alex will review it.";
        for kind in ExtractionKind::ALL {
            assert_eq!(extract(kind, text), extract(kind, text));
        }
    }
}
