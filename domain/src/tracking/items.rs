//! Extracted tracking items

use serde::Serialize;
use std::collections::BTreeSet;

/// Marker for a structurally expected field that could not be derived.
///
/// Flags are computed once at extraction time and are never back-filled
/// later in the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapFlag {
    MissingOwner,
    MissingDueDate,
    MissingDecisionMaker,
}

impl GapFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapFlag::MissingOwner => "MISSING_OWNER",
            GapFlag::MissingDueDate => "MISSING_DUE_DATE",
            GapFlag::MissingDecisionMaker => "MISSING_DECISION_MAKER",
        }
    }

    /// What has to be supplied to clear this flag
    pub fn needed_line(&self) -> &'static str {
        match self {
            GapFlag::MissingOwner => "Owners for the logged items",
            GapFlag::MissingDueDate => "Target dates for the logged action items",
            GapFlag::MissingDecisionMaker => "A decision maker for the pending decisions",
        }
    }
}

impl std::fmt::Display for GapFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type GapFlags = BTreeSet<GapFlag>;

/// Likelihood / impact rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::Medium => "MEDIUM",
            Level::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub owner: Option<String>,
    pub due: Option<String>,
    pub flags: GapFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Risk {
    pub id: String,
    pub description: String,
    pub likelihood: Level,
    pub impact: Level,
    pub owner: Option<String>,
    pub flags: GapFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub status: IssueStatus,
    pub owner: Option<String>,
    pub flags: GapFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub id: String,
    pub description: String,
    pub decision_maker: Option<String>,
    pub status: DecisionStatus,
    pub flags: GapFlags,
}

/// Which extraction produced a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    ActionItems,
    Risks,
    Issues,
    Decisions,
}

impl ExtractionKind {
    pub const ALL: [ExtractionKind; 4] = [
        ExtractionKind::ActionItems,
        ExtractionKind::Risks,
        ExtractionKind::Issues,
        ExtractionKind::Decisions,
    ];

    /// Identifier prefix for items of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            ExtractionKind::ActionItems => "AI",
            ExtractionKind::Risks => "RISK",
            ExtractionKind::Issues => "ISSUE",
            ExtractionKind::Decisions => "DEC",
        }
    }

    pub fn item_id(&self, ordinal: usize) -> String {
        format!("{}-{:03}", self.prefix(), ordinal)
    }

    /// Summary line used in answers, e.g. `3 risks flagged`.
    pub fn logged_line(&self, count: usize) -> String {
        match self {
            ExtractionKind::ActionItems => format!("{} action items logged", count),
            ExtractionKind::Risks => format!("{} risks flagged", count),
            ExtractionKind::Issues => format!("{} issues open", count),
            ExtractionKind::Decisions => format!("{} decisions pending", count),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExtractionKind::ActionItems => "Action Items",
            ExtractionKind::Risks => "Risks",
            ExtractionKind::Issues => "Issues",
            ExtractionKind::Decisions => "Decisions",
        }
    }
}

/// Output of one extraction agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ExtractionList {
    ActionItems(Vec<ActionItem>),
    Risks(Vec<Risk>),
    Issues(Vec<Issue>),
    Decisions(Vec<Decision>),
}

impl ExtractionList {
    pub fn kind(&self) -> ExtractionKind {
        match self {
            ExtractionList::ActionItems(_) => ExtractionKind::ActionItems,
            ExtractionList::Risks(_) => ExtractionKind::Risks,
            ExtractionList::Issues(_) => ExtractionKind::Issues,
            ExtractionList::Decisions(_) => ExtractionKind::Decisions,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ExtractionList::ActionItems(items) => items.len(),
            ExtractionList::Risks(items) => items.len(),
            ExtractionList::Issues(items) => items.len(),
            ExtractionList::Decisions(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            ExtractionList::ActionItems(items) => items.iter().map(|i| i.id.as_str()).collect(),
            ExtractionList::Risks(items) => items.iter().map(|i| i.id.as_str()).collect(),
            ExtractionList::Issues(items) => items.iter().map(|i| i.id.as_str()).collect(),
            ExtractionList::Decisions(items) => items.iter().map(|i| i.id.as_str()).collect(),
        }
    }

    /// Union of gap flags carried by the items
    pub fn flags(&self) -> GapFlags {
        let sets: Vec<&GapFlags> = match self {
            ExtractionList::ActionItems(items) => items.iter().map(|i| &i.flags).collect(),
            ExtractionList::Risks(items) => items.iter().map(|i| &i.flags).collect(),
            ExtractionList::Issues(items) => items.iter().map(|i| &i.flags).collect(),
            ExtractionList::Decisions(items) => items.iter().map(|i| &i.flags).collect(),
        };
        sets.into_iter().flatten().copied().collect()
    }

    /// Two display lines per item: the description and its fields.
    pub fn display_lines(&self) -> Vec<(String, String)> {
        fn or_unknown(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("?")
        }
        fn flag_list(flags: &GapFlags) -> String {
            if flags.is_empty() {
                String::new()
            } else {
                let names: Vec<&str> = flags.iter().map(GapFlag::as_str).collect();
                format!(" | Flags: [{}]", names.join(", "))
            }
        }

        match self {
            ExtractionList::ActionItems(items) => items
                .iter()
                .map(|i| {
                    (
                        format!("{}: \"{}\"", i.id, i.description),
                        format!(
                            "Owner: {} | Due: {}{}",
                            or_unknown(&i.owner),
                            or_unknown(&i.due),
                            flag_list(&i.flags)
                        ),
                    )
                })
                .collect(),
            ExtractionList::Risks(items) => items
                .iter()
                .map(|i| {
                    (
                        format!("{}: \"{}\"", i.id, i.description),
                        format!(
                            "Likelihood: {} | Impact: {}{}",
                            i.likelihood.as_str(),
                            i.impact.as_str(),
                            flag_list(&i.flags)
                        ),
                    )
                })
                .collect(),
            ExtractionList::Issues(items) => items
                .iter()
                .map(|i| {
                    (
                        format!("{}: \"{}\"", i.id, i.description),
                        format!(
                            "Severity: {} | Status: OPEN{}",
                            i.severity.as_str(),
                            flag_list(&i.flags)
                        ),
                    )
                })
                .collect(),
            ExtractionList::Decisions(items) => items
                .iter()
                .map(|i| {
                    (
                        format!("{}: \"{}\"", i.id, i.description),
                        format!(
                            "Decision Maker: {} | Status: PENDING{}",
                            or_unknown(&i.decision_maker),
                            flag_list(&i.flags)
                        ),
                    )
                })
                .collect(),
        }
    }
}
