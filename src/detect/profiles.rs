//! Static scoring tables for meeting-type detection.
//!
//! Kept as data rather than per-type branches so a new archetype only needs
//! new table rows.

use super::types::MeetingType;

/// Keyword and phrase vocabulary per meeting type.
pub(crate) static KEYWORDS: &[(MeetingType, &[&str])] = &[
    (
        MeetingType::SprintPlanning,
        &[
            "sprint",
            "story points",
            "backlog",
            "velocity",
            "commitment",
            "sprint goal",
            "user stories",
            "estimation",
            "capacity",
            "planning poker",
            "story",
            "points",
            "refinement",
            "grooming",
            "sprint planning",
        ],
    ),
    (
        MeetingType::Standup,
        &[
            "yesterday",
            "today",
            "tomorrow",
            "blockers",
            "impediments",
            "status update",
            "daily",
            "scrum",
            "working on",
            "plan to",
            "blocked",
            "standup",
            "stand-up",
            "daily standup",
        ],
    ),
    (
        MeetingType::Retrospective,
        &[
            "went well",
            "didn't work",
            "improve",
            "action items",
            "lessons learned",
            "retro",
            "iteration",
            "reflection",
            "what worked",
            "continue doing",
            "stop doing",
            "start doing",
            "retrospective",
            "could be better",
            "kudos",
            "shoutout",
        ],
    ),
    (
        MeetingType::OneOnOne,
        &[
            "career",
            "feedback",
            "goals",
            "development",
            "concerns",
            "support",
            "growth",
            "performance",
            "1:1",
            "one-on-one",
            "coaching",
            "mentoring",
            "promotion",
            "raise",
            "personal",
            "how are you",
            "wellbeing",
            "work-life",
            "check-in",
        ],
    ),
    (
        MeetingType::Client,
        &[
            "client",
            "stakeholder",
            "proposal",
            "requirements",
            "deliverables",
            "timeline",
            "contract",
            "engagement",
            "scope",
            "budget",
            "vendor",
            "customer",
            "invoice",
            "milestone",
            "demo",
            "presentation",
            "showcase",
        ],
    ),
    (
        MeetingType::Architecture,
        &[
            "architecture",
            "design",
            "technical",
            "scalability",
            "patterns",
            "infrastructure",
            "system",
            "component",
            "integration",
            "microservices",
            "deployment",
            "database",
            "api",
            "schema",
            "diagram",
            "tech debt",
            "refactor",
            "performance",
            "load",
            "latency",
            "caching",
        ],
    ),
    (
        MeetingType::Presentation,
        &[
            "presentation",
            "demo",
            "walkthrough",
            "showcase",
            "slides",
            "deck",
            "overview",
            "introduce",
            "presenting",
            "show you",
            "let me show",
            "questions at the end",
            "q&a",
            "any questions",
            "screen share",
            "powerpoint",
            "keynote",
            "demonstrate",
        ],
    ),
];

/// Typical duration ranges in minutes for each meeting type.
pub(crate) static DURATION_RANGES: &[(MeetingType, (u32, u32))] = &[
    (MeetingType::Standup, (5, 20)),
    (MeetingType::OneOnOne, (20, 60)),
    (MeetingType::Retrospective, (45, 120)),
    (MeetingType::SprintPlanning, (60, 240)),
    (MeetingType::Architecture, (30, 120)),
    (MeetingType::Client, (30, 90)),
    (MeetingType::Presentation, (30, 90)),
];

/// Title substrings that strongly indicate a meeting type.
pub(crate) static TITLE_HINTS: &[(MeetingType, &[&str])] = &[
    (MeetingType::Standup, &["standup", "stand-up", "daily", "scrum"]),
    (MeetingType::Retrospective, &["retro", "retrospective"]),
    (
        MeetingType::SprintPlanning,
        &["planning", "sprint", "grooming", "refinement"],
    ),
    (
        MeetingType::OneOnOne,
        &["1:1", "1-1", "one-on-one", "1 on 1"],
    ),
    (MeetingType::Client, &["client", "customer", "stakeholder"]),
    (
        MeetingType::Architecture,
        &["architecture", "design", "technical", "tech review"],
    ),
    (
        MeetingType::Presentation,
        &["presentation", "demo", "showcase", "walkthrough", "overview"],
    ),
];

/// Vocabulary counted toward the technical deep-dive pattern.
pub(crate) static TECH_TERMS: &[&str] = &[
    "architecture",
    "database",
    "api",
    "service",
    "component",
    "infrastructure",
    "deployment",
    "scalability",
    "performance",
];

pub(crate) fn keywords_for(meeting_type: MeetingType) -> &'static [&'static str] {
    KEYWORDS
        .iter()
        .find(|(mt, _)| *mt == meeting_type)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}
