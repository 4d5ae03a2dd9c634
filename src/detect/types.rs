//! Meeting type enumeration and detection result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Supported meeting types with specialized summary templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    SprintPlanning,
    Standup,
    Retrospective,
    OneOnOne,
    Client,
    Architecture,
    Presentation,
    General,
}

impl MeetingType {
    /// Stable string identifier, used as map keys and in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SprintPlanning => "sprint_planning",
            Self::Standup => "standup",
            Self::Retrospective => "retrospective",
            Self::OneOnOne => "one_on_one",
            Self::Client => "client",
            Self::Architecture => "architecture",
            Self::Presentation => "presentation",
            Self::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sprint_planning" => Some(Self::SprintPlanning),
            "standup" => Some(Self::Standup),
            "retrospective" => Some(Self::Retrospective),
            "one_on_one" => Some(Self::OneOnOne),
            "client" => Some(Self::Client),
            "architecture" => Some(Self::Architecture),
            "presentation" => Some(Self::Presentation),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SprintPlanning => "Sprint Planning",
            Self::Standup => "Daily Standup",
            Self::Retrospective => "Retrospective",
            Self::OneOnOne => "1-on-1",
            Self::Client => "Client Meeting",
            Self::Architecture => "Architecture Review",
            Self::Presentation => "Presentation",
            Self::General => "General Meeting",
        }
    }

    /// All meeting types, specific types first.
    pub fn all() -> &'static [MeetingType] {
        &[
            Self::SprintPlanning,
            Self::Standup,
            Self::Retrospective,
            Self::OneOnOne,
            Self::Client,
            Self::Architecture,
            Self::Presentation,
            Self::General,
        ]
    }

    /// The seven specific types that can be scored (everything but General).
    pub(crate) fn scored() -> &'static [MeetingType] {
        &[
            Self::SprintPlanning,
            Self::Standup,
            Self::Retrospective,
            Self::OneOnOne,
            Self::Client,
            Self::Architecture,
            Self::Presentation,
        ]
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of classifying one transcript.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub meeting_type: MeetingType,
    /// Confidence in the classification, clamped to 0.0..=1.0.
    pub confidence: f64,
    /// Human-readable evidence for the detection.
    pub signals: Vec<String>,
    /// Matched keywords per meeting-type identifier.
    pub keyword_matches: BTreeMap<String, Vec<String>>,
}

impl DetectionResult {
    /// Whether the caller should ask a human to confirm before proceeding.
    pub fn needs_confirmation(&self) -> bool {
        self.confidence < 0.7 && self.meeting_type != MeetingType::General
    }

    /// Message asking the user to confirm the detected type.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Based on my analysis, this appears to be a {} (confidence: {}%). Is this correct?\n\
             Available types: Sprint Planning, Standup, Retrospective, 1-on-1, Client Meeting, \
             Architecture Review, Presentation, General.",
            self.meeting_type.display_name(),
            (self.confidence * 100.0) as u32
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_round_trip() {
        for mt in MeetingType::all() {
            assert_eq!(MeetingType::from_str(mt.as_str()), Some(*mt));
        }
        assert_eq!(MeetingType::from_str("offsite"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(MeetingType::SprintPlanning.display_name(), "Sprint Planning");
        assert_eq!(MeetingType::OneOnOne.display_name(), "1-on-1");
        assert_eq!(MeetingType::Standup.display_name(), "Daily Standup");
    }

    #[test]
    fn needs_confirmation_below_threshold() {
        let result = DetectionResult {
            meeting_type: MeetingType::Standup,
            confidence: 0.5,
            signals: vec![],
            keyword_matches: BTreeMap::new(),
        };
        assert!(result.needs_confirmation());
    }

    #[test]
    fn no_confirmation_when_confident() {
        let result = DetectionResult {
            meeting_type: MeetingType::Standup,
            confidence: 0.8,
            signals: vec![],
            keyword_matches: BTreeMap::new(),
        };
        assert!(!result.needs_confirmation());
    }

    #[test]
    fn general_never_needs_confirmation() {
        let result = DetectionResult {
            meeting_type: MeetingType::General,
            confidence: 0.3,
            signals: vec![],
            keyword_matches: BTreeMap::new(),
        };
        assert!(!result.needs_confirmation());
    }

    #[test]
    fn confirmation_message_names_type_and_confidence() {
        let result = DetectionResult {
            meeting_type: MeetingType::Standup,
            confidence: 0.65,
            signals: vec![],
            keyword_matches: BTreeMap::new(),
        };
        let message = result.confirmation_message();
        assert!(message.contains("Standup"));
        assert!(message.contains("65%"));
        assert!(message.contains("Available types"));
    }
}
