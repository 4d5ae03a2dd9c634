//! Heuristic scoring engine for meeting-type detection.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::profiles::{self, DURATION_RANGES, TECH_TERMS, TITLE_HINTS};
use super::types::{DetectionResult, MeetingType};
use crate::transcript::{extract_speakers, speaker_turns};

/// Maximum contribution of the keyword signal.
const KEYWORD_WEIGHT: f64 = 0.4;

/// Best score below this falls back to the general meeting type.
const GENERAL_THRESHOLD: f64 = 0.3;

/// Conservative speaking rate used for duration estimation.
const SPEAKING_RATE_WPM: f64 = 120.0;

static HOURS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*hour").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*min").unwrap());

/// Optional metadata supplied alongside the transcript.
#[derive(Debug, Default, Clone)]
pub struct DetectOptions<'a> {
    /// Number of participants; derived from speaker attribution when absent.
    pub participant_count: Option<usize>,
    /// Known duration in minutes.
    pub duration_minutes: Option<u32>,
    /// Duration as a string, e.g. "1 hour 30 minutes".
    pub duration_string: Option<&'a str>,
    /// Meeting title; a strong independent signal.
    pub title: Option<&'a str>,
}

/// Detect the meeting type from a transcript and optional metadata.
pub fn detect(transcript: &str, opts: DetectOptions<'_>) -> DetectionResult {
    let participant_count = opts
        .participant_count
        .unwrap_or_else(|| extract_speakers(transcript).len());

    let duration_minutes = opts
        .duration_minutes
        .or_else(|| estimate_duration_minutes(transcript, opts.duration_string));

    let search_lower = match opts.title {
        Some(title) => format!("{}\n{}", title, transcript).to_lowercase(),
        None => transcript.to_lowercase(),
    };

    let patterns = StructuralPatterns::detect(transcript);

    let mut keyword_matches: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut scores: Vec<(MeetingType, f64)> = Vec::new();

    for &mt in MeetingType::scored() {
        let matched = count_keyword_matches(&search_lower, profiles::keywords_for(mt));
        let score = (matched.len() as f64 / 3.0).min(1.0) * KEYWORD_WEIGHT;
        if !matched.is_empty() {
            keyword_matches.insert(
                mt.as_str().to_string(),
                matched.iter().map(|s| s.to_string()).collect(),
            );
        }
        scores.push((mt, score));
    }

    // Structural pattern bonuses.
    if patterns.round_robin && patterns.yesterday_today_blockers {
        bump(&mut scores, MeetingType::Standup, 0.3);
    } else if patterns.round_robin {
        bump(&mut scores, MeetingType::Standup, 0.15);
    }
    if patterns.went_well_improve {
        bump(&mut scores, MeetingType::Retrospective, 0.25);
    }
    if patterns.story_estimation {
        bump(&mut scores, MeetingType::SprintPlanning, 0.25);
    }
    if patterns.technical_deep_dive {
        bump(&mut scores, MeetingType::Architecture, 0.2);
    }
    if patterns.single_dominant_speaker {
        bump(&mut scores, MeetingType::Presentation, 0.25);
    }

    // Participant count signal.
    if participant_count == 2 {
        bump(&mut scores, MeetingType::OneOnOne, 0.35);
    } else if participant_count <= 4 {
        bump(&mut scores, MeetingType::OneOnOne, 0.1);
    } else if participant_count > 8 {
        bump(&mut scores, MeetingType::OneOnOne, -0.2);
    }

    // Duration signal.
    if let Some(duration) = duration_minutes {
        for &(mt, (min_dur, max_dur)) in DURATION_RANGES {
            if (min_dur..=max_dur).contains(&duration) {
                bump(&mut scores, mt, 0.15);
            } else if f64::from(duration) < f64::from(min_dur) * 0.5 || duration > max_dur * 2 {
                bump(&mut scores, mt, -0.1);
            }
        }
    }

    // Title signal, independent of body keywords.
    if let Some(title) = opts.title {
        let title_lower = title.to_lowercase();
        for &(mt, hints) in TITLE_HINTS {
            if hints.iter().any(|hint| title_lower.contains(hint)) {
                bump(&mut scores, mt, 0.3);
            }
        }
    }

    for (_, score) in scores.iter_mut() {
        *score = score.clamp(0.0, 1.0);
    }

    let (best_type, best_score) = scores
        .iter()
        .copied()
        .fold((MeetingType::General, 0.0_f64), |acc, item| {
            if item.1 > acc.1 {
                item
            } else {
                acc
            }
        });

    let mut signals = Vec::new();
    if participant_count > 0 {
        signals.push(format!("Detected {} participants", participant_count));
    }
    if let Some(duration) = duration_minutes {
        signals.push(format!("Estimated duration: {} minutes", duration));
    }
    if let Some(title) = opts.title {
        signals.push(format!("Meeting title: {}", title));
    }
    if let Some(matched) = keyword_matches.get(best_type.as_str()) {
        let top: Vec<&str> = matched.iter().take(5).map(String::as_str).collect();
        signals.push(format!("Keywords found: {}", top.join(", ")));
    }
    patterns.append_signals(&mut signals);

    if best_score < GENERAL_THRESHOLD {
        let mut general_signals =
            vec!["No strong signals for specific meeting type".to_string()];
        general_signals.extend(signals);
        return DetectionResult {
            meeting_type: MeetingType::General,
            confidence: 1.0 - best_score,
            signals: general_signals,
            keyword_matches,
        };
    }

    DetectionResult {
        meeting_type: best_type,
        confidence: best_score,
        signals,
        keyword_matches,
    }
}

/// Estimate meeting duration in minutes.
///
/// Prefers an explicit duration string ("N hour(s)", "N min(s)"); otherwise
/// derives a conservative estimate from word count and speaking rate.
pub fn estimate_duration_minutes(transcript: &str, explicit: Option<&str>) -> Option<u32> {
    if let Some(text) = explicit {
        let lower = text.to_lowercase();
        let mut minutes = 0u32;
        if let Some(caps) = HOURS_RE.captures(&lower) {
            minutes += caps[1].parse::<u32>().unwrap_or(0) * 60;
        }
        if let Some(caps) = MINUTES_RE.captures(&lower) {
            minutes += caps[1].parse::<u32>().unwrap_or(0);
        }
        if minutes > 0 {
            return Some(minutes);
        }
    }

    let word_count = transcript.split_whitespace().count();
    let estimate = (word_count as f64 / SPEAKING_RATE_WPM) as u32;
    if estimate > 0 {
        Some(estimate)
    } else {
        None
    }
}

fn bump(scores: &mut [(MeetingType, f64)], target: MeetingType, delta: f64) {
    for (mt, score) in scores.iter_mut() {
        if *mt == target {
            *score += delta;
            return;
        }
    }
}

/// Count keyword matches in lowercased text.
///
/// Multi-word keywords match as substrings; single words require word
/// boundaries on both sides.
fn count_keyword_matches<'a>(text_lower: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .filter(|keyword| {
            let lower = keyword.to_lowercase();
            if lower.contains(' ') {
                text_lower.contains(&lower)
            } else {
                contains_word(text_lower, &lower)
            }
        })
        .copied()
        .collect()
}

fn contains_word(text: &str, word: &str) -> bool {
    for (idx, _) in text.match_indices(word) {
        let before_ok = !text[..idx]
            .chars()
            .next_back()
            .map_or(false, |c| c.is_alphanumeric());
        let after = idx + word.len();
        let after_ok = !text[after..].chars().next().map_or(false, |c| c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// Transcript-level structural patterns feeding the score bonuses.
#[derive(Debug, Default, Clone, Copy)]
struct StructuralPatterns {
    round_robin: bool,
    yesterday_today_blockers: bool,
    went_well_improve: bool,
    story_estimation: bool,
    technical_deep_dive: bool,
    single_dominant_speaker: bool,
}

impl StructuralPatterns {
    fn detect(transcript: &str) -> Self {
        let lower = transcript.to_lowercase();

        let has_yesterday = ["yesterday", "last day", "previously"]
            .iter()
            .any(|w| lower.contains(w));
        let has_today = ["today", "this day", "planning to"]
            .iter()
            .any(|w| lower.contains(w));

        let has_went_well = ["went well", "worked well", "good job", "proud of", "celebrate"]
            .iter()
            .any(|p| lower.contains(p));
        let has_improve = ["improve", "better", "didn't work", "could have", "next time"]
            .iter()
            .any(|p| lower.contains(p));

        let has_story = lower.contains("story") || lower.contains("user story");
        let has_points = ["points", "estimate", "sizing", "fibonacci"]
            .iter()
            .any(|w| lower.contains(w));

        let tech_count = TECH_TERMS.iter().filter(|t| lower.contains(*t)).count();

        Self {
            round_robin: detect_round_robin(transcript),
            yesterday_today_blockers: has_yesterday && has_today,
            went_well_improve: has_went_well && has_improve,
            story_estimation: has_story && has_points,
            technical_deep_dive: tech_count >= 4,
            single_dominant_speaker: detect_dominant_speaker(transcript),
        }
    }

    fn append_signals(&self, signals: &mut Vec<String>) {
        if self.round_robin {
            signals.push("Round-robin speaking pattern detected".to_string());
        }
        if self.yesterday_today_blockers {
            signals.push("Yesterday/Today/Blockers structure detected".to_string());
        }
        if self.went_well_improve {
            signals.push("Retrospective structure detected".to_string());
        }
        if self.story_estimation {
            signals.push("Story estimation discussion detected".to_string());
        }
        if self.technical_deep_dive {
            signals.push("Technical deep-dive content detected".to_string());
        }
        if self.single_dominant_speaker {
            signals.push("Single dominant speaker pattern detected".to_string());
        }
    }
}

/// Round-robin: at least two speakers, each with a turn count within 50-150%
/// of the mean. Characteristic of standups.
fn detect_round_robin(transcript: &str) -> bool {
    let speakers = extract_speakers(transcript);
    if speakers.len() < 2 {
        return false;
    }

    let mut turn_counts: BTreeMap<String, usize> = BTreeMap::new();
    for turn in speaker_turns(transcript) {
        if speakers.contains(&turn.name) {
            *turn_counts.entry(turn.name).or_insert(0) += 1;
        }
    }

    if turn_counts.len() < 2 {
        return false;
    }

    let counts: Vec<usize> = turn_counts.values().copied().collect();
    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    if mean < 1.0 {
        return false;
    }

    counts
        .iter()
        .all(|&count| count as f64 >= 0.5 * mean && count as f64 <= 1.5 * mean)
}

/// One speaker holding at least 70% of the word volume suggests a
/// presentation. Word share is a naive whitespace split after removing the
/// attribution label; mid-turn quoted dialogue is a known approximation.
fn detect_dominant_speaker(transcript: &str) -> bool {
    let speakers = extract_speakers(transcript);
    if speakers.len() < 2 {
        return false;
    }

    let mut speaker_words: BTreeMap<String, usize> = BTreeMap::new();
    for turn in speaker_turns(transcript) {
        if !speakers.contains(&turn.name) {
            continue;
        }
        let text = turn.text(transcript);
        let body = text.split_once(':').map(|(_, rest)| rest).unwrap_or(text);
        *speaker_words.entry(turn.name).or_insert(0) += body.split_whitespace().count();
    }

    let total: usize = speaker_words.values().sum();
    if total == 0 {
        return false;
    }
    let max = speaker_words.values().copied().max().unwrap_or(0);

    max as f64 / total as f64 >= 0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_keyword_matching() {
        let matched =
            count_keyword_matches("we discussed the sprint backlog yesterday.", &["sprint", "backlog", "velocity"]);
        assert_eq!(matched, vec!["sprint", "backlog"]);
    }

    #[test]
    fn phrase_keyword_matching() {
        let matched = count_keyword_matches(
            "the story points estimation went well.",
            &["story points", "went well"],
        );
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn word_boundaries_are_respected() {
        assert!(!contains_word("restrospectively", "retro"));
        assert!(contains_word("the retro went fine", "retro"));
    }

    #[test]
    fn detects_round_robin() {
        let transcript = "John: Yesterday I worked on the API.\n\
            Sarah: Yesterday I fixed bugs.\n\
            Mike: Yesterday I did code review.\n\
            John: Today I'll continue the API work.\n\
            Sarah: Today I'll test the fixes.\n\
            Mike: Today I'll review more PRs.\n";
        assert!(detect_round_robin(transcript));
    }

    #[test]
    fn no_round_robin_with_single_speaker() {
        let transcript = "John: I'm going to present the architecture.\n\
            John: The system has three main components.\n\
            John: Let me explain each one.\n";
        assert!(!detect_round_robin(transcript));
    }

    #[test]
    fn detects_dominant_speaker() {
        let long_turn = "This is the presenter going on and on about the roadmap. ".repeat(20);
        let transcript = format!("Alice: {}\nBob: Quick question about slide two?\n", long_turn);
        assert!(detect_dominant_speaker(&transcript));
    }

    #[test]
    fn structural_patterns_yesterday_today() {
        let transcript = "Yesterday I completed the feature.\n\
            Today I'm working on tests.\n\
            I have a blocker with the database.\n";
        assert!(StructuralPatterns::detect(transcript).yesterday_today_blockers);
    }

    #[test]
    fn structural_patterns_went_well_improve() {
        let transcript = "What went well: collaboration was great.\nWhat could improve: documentation.\n";
        assert!(StructuralPatterns::detect(transcript).went_well_improve);
    }

    #[test]
    fn structural_patterns_story_estimation() {
        let transcript = "Let's estimate this user story.\nI think it's 5 points.\n";
        assert!(StructuralPatterns::detect(transcript).story_estimation);
    }

    #[test]
    fn structural_patterns_technical_deep_dive() {
        let transcript = "The architecture uses microservices.\n\
            Each service has its own database.\n\
            We need to consider api design and deployment.\n\
            Performance and scalability are key.\n";
        assert!(StructuralPatterns::detect(transcript).technical_deep_dive);
    }

    #[test]
    fn explicit_duration_string_is_parsed() {
        assert_eq!(estimate_duration_minutes("", Some("1 hour 30 minutes")), Some(90));
        assert_eq!(estimate_duration_minutes("", Some("45 minutes")), Some(45));
    }

    #[test]
    fn duration_estimated_from_word_count() {
        let transcript = "word ".repeat(240);
        assert_eq!(estimate_duration_minutes(&transcript, None), Some(2));
    }

    #[test]
    fn short_duration_penalty_applies_below_half_of_odd_minimum() {
        // Standup's range starts at 5 minutes, so anything under 2.5 minutes
        // is penalized. A 2-minute duration must score 0.1 below a 3-minute
        // one, which falls in neither the bonus nor the penalty band.
        let transcript = "Alice: Welcome to our daily scrum, quick status update from everyone please.\n\
            Alice: Fine, let's go around.\n\
            Bob: Not much to report.\n";

        let at = |minutes| {
            detect(
                transcript,
                DetectOptions {
                    duration_minutes: Some(minutes),
                    ..Default::default()
                },
            )
        };

        let penalized = at(2);
        let neutral = at(3);
        assert_eq!(penalized.meeting_type, MeetingType::Standup);
        assert_eq!(neutral.meeting_type, MeetingType::Standup);
        assert!(
            (neutral.confidence - penalized.confidence - 0.1).abs() < 1e-9,
            "expected a 0.1 penalty at 2 minutes: {} vs {}",
            neutral.confidence,
            penalized.confidence
        );
    }

    #[test]
    fn detects_standup() {
        let transcript = "John: Yesterday I completed the login feature. Today I'm working on the dashboard. No blockers.\n\
            Sarah: Yesterday I fixed the API bug. Today I'll write tests. I'm blocked on database access.\n\
            Mike: Yesterday I reviewed PRs. Today more code review. No blockers.\n";
        let result = detect(
            transcript,
            DetectOptions {
                title: Some("Daily Standup"),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::Standup);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn standup_without_title_still_wins() {
        let transcript = "John: Yesterday I shipped the parser. Today I'm on the importer. No blockers.\n\
            Sarah: Yesterday I ran the load tests. Today I'll fix the flaky ones. Blocked on credentials.\n\
            Mike: Yesterday I paired with Sarah. Today I'll pick up reviews. No blockers.\n";
        let result = detect(transcript, DetectOptions::default());
        assert_eq!(result.meeting_type, MeetingType::Standup);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn detects_retrospective() {
        let transcript = "Alice: Let's start with what went well this sprint.\n\
            Bob: Collaboration was great, we shipped on time.\n\
            Alice: Now what didn't go well?\n\
            Bob: Documentation could be better.\n\
            Alice: What action items can we take to improve?\n";
        let result = detect(
            transcript,
            DetectOptions {
                title: Some("Sprint 5 Retrospective"),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::Retrospective);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn detects_sprint_planning() {
        let transcript = "Alice: Let's review the backlog for this sprint.\n\
            Bob: This user story is about 5 story points.\n\
            Alice: Our velocity from last sprint was 45 points.\n\
            Bob: What's our capacity this sprint?\n\
            Alice: We should commit to 40 points given PTO.\n";
        let result = detect(
            transcript,
            DetectOptions {
                title: Some("Sprint Planning"),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::SprintPlanning);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn detects_one_on_one() {
        let transcript = "Manager: How are you doing this week?\n\
            Employee: Pretty good, thanks for checking in.\n\
            Manager: Let's talk about your career goals.\n\
            Employee: I'd like to grow into a senior role.\n\
            Manager: What feedback do you have for me?\n";
        let result = detect(
            transcript,
            DetectOptions {
                participant_count: Some(2),
                title: Some("1:1 Check-in"),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::OneOnOne);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn detects_architecture_review() {
        let transcript = "Alice: Today we'll review the proposed architecture.\n\
            Bob: The system uses microservices with REST APIs.\n\
            Alice: We need to consider scalability and performance.\n\
            Bob: The database design follows this schema.\n\
            Alice: Let's discuss the deployment infrastructure.\n";
        let result = detect(
            transcript,
            DetectOptions {
                title: Some("Architecture Review"),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::Architecture);
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn weak_signals_fall_back_to_general() {
        let transcript = "Alice: Shall we get going?\n\
            Bob: Sure, there were a few updates to share.\n\
            Carol: Sounds fine, anything from the rest of the group?\n";
        let result = detect(transcript, DetectOptions::default());
        assert_eq!(result.meeting_type, MeetingType::General);
        assert!(result
            .signals
            .first()
            .map(|s| s.contains("No strong signals"))
            .unwrap_or(false));
    }

    #[test]
    fn general_confidence_is_one_minus_best() {
        // Nothing here matches any keyword, structural, participant, or
        // title signal, so every score is zero and the general fallback
        // reports confidence of exactly 1 - 0.
        let transcript = "The group gathered after lunch and the conversation drifted \
            between several small matters before everyone returned to their desks.";
        let result = detect(
            transcript,
            DetectOptions {
                participant_count: Some(5),
                ..Default::default()
            },
        );
        assert_eq!(result.meeting_type, MeetingType::General);
        assert!(
            (result.confidence - 1.0).abs() < 1e-9,
            "zero best score should give confidence 1.0, got {}",
            result.confidence
        );
    }

    #[test]
    fn two_participants_stay_one_on_one_or_general() {
        let transcript = "Person: Let's chat about the project.\nPartner: Sure, sounds good.\n";
        let result = detect(
            transcript,
            DetectOptions {
                participant_count: Some(2),
                ..Default::default()
            },
        );
        assert!(matches!(
            result.meeting_type,
            MeetingType::OneOnOne | MeetingType::General
        ));
    }

    #[test]
    fn confidence_is_clamped() {
        let transcript = "John: Yesterday I completed the login feature. Today I'm working on the dashboard. No blockers.\n\
            Sarah: Yesterday I fixed the API bug. Today I'll write tests. Blocked on database access.\n\
            Mike: Yesterday I reviewed PRs. Today more code review. No blockers.\n";
        let result = detect(
            transcript,
            DetectOptions {
                title: Some("Daily Standup"),
                duration_minutes: Some(15),
                ..Default::default()
            },
        );
        assert!(result.confidence <= 1.0);
    }
}
