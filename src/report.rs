//! Markdown rendering for structured meeting summaries.
//!
//! Tolerant of schema drift in model output: attendees and topics may arrive
//! as plain strings or as objects, and optional sections are skipped when
//! absent.

use serde_json::Value;

/// Render a summary JSON object as a markdown document.
pub fn render_markdown(summary: &Value) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Meeting Summary\n".to_string());

    if let Some(tldr) = non_empty_str(summary, "tldr") {
        lines.push("## TL;DR\n".to_string());
        lines.push(format!("{tldr}\n"));
    }

    lines.push("## Meeting Info\n".to_string());
    let attendees = array(summary, "attendees");
    if !attendees.is_empty() {
        let names: Vec<&str> = attendees
            .iter()
            .filter_map(|a| match a {
                Value::String(name) => Some(name.as_str()),
                Value::Object(_) => a.get("name").and_then(Value::as_str),
                _ => None,
            })
            .collect();
        lines.push(format!("**Attendees:** {}\n", names.join(", ")));
    }
    if let Some(duration) = non_empty_str(summary, "duration_estimate") {
        lines.push(format!("**Duration:** {duration}\n"));
    }

    render_sentiment(summary, &mut lines);
    render_contributions(&attendees, &mut lines);
    render_key_topics(summary, &mut lines);
    render_topic_details(summary, &mut lines);

    let decisions = array(summary, "decisions");
    if !decisions.is_empty() {
        lines.push("## Key Decisions\n".to_string());
        for decision in &decisions {
            lines.push(format!(
                "- **{}**",
                str_or(decision, "decision", "N/A")
            ));
            if let Some(context) = non_empty_str(decision, "context") {
                lines.push(format!("  - Context: {context}"));
            }
        }
        lines.push(String::new());
    }

    lines.push("## Action Items\n".to_string());
    let action_items = array(summary, "action_items");
    if action_items.is_empty() {
        lines.push("No action items identified.\n".to_string());
    } else {
        lines.push("| Task | Owner | Deadline | Priority |".to_string());
        lines.push("|------|-------|----------|----------|".to_string());
        for item in &action_items {
            let task = str_or(item, "task", "N/A");
            let owner = non_empty_str(item, "owner").unwrap_or("Unassigned");
            let deadline = non_empty_str(item, "deadline").unwrap_or("Not set");
            let priority = capitalize(str_or(item, "priority", "medium"));
            lines.push(format!("| {task} | {owner} | {deadline} | {priority} |"));
        }
        lines.push(String::new());
    }

    let open_questions = array(summary, "open_questions");
    if !open_questions.is_empty() {
        lines.push("## Open Questions\n".to_string());
        for question in &open_questions {
            lines.push(format!("- {}", as_text(question)));
        }
        lines.push(String::new());
    }

    let next_steps = array(summary, "next_steps");
    if !next_steps.is_empty() {
        lines.push("## Next Steps\n".to_string());
        for (i, step) in next_steps.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, as_text(step)));
        }
        lines.push(String::new());
    }

    let quotes = array(summary, "notable_quotes");
    if !quotes.is_empty() {
        lines.push("## Notable Quotes\n".to_string());
        for quote in quotes.iter().take(5) {
            let speaker = str_or(quote, "speaker", "Unknown");
            let text = str_or(quote, "quote", "");
            lines.push(format!("> \"{text}\" - **{speaker}**"));
            let significance = non_empty_str(quote, "significance")
                .or_else(|| non_empty_str(quote, "context"));
            if let Some(significance) = significance {
                lines.push(format!("> _{significance}_"));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn render_sentiment(summary: &Value, lines: &mut Vec<String>) {
    let Some(sentiment) = summary.get("sentiment").filter(|s| s.is_object()) else {
        return;
    };
    if sentiment.as_object().is_some_and(|m| m.is_empty()) {
        return;
    }

    lines.push("## Meeting Sentiment\n".to_string());
    let overall = str_or(sentiment, "overall", "neutral");
    lines.push(format!("**Overall Tone:** {}\n", capitalize(overall)));

    let energy = non_empty_str(sentiment, "energy")
        .or_else(|| non_empty_str(sentiment, "energy_level"));
    if let Some(energy) = energy {
        lines.push(format!("**Energy Level:** {}\n", capitalize(energy)));
    }
    if let Some(dynamics) = non_empty_str(sentiment, "dynamics") {
        lines.push(format!("**Dynamics:** {dynamics}\n"));
    }

    let agreements = array(sentiment, "agreements");
    if !agreements.is_empty() {
        lines.push("\n**Points of Agreement:**".to_string());
        for item in &agreements {
            lines.push(format!("- {}", as_text(item)));
        }
        lines.push(String::new());
    }

    let conflicts = array(sentiment, "conflicts");
    if !conflicts.is_empty() {
        lines.push("\n**Tensions/Disagreements:**".to_string());
        for item in &conflicts {
            lines.push(format!("- {}", as_text(item)));
        }
        lines.push(String::new());
    }
}

fn render_contributions(attendees: &[Value], lines: &mut Vec<String>) {
    let has_contributions = attendees
        .iter()
        .any(|a| non_empty_str(a, "contribution_summary").is_some());
    if !has_contributions {
        return;
    }

    lines.push("## Speaker Contributions\n".to_string());
    for attendee in attendees {
        let name = str_or(attendee, "name", "Unknown");
        let role = non_empty_str(attendee, "role")
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        lines.push(format!("### {name}{role}"));
        if let Some(contribution) = non_empty_str(attendee, "contribution_summary") {
            lines.push(format!("{contribution}\n"));
        }
    }
}

fn render_key_topics(summary: &Value, lines: &mut Vec<String>) {
    let topics = array(summary, "key_topics");
    if topics.is_empty() {
        return;
    }

    lines.push("## Key Topics\n".to_string());
    for topic in &topics {
        if topic.is_object() {
            lines.push(format!(
                "- **{}**: {}",
                str_or(topic, "name", ""),
                str_or(topic, "outcome", "")
            ));
        } else {
            lines.push(format!("- {}", as_text(topic)));
        }
    }
    lines.push(String::new());
}

fn render_topic_details(summary: &Value, lines: &mut Vec<String>) {
    let topics = array(summary, "topics");
    if topics.is_empty() || !topics[0].is_object() {
        return;
    }

    lines.push("## Topic Details\n".to_string());
    for topic in &topics {
        lines.push(format!("### {}", str_or(topic, "name", "")));
        if let Some(duration) = non_empty_str(topic, "duration_estimate") {
            lines.push(format!("**Duration:** {duration}"));
        }
        let speakers_involved = array(topic, "speakers_involved");
        let speakers: Vec<&str> = speakers_involved
            .iter()
            .filter_map(Value::as_str)
            .collect();
        if !speakers.is_empty() {
            lines.push(format!("**Speakers:** {}", speakers.join(", ")));
        }
        if let Some(outcome) = non_empty_str(topic, "outcome") {
            lines.push(format!("**Outcome:** {outcome}"));
        }
        for point in &array(topic, "key_points") {
            lines.push(format!("- {}", as_text(point)));
        }
        lines.push(String::new());
    }
}

fn array(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn str_or<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
