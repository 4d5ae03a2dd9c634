//! System prompts and per-meeting-type JSON templates.

use crate::detect::MeetingType;

const GENERAL_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of the meeting (under 50 words)",
  "attendees": [{"name": "Person", "role": "Role or null", "contribution_summary": "What they contributed"}],
  "duration_estimate": "~45 minutes",
  "key_topics": ["Topic discussed"],
  "decisions": [{"decision": "What was decided", "context": "Why"}],
  "action_items": [{"task": "Task description", "owner": "Person or null", "deadline": "Date or null", "priority": "high|medium|low"}],
  "open_questions": ["Unresolved question"],
  "next_steps": ["Agreed next step"],
  "notable_quotes": [{"speaker": "Person", "quote": "What they said", "significance": "Why it matters"}],
  "sentiment": {"overall": "positive|neutral|negative|mixed", "energy": "high|medium|low"}
}"#;

const STANDUP_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of today's standup (under 50 words)",
  "attendees": ["Person 1", "Person 2"],
  "duration_estimate": "~15 minutes",
  "individual_updates": [{"person": "Name", "yesterday": "What they completed", "today": "What they plan to work on", "blockers": ["Any blockers"]}],
  "blockers": [{"description": "Blocker description", "owner": "Person affected", "needs_help_from": "Person or team who can help (or null)"}],
  "team_announcements": ["Any team-wide announcements"],
  "follow_ups": ["Items needing follow-up after standup"]
}"#;

const SPRINT_PLANNING_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of sprint planning outcomes (under 50 words)",
  "attendees": ["Person 1", "Person 2"],
  "duration_estimate": "~2 hours",
  "sprint_goal": "The agreed sprint goal",
  "sprint_capacity": "Team capacity in story points or hours",
  "committed_stories": [{"title": "Story title", "points": "Story points", "assignee": "Primary owner (or null)", "acceptance_criteria": ["Key criteria"]}],
  "stories_discussed_not_committed": [{"title": "Story title", "reason": "Why not committed"}],
  "risks_identified": ["Potential risks to sprint success"],
  "dependencies": ["External dependencies identified"],
  "action_items": [{"task": "Task description", "owner": "Person responsible", "deadline": "Date if mentioned (or null)"}]
}"#;

const RETROSPECTIVE_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of retrospective outcomes (under 50 words)",
  "attendees": ["Person 1", "Person 2"],
  "duration_estimate": "~1 hour",
  "what_went_well": [{"item": "Positive item", "mentioned_by": ["People who raised it"]}],
  "what_didnt_go_well": [{"item": "Issue or problem", "mentioned_by": ["People who raised it"]}],
  "action_items": [{"improvement": "What will change", "owner": "Person responsible", "target_date": "When (or null)", "priority": "high|medium|low"}],
  "kudos": [{"from": "Person giving kudos", "to": "Person receiving", "reason": "Why"}],
  "experiments_to_try": ["New things to try next iteration"],
  "parking_lot": ["Items to discuss elsewhere"]
}"#;

const ONE_ON_ONE_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of the 1-on-1 discussion (under 50 words)",
  "attendees": ["Manager", "Report"],
  "duration_estimate": "~30 minutes",
  "topics_discussed": [{"topic": "Topic name", "summary": "Brief discussion summary", "initiated_by": "Who brought it up"}],
  "feedback_given": [{"from": "Person", "to": "Person", "type": "positive|constructive", "summary": "Feedback summary"}],
  "career_development": {"goals_discussed": ["Career goals"], "growth_areas": ["Development areas"]},
  "concerns_raised": ["Concerns or worries raised"],
  "action_items": [{"task": "Task description", "owner": "Person responsible", "deadline": "Date or null"}]
}"#;

const CLIENT_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of the client meeting (under 50 words)",
  "attendees": [{"name": "Person", "side": "client|internal"}],
  "duration_estimate": "~1 hour",
  "client_requests": ["What the client asked for"],
  "commitments_made": [{"commitment": "What was promised", "owner": "Who promised it", "deadline": "When (or null)"}],
  "scope_changes": ["Changes to agreed scope"],
  "risks_and_concerns": ["Risks or concerns raised by either side"],
  "decisions": [{"decision": "What was decided", "context": "Why"}],
  "action_items": [{"task": "Task description", "owner": "Person or null", "deadline": "Date or null", "priority": "high|medium|low"}],
  "next_meeting": "Agreed follow-up (or null)"
}"#;

const ARCHITECTURE_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of the architecture discussion (under 50 words)",
  "attendees": ["Person 1", "Person 2"],
  "duration_estimate": "~1 hour",
  "proposals_discussed": [{"proposal": "Design or approach", "proposed_by": "Person", "outcome": "accepted|rejected|deferred"}],
  "technical_decisions": [{"decision": "What was decided", "rationale": "Why", "alternatives_considered": ["Other options"]}],
  "tradeoffs": ["Tradeoffs that were weighed"],
  "risks": ["Technical risks identified"],
  "open_questions": ["Unresolved technical questions"],
  "action_items": [{"task": "Task description", "owner": "Person or null", "deadline": "Date or null"}]
}"#;

const PRESENTATION_TEMPLATE: &str = r#"{
  "tldr": "Brief summary of the presentation (under 50 words)",
  "attendees": ["Presenter", "Audience member"],
  "duration_estimate": "~45 minutes",
  "presenter": "Main presenter name",
  "key_points": ["Main points presented"],
  "questions_and_answers": [{"question": "Audience question", "asked_by": "Person or null", "answer": "The answer given"}],
  "resources_shared": ["Links, documents, or slides mentioned"],
  "feedback_received": ["Reactions and feedback from the audience"],
  "follow_ups": ["Agreed follow-up items"]
}"#;

fn template_for(meeting_type: Option<MeetingType>) -> &'static str {
    match meeting_type {
        Some(MeetingType::Standup) => STANDUP_TEMPLATE,
        Some(MeetingType::SprintPlanning) => SPRINT_PLANNING_TEMPLATE,
        Some(MeetingType::Retrospective) => RETROSPECTIVE_TEMPLATE,
        Some(MeetingType::OneOnOne) => ONE_ON_ONE_TEMPLATE,
        Some(MeetingType::Client) => CLIENT_TEMPLATE,
        Some(MeetingType::Architecture) => ARCHITECTURE_TEMPLATE,
        Some(MeetingType::Presentation) => PRESENTATION_TEMPLATE,
        Some(MeetingType::General) | None => GENERAL_TEMPLATE,
    }
}

fn guidelines_for(meeting_type: Option<MeetingType>) -> &'static str {
    match meeting_type {
        Some(MeetingType::Standup) => {
            "Focus on per-person updates. Capture yesterday/today/blockers for every participant, even when briefly stated."
        }
        Some(MeetingType::SprintPlanning) => {
            "Focus on commitments. Distinguish stories the team committed to from stories merely discussed."
        }
        Some(MeetingType::Retrospective) => {
            "Preserve the went-well / didn't-go-well split and attribute items to the people who raised them."
        }
        Some(MeetingType::OneOnOne) => {
            "Be discreet and factual. Capture feedback direction and career topics without editorializing."
        }
        Some(MeetingType::Client) => {
            "Track commitments and scope carefully. Anything promised to the client must appear under commitments_made."
        }
        Some(MeetingType::Architecture) => {
            "Record decisions with their rationale and the alternatives that were considered."
        }
        Some(MeetingType::Presentation) => {
            "Separate presented content from audience questions. Capture every resource that was shared."
        }
        Some(MeetingType::General) | None => {
            "Extract decisions, action items, and open questions. Attribute statements to speakers when possible."
        }
    }
}

/// System prompt for a whole-transcript analysis call.
pub fn summary_prompt(meeting_type: Option<MeetingType>) -> String {
    format!(
        "You are an expert meeting analyst. Analyze the meeting transcript and extract key \
         information in a structured format.\n\n\
         {}\n\n\
         Respond with ONLY a JSON object matching this template exactly (no markdown, no \
         commentary):\n{}\n\n\
         Rules:\n\
         - Use only information present in the transcript.\n\
         - Use null for unknown optional values; use empty arrays when nothing applies.\n\
         - Keep every string concise and concrete.",
        guidelines_for(meeting_type),
        template_for(meeting_type)
    )
}

/// System prompt for a single-chunk analysis call.
pub fn chunk_prompt(
    chunk_number: usize,
    total_chunks: usize,
    meeting_type: Option<MeetingType>,
) -> String {
    format!(
        "You are an expert meeting analyst. This is segment {} of {} of a longer meeting \
         transcript. Text before the continuity marker repeats the previous segment's tail \
         for context only.\n\n\
         {}\n\n\
         Respond with ONLY a JSON object in this shape:\n{{\n  \
         \"chunk_summary\": \"What happened in this segment (under 80 words)\",\n  \
         \"speakers\": [{{\"name\": \"Person\", \"role\": \"Role or null\", \"key_contributions\": [\"Contribution\"]}}],\n  \
         \"topics\": [{{\"name\": \"Topic\", \"outcome\": \"Where it landed\"}}],\n  \
         \"decisions\": [{{\"decision\": \"What was decided\", \"context\": \"Why\"}}],\n  \
         \"action_items\": [{{\"task\": \"Task\", \"owner\": \"Person or null\", \"deadline\": \"Date or null\", \"priority\": \"high|medium|low\"}}],\n  \
         \"open_questions\": [\"Unresolved question\"],\n  \
         \"follow_ups_mentioned\": [\"Follow-up item\"],\n  \
         \"key_quotes\": [{{\"speaker\": \"Person\", \"quote\": \"What they said\"}}],\n  \
         \"sentiment\": {{\"overall\": \"positive|neutral|negative|mixed\"}}\n}}\n\n\
         Do not summarize content that only appears in the repeated overlap text.",
        chunk_number,
        total_chunks,
        guidelines_for(meeting_type)
    )
}

/// System prompt for the multi-chunk merge call.
pub fn merge_prompt(meeting_type: Option<MeetingType>) -> String {
    format!(
        "You are an expert meeting analyst. You will receive JSON summaries of consecutive \
         segments of one meeting. Merge them into a single final summary.\n\n\
         {}\n\n\
         Deduplicate items that appear in multiple segments (overlap text causes repeats). \
         Keep chronological order for topics and next steps.\n\n\
         Respond with ONLY a JSON object matching this template exactly:\n{}",
        guidelines_for(meeting_type),
        template_for(meeting_type)
    )
}
