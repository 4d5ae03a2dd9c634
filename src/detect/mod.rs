//! Meeting-type detection
//!
//! Scores a transcript against known meeting archetypes using keyword,
//! structural-pattern, participant-count, duration, and title signals.

mod detector;
mod profiles;
mod types;

pub use detector::{detect, estimate_duration_minutes, DetectOptions};
pub use types::{DetectionResult, MeetingType};
