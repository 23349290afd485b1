//! Coaching messages: which message a rep earns, and which messages are
//! still worth showing.
//!
//! The session log keeps every message. Windowing happens here, at the
//! display boundary, so the log stays the authoritative history.

use crate::clock::{time_diff_ms, Timestamp};
use serde::{Deserialize, Serialize};

/// Messages older than this are no longer displayed
pub const DISPLAY_WINDOW_MS: u64 = 5000;
/// Most messages displayed at once
pub const MAX_VISIBLE: usize = 3;

/// Reps faster than this many seconds are flagged as rushed
pub const FAST_REP_SECS: f64 = 1.5;
/// Reps slower than this many seconds are praised as controlled
pub const SLOW_REP_SECS: f64 = 4.0;

pub const TOO_FAST: &str = "You're going too fast! Slow down for proper form.";
pub const GOOD_CONTROL: &str = "Good control on the slow movement!";
pub const GOOD_PACE: &str = "Good pace! Keep it up.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub message: String,
    pub severity: Severity,
    pub timestamp: Timestamp,
}

impl FeedbackMessage {
    pub fn positive(message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Positive,
            timestamp,
        }
    }

    pub fn warning(message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            timestamp,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Pick the pacing message for a rep that took `rep_secs`
pub fn rep_feedback(rep_secs: f64, timestamp: Timestamp) -> FeedbackMessage {
    if rep_secs < FAST_REP_SECS {
        FeedbackMessage::warning(TOO_FAST, timestamp)
    } else if rep_secs > SLOW_REP_SECS {
        FeedbackMessage::positive(GOOD_CONTROL, timestamp)
    } else {
        FeedbackMessage::positive(GOOD_PACE, timestamp)
    }
}

pub fn start_message(exercise: &str, timestamp: Timestamp) -> FeedbackMessage {
    FeedbackMessage::positive(format!("Starting {}. Get ready!", exercise), timestamp)
}

pub fn completion_message(reps: u32, exercise: &str, timestamp: Timestamp) -> FeedbackMessage {
    FeedbackMessage::positive(
        format!("Congratulations! You've completed {} {}!", reps, exercise),
        timestamp,
    )
}

/// The tail of `log` that is younger than the display window, capped at
/// [`MAX_VISIBLE`] entries, oldest first.
pub fn visible_messages(log: &[FeedbackMessage], now: Timestamp) -> Vec<&FeedbackMessage> {
    let fresh: Vec<&FeedbackMessage> = log
        .iter()
        .filter(|msg| {
            let age = (now - msg.timestamp).num_milliseconds();
            age < DISPLAY_WINDOW_MS as i64
        })
        .collect();

    let skip = fresh.len().saturating_sub(MAX_VISIBLE);
    fresh.into_iter().skip(skip).collect()
}

/// Age of a message in whole seconds, for the panel's "Ns ago" hint
pub fn age_secs(msg: &FeedbackMessage, now: Timestamp) -> u64 {
    time_diff_ms(msg.timestamp, now) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use chrono::Duration;

    #[test]
    fn test_rep_feedback_tiers() {
        let now = ManualClock::default().now();

        let fast = rep_feedback(1.2, now);
        assert_eq!(fast.severity, Severity::Warning);
        assert_eq!(fast.message, TOO_FAST);

        let slow = rep_feedback(4.5, now);
        assert_eq!(slow.severity, Severity::Positive);
        assert_eq!(slow.message, GOOD_CONTROL);

        let steady = rep_feedback(2.5, now);
        assert_eq!(steady.severity, Severity::Positive);
        assert_eq!(steady.message, GOOD_PACE);
    }

    #[test]
    fn test_rep_feedback_boundaries_are_good_pace() {
        let now = ManualClock::default().now();
        assert_eq!(rep_feedback(1.5, now).message, GOOD_PACE);
        assert_eq!(rep_feedback(4.0, now).message, GOOD_PACE);
    }

    #[test]
    fn test_messages_text() {
        let now = ManualClock::default().now();
        assert_eq!(
            start_message("Squats", now).message,
            "Starting Squats. Get ready!"
        );
        assert_eq!(
            completion_message(10, "Push-ups", now).message,
            "Congratulations! You've completed 10 Push-ups!"
        );
    }

    #[test]
    fn test_visible_messages_drops_stale_entries() {
        let clock = ManualClock::default();
        let old = FeedbackMessage::positive("old", clock.now());
        clock.advance(Duration::milliseconds(3000));
        let recent = FeedbackMessage::warning("recent", clock.now());
        clock.advance(Duration::milliseconds(2500));

        let log = vec![old, recent];
        let visible = visible_messages(&log, clock.now());

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "recent");
    }

    #[test]
    fn test_visible_messages_exactly_five_seconds_is_stale() {
        let clock = ManualClock::default();
        let log = vec![FeedbackMessage::positive("edge", clock.now())];
        clock.advance(Duration::milliseconds(5000));
        assert!(visible_messages(&log, clock.now()).is_empty());
    }

    #[test]
    fn test_visible_messages_keeps_last_three() {
        let clock = ManualClock::default();
        let log: Vec<FeedbackMessage> = (0..5)
            .map(|i| FeedbackMessage::positive(format!("m{}", i), clock.now()))
            .collect();

        let visible = visible_messages(&log, clock.now());
        let texts: Vec<&str> = visible.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_visible_messages_empty_log() {
        let now = ManualClock::default().now();
        assert!(visible_messages(&[], now).is_empty());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::Positive).unwrap(),
            "\"positive\""
        );
    }
}
