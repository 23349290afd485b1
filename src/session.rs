//! Exercise session store.
//!
//! [`Session`] owns a [`SessionState`] and is the only thing that mutates
//! it. Every operation takes `&mut self` and runs to completion, so the
//! event loop never observes a half-applied transition.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{time_diff_ms, Clock, SystemClock, Timestamp};
use crate::error::SettingsError;
use crate::exercise::Exercise;
use crate::feedback::{self, FeedbackMessage};
use crate::scoring::{FormScorer, RandomFormScorer};
use crate::util::{mean, round_tenth};

pub const DEFAULT_TARGET_REPS: u32 = 10;
pub const DEFAULT_CONFIDENCE: f64 = 0.7;
pub const MIN_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub selected_exercise: Exercise,
    pub target_reps: u32,
    pub detection_confidence: f64,
    pub is_active: bool,
    pub is_paused: bool,
    pub start_time: Option<Timestamp>,
    pub pause_time: Option<Timestamp>,
    /// Accumulated pause, in milliseconds
    pub total_paused_ms: u64,
    /// Whole seconds of active time, refreshed by [`Session::tick`]
    pub elapsed_time: u64,
    pub rep_count: u32,
    pub progress: f64,
    pub rep_times: Vec<f64>,
    pub last_rep_time: Option<Timestamp>,
    pub avg_time_per_rep: f64,
    pub form_score: u8,
    pub feedback_messages: Vec<FeedbackMessage>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_exercise: Exercise::default(),
            target_reps: DEFAULT_TARGET_REPS,
            detection_confidence: DEFAULT_CONFIDENCE,
            is_active: false,
            is_paused: false,
            start_time: None,
            pause_time: None,
            total_paused_ms: 0,
            elapsed_time: 0,
            rep_count: 0,
            progress: 0.0,
            rep_times: Vec::new(),
            last_rep_time: None,
            avg_time_per_rep: 0.0,
            form_score: 0,
            feedback_messages: Vec::new(),
        }
    }
}

impl SessionState {
    /// True while reps are being counted
    pub fn is_running(&self) -> bool {
        self.is_active && !self.is_paused
    }

    /// Rough calorie estimate shown next to the camera view, 0.35 per
    /// rep rounded half up
    pub fn calories(&self) -> u32 {
        (self.rep_count * 35 + 50) / 100
    }
}

/// What a call to [`Session::complete_rep`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepOutcome {
    /// Session inactive, paused, or never started
    Ignored,
    /// Rep recorded; `secs` is how long it took
    Counted { secs: f64 },
    /// Rep recorded and the target was reached, so the session stopped
    Completed { secs: f64 },
}

pub fn progress_for(rep_count: u32, target_reps: u32) -> f64 {
    if target_reps == 0 {
        return 100.0;
    }
    (rep_count as f64 / target_reps as f64 * 100.0).min(100.0)
}

pub fn validate_target_reps(reps: u32) -> Result<u32, SettingsError> {
    if reps >= 1 {
        Ok(reps)
    } else {
        Err(SettingsError::InvalidTargetReps(reps))
    }
}

pub fn validate_confidence(confidence: f64) -> Result<f64, SettingsError> {
    // Tolerate float noise from 0.1 steps
    const EPS: f64 = 1e-9;
    if (MIN_CONFIDENCE - EPS..=MAX_CONFIDENCE + EPS).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(SettingsError::InvalidConfidence(confidence))
    }
}

/// The session store
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock, S: FormScorer = RandomFormScorer> {
    state: SessionState,
    clock: C,
    scorer: S,
}

impl Session<SystemClock, RandomFormScorer> {
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock, RandomFormScorer::new())
    }
}

impl<C: Clock, S: FormScorer> Session<C, S> {
    pub fn new(clock: C, scorer: S) -> Self {
        Self {
            state: SessionState::default(),
            clock,
            scorer,
        }
    }

    pub fn with_state(state: SessionState, clock: C, scorer: S) -> Self {
        Self {
            state,
            clock,
            scorer,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn set_selected_exercise(&mut self, exercise: Exercise) {
        self.state.selected_exercise = exercise;
    }

    pub fn set_target_reps(&mut self, reps: u32) -> Result<(), SettingsError> {
        self.state.target_reps = validate_target_reps(reps)?;
        Ok(())
    }

    pub fn set_detection_confidence(&mut self, confidence: f64) -> Result<(), SettingsError> {
        self.state.detection_confidence = validate_confidence(confidence)?;
        Ok(())
    }

    /// Begin (or restart) a session
    pub fn start_exercise(&mut self) {
        let now = self.clock.now();
        let exercise = self.state.selected_exercise.to_string();

        self.state.is_active = true;
        self.state.is_paused = false;
        self.state.start_time = Some(now);
        self.state.rep_count = 0;
        self.state.progress = 0.0;
        self.state.elapsed_time = 0;
        self.state.total_paused_ms = 0;
        self.state.rep_times.clear();
        self.state.last_rep_time = Some(now);
        self.state.feedback_messages = vec![feedback::start_message(&exercise, now)];

        info!(
            exercise = %exercise,
            target_reps = self.state.target_reps,
            "session started"
        );
    }

    pub fn pause_exercise(&mut self) {
        self.state.is_paused = true;
        self.state.pause_time = Some(self.clock.now());
        debug!(elapsed = self.state.elapsed_time, "session paused");
    }

    pub fn resume_exercise(&mut self) {
        let now = self.clock.now();
        let additional = self
            .state
            .pause_time
            .map(|paused_at| time_diff_ms(paused_at, now))
            .unwrap_or(0);

        self.state.is_paused = false;
        self.state.pause_time = None;
        self.state.total_paused_ms += additional;
        debug!(
            paused_ms = additional,
            total_paused_ms = self.state.total_paused_ms,
            "session resumed"
        );
    }

    pub fn stop_exercise(&mut self) {
        let now = self.clock.now();

        self.state.is_active = false;
        self.state.is_paused = false;
        self.state.start_time = None;
        self.state.pause_time = None;

        if let Some(avg) = mean(&self.state.rep_times) {
            self.state.avg_time_per_rep = round_tenth(avg);
        }
        self.state.form_score = self.scorer.score(&self.state);

        let exercise = self.state.selected_exercise.to_string();
        self.state
            .feedback_messages
            .push(feedback::completion_message(self.state.rep_count, &exercise, now));

        info!(
            reps = self.state.rep_count,
            avg_time_per_rep = self.state.avg_time_per_rep,
            form_score = self.state.form_score,
            "session stopped"
        );
    }

    /// Record one rep.
    ///
    /// Whether this rep finishes the session is decided from the count
    /// before the rep is applied (`rep_count + 1 >= target_reps`); the stop
    /// then runs against the committed rep.
    pub fn complete_rep(&mut self) -> RepOutcome {
        if !self.state.is_active || self.state.is_paused {
            return RepOutcome::Ignored;
        }
        let Some(last_rep_time) = self.state.last_rep_time else {
            return RepOutcome::Ignored;
        };

        let reaches_target = self.state.rep_count + 1 >= self.state.target_reps;

        let now = self.clock.now();
        let rep_secs = time_diff_ms(last_rep_time, now) as f64 / 1000.0;

        self.state.rep_count += 1;
        self.state.progress = progress_for(self.state.rep_count, self.state.target_reps);
        self.state.rep_times.push(rep_secs);
        if let Some(avg) = mean(&self.state.rep_times) {
            self.state.avg_time_per_rep = round_tenth(avg);
        }
        self.state.last_rep_time = Some(now);
        self.state
            .feedback_messages
            .push(feedback::rep_feedback(rep_secs, now));

        debug!(
            rep = self.state.rep_count,
            secs = rep_secs,
            "rep completed"
        );

        if reaches_target {
            self.stop_exercise();
            RepOutcome::Completed { secs: rep_secs }
        } else {
            RepOutcome::Counted { secs: rep_secs }
        }
    }

    /// Whole seconds of active time at `now`, excluding finished pauses
    /// and the one in progress
    pub fn elapsed_at(&self, now: Timestamp) -> u64 {
        let Some(start) = self.state.start_time else {
            return self.state.elapsed_time;
        };
        let ongoing = self
            .state
            .pause_time
            .map(|paused_at| time_diff_ms(paused_at, now))
            .unwrap_or(0);
        time_diff_ms(start, now)
            .saturating_sub(self.state.total_paused_ms)
            .saturating_sub(ongoing)
            / 1000
    }

    /// Refresh `elapsed_time` from the clock. Does nothing unless the
    /// session is running.
    pub fn tick(&mut self) {
        if self.state.is_running() && self.state.start_time.is_some() {
            self.state.elapsed_time = self.elapsed_at(self.clock.now());
        }
    }

    /// Time accumulated in the current pause, if paused
    pub fn current_pause(&self) -> Option<Duration> {
        self.state
            .pause_time
            .map(|paused_at| self.clock.now() - paused_at)
    }
}

impl Default for Session<SystemClock, RandomFormScorer> {
    fn default() -> Self {
        Self::with_system_clock()
    }
}
