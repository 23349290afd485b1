//! View state for the trainer: the session store plus everything the
//! screen needs around it (camera, start dialog, timers, sidebar toggles).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::camera::{Camera, CameraRequest};
use crate::clock::{Clock, SystemClock};
use crate::config::{step_confidence, step_target_reps, validate_simulate_every, Config};
use crate::error::SettingsError;
use crate::scoring::{FormScorer, RandomFormScorer};
use crate::session::{RepOutcome, Session};
use crate::timer::Interval;

/// Elapsed time is recomputed on this cadence
pub const ELAPSED_REFRESH_SECS: f64 = 1.0;

#[derive(Debug)]
pub struct App<C: Clock = SystemClock, S: FormScorer = RandomFormScorer> {
    pub session: Session<C, S>,
    pub camera: Camera,
    camera_request: Option<CameraRequest>,
    pub confirm_open: bool,
    pub show_coordinates: bool,
    pub status: Option<String>,
    pub should_quit: bool,
    elapsed_timer: Interval,
    rep_simulator: Option<Interval>,
}

impl<C: Clock, S: FormScorer> App<C, S> {
    /// Build an app whose store starts from `config`'s sidebar values
    pub fn new(mut session: Session<C, S>, config: &Config) -> Result<Self, SettingsError> {
        session.set_selected_exercise(config.exercise);
        session.set_target_reps(config.target_reps)?;
        session.set_detection_confidence(config.detection_confidence)?;
        let simulate_every = config
            .simulate_every_secs
            .map(validate_simulate_every)
            .transpose()?;

        Ok(Self {
            session,
            camera: Camera::default(),
            camera_request: None,
            confirm_open: false,
            show_coordinates: config.show_coordinates,
            status: None,
            should_quit: false,
            elapsed_timer: Interval::every_secs_f64(ELAPSED_REFRESH_SECS),
            rep_simulator: simulate_every.map(Interval::every_secs_f64),
        })
    }

    pub fn attach_camera(&mut self, request: CameraRequest) {
        self.camera_request = Some(request);
    }

    pub fn simulates_reps(&self) -> bool {
        self.rep_simulator.is_some()
    }

    pub fn timers_armed(&self) -> bool {
        self.elapsed_timer.is_armed()
            || self
                .rep_simulator
                .as_ref()
                .is_some_and(|sim| sim.is_armed())
    }

    /// Arm timers while the session runs; cancel them otherwise
    fn sync_timers(&mut self) {
        let now = self.session.now();
        if self.session.state().is_running() {
            self.elapsed_timer.ensure_armed(now);
            if let Some(sim) = self.rep_simulator.as_mut() {
                sim.ensure_armed(now);
            }
        } else {
            self.elapsed_timer.cancel();
            if let Some(sim) = self.rep_simulator.as_mut() {
                sim.cancel();
            }
        }
    }

    fn cancel_timers(&mut self) {
        self.elapsed_timer.cancel();
        if let Some(sim) = self.rep_simulator.as_mut() {
            sim.cancel();
        }
    }

    /// Start intent from the sidebar: ask for confirmation first
    pub fn request_start(&mut self) {
        if !self.session.state().is_active {
            self.confirm_open = true;
        }
    }

    pub fn cancel_start(&mut self) {
        self.confirm_open = false;
    }

    pub fn confirm_start(&mut self) {
        self.confirm_open = false;
        self.status = None;
        self.cancel_timers();
        self.session.start_exercise();
        self.sync_timers();
    }

    pub fn toggle_pause(&mut self) {
        let state = self.session.state();
        if !state.is_active {
            return;
        }
        if state.is_paused {
            self.session.resume_exercise();
        } else {
            self.session.pause_exercise();
        }
        self.sync_timers();
    }

    pub fn simulate_rep(&mut self) -> RepOutcome {
        let outcome = self.session.complete_rep();
        self.sync_timers();
        outcome
    }

    pub fn stop(&mut self) {
        if self.session.state().is_active {
            self.session.stop_exercise();
        }
        self.sync_timers();
    }

    fn adjust_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Session<C, S>) -> Result<(), SettingsError>,
    {
        if self.session.state().is_active {
            return;
        }
        match f(&mut self.session) {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!(error = %e, "rejected setting");
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn next_exercise(&mut self, forward: bool) {
        self.adjust_settings(|s| {
            let current = s.state().selected_exercise;
            s.set_selected_exercise(if forward {
                current.next()
            } else {
                current.previous()
            });
            Ok(())
        });
    }

    pub fn step_target_reps(&mut self, up: bool) {
        self.adjust_settings(|s| s.set_target_reps(step_target_reps(s.state().target_reps, up)));
    }

    pub fn step_confidence(&mut self, up: bool) {
        self.adjust_settings(|s| {
            s.set_detection_confidence(step_confidence(s.state().detection_confidence, up))
        });
    }

    /// Periodic work: camera resolution and timer callbacks
    pub fn on_tick(&mut self) {
        if let Some(request) = self.camera_request.as_mut() {
            if let Some(result) = request.try_resolve() {
                self.camera.resolve(result);
                self.camera_request = None;
            }
        }

        let now = self.session.now();
        if self.elapsed_timer.poll(now) > 0 {
            self.session.tick();
        }

        // Periods missed during a stall collapse into one rep so that no
        // rep is recorded with a zero duration
        let due = self
            .rep_simulator
            .as_mut()
            .map(|sim| sim.poll(now))
            .unwrap_or(0);
        if due > 0 && self.session.state().is_running() {
            self.session.complete_rep();
        }

        self.sync_timers();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.confirm_open {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_start(),
                KeyCode::Char('n') | KeyCode::Esc => self.cancel_start(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.next_exercise(false),
            KeyCode::Down => self.next_exercise(true),
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_target_reps(true),
            KeyCode::Char('-') => self.step_target_reps(false),
            KeyCode::Char(']') => self.step_confidence(true),
            KeyCode::Char('[') => self.step_confidence(false),
            KeyCode::Enter => self.request_start(),
            KeyCode::Char('p') => self.toggle_pause(),
            KeyCode::Char(' ') => {
                let outcome = self.simulate_rep();
                debug!(?outcome, "manual rep");
            }
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('c') => self.show_coordinates = !self.show_coordinates,
            _ => {}
        }
    }

    /// Release everything that could outlive the screen
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.camera_request = None;
        self.camera.release();
    }
}

impl<C: Clock, S: FormScorer> Drop for App<C, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
