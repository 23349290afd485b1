pub mod camera_view;
pub mod charting;
pub mod dialog;
pub mod feedback_panel;
pub mod sidebar;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::app::App;
use crate::camera::CameraStatus;
use crate::clock::{Clock, Timestamp};
use crate::scoring::{FormGrade, FormScorer};
use crate::session::SessionState;

const SIDEBAR_WIDTH: u16 = 30;
const FEEDBACK_WIDTH: u16 = 38;

/// Everything a panel needs to draw itself, borrowed from the app
pub struct View<'a> {
    pub state: &'a SessionState,
    pub camera: &'a CameraStatus,
    pub show_coordinates: bool,
    pub status: Option<&'a str>,
    pub now: Timestamp,
}

impl<'a, C: Clock, S: FormScorer> From<&'a App<C, S>> for View<'a> {
    fn from(app: &'a App<C, S>) -> Self {
        Self {
            state: app.session.state(),
            camera: app.camera.status(),
            show_coordinates: app.show_coordinates,
            status: app.status.as_deref(),
            now: app.session.now(),
        }
    }
}

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn grade_color(grade: FormGrade) -> Color {
    match grade {
        FormGrade::Excellent => Color::Green,
        FormGrade::Good => Color::Yellow,
        FormGrade::NeedsImprovement => Color::Red,
    }
}

impl<C: Clock, S: FormScorer> Widget for &App<C, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = View::from(self);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH),
                Constraint::Min(20),
                Constraint::Length(FEEDBACK_WIDTH),
            ])
            .split(area);

        sidebar::render(&view, chunks[0], buf);
        camera_view::render(&view, chunks[1], buf);
        feedback_panel::render(&view, chunks[2], buf);

        if self.confirm_open {
            dialog::render(view.state, area, buf);
        }
    }
}
