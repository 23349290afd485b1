use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::SessionState;
use crate::ui::{bold, dim};

const DIALOG_HEIGHT: u16 = 7;

pub fn question(state: &SessionState) -> String {
    format!(
        "Are you ready to begin {} for {} reps?",
        state.selected_exercise, state.target_reps
    )
}

/// Centre a `width` x `height` box inside `area`, shrinking it to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Start confirmation drawn on top of whatever is already in `buf`
pub fn render(state: &SessionState, area: Rect, buf: &mut Buffer) {
    let question = question(state);
    let popup = centered(area, question.width() as u16 + 6, DIALOG_HEIGHT);

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::default(),
        Line::from(question),
        Line::default(),
        Line::from(vec![
            Span::styled("(n) Cancel", dim()),
            Span::raw("    "),
            Span::styled("(y) Start Now", bold().fg(Color::Green)),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Start Exercise "),
    )
    .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Exercise;
    use crate::ui::test_support::rows;

    #[test]
    fn question_names_exercise_and_target() {
        let state = SessionState {
            selected_exercise: Exercise::JumpingJacks,
            target_reps: 25,
            ..SessionState::default()
        };
        assert_eq!(
            question(&state),
            "Are you ready to begin Jumping Jacks for 25 reps?"
        );
    }

    #[test]
    fn centered_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 40, 6), Rect::new(20, 9, 40, 6));
        assert_eq!(centered(area, 200, 60), area);
    }

    #[test]
    fn renders_buttons() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render(&SessionState::default(), area, &mut buf);
        let text = rows(&buf);
        assert!(text.contains("Are you ready to begin Push-ups for 10 reps?"));
        assert!(text.contains("(n) Cancel    (y) Start Now"));
    }
}
