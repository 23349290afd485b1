use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Bone, Points},
        Block, Borders, Gauge, Paragraph, Widget, Wrap,
    },
};

use crate::camera::CameraStatus;
use crate::pose::{canvas_y, joint_label, CONNECTIONS, FRAME_HEIGHT, FRAME_WIDTH, JOINTS};
use crate::scoring::FormGrade;
use crate::session::SessionState;
use crate::ui::{bold, dim, grade_color, View};
use crate::util::format_time;

pub fn render(view: &View, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(" Camera ");
    let inner = block.inner(area);
    block.render(area, buf);

    if let CameraStatus::Denied(reason) = view.camera {
        render_denied(reason, inner, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // exercise / reps / time overlay
            Constraint::Length(1), // confidence
            Constraint::Min(3),    // frame
            Constraint::Length(1), // progress bar
            Constraint::Length(1), // progress text and timer
            Constraint::Length(1), // controls
            Constraint::Length(1), // metrics
        ])
        .split(inner);

    let state = view.state;

    if state.is_active {
        let mut header = vec![
            Span::styled(state.selected_exercise.to_string(), bold()),
            Span::raw(format!("  Reps: {}/{}", state.rep_count, state.target_reps)),
            Span::raw(format!("  {}", format_time(state.elapsed_time))),
        ];
        if state.is_paused {
            header.push(Span::styled("  PAUSED", bold().fg(Color::Yellow)));
        }
        Paragraph::new(Line::from(header)).render(chunks[0], buf);
    }

    Paragraph::new(Span::styled(
        format!(
            "Detection confidence: {:.0}%",
            state.detection_confidence * 100.0
        ),
        dim(),
    ))
    .render(chunks[1], buf);

    match view.camera {
        CameraStatus::Initializing => {
            Paragraph::new(Span::styled("Initializing camera...", dim()))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }
        CameraStatus::Granted(_) if state.is_active => {
            render_skeleton(view.show_coordinates, chunks[2], buf);
        }
        CameraStatus::Granted(label) => {
            Paragraph::new(vec![
                Line::from(Span::styled(format!("Camera ready: {label}"), dim())),
                Line::from("Select an exercise and press Enter to start"),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
        }
        CameraStatus::Denied(_) => {}
    }

    let ratio = (state.progress / 100.0).clamp(0.0, 1.0);
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{:.0}%", state.progress))
        .render(chunks[3], buf);

    Paragraph::new(format!(
        "{} / {} reps   Time: {}",
        state.rep_count,
        state.target_reps,
        format_time(state.elapsed_time)
    ))
    .render(chunks[4], buf);

    Paragraph::new(Span::styled(controls_hint(state), dim())).render(chunks[5], buf);

    render_metrics(state, chunks[6], buf);
}

fn controls_hint(state: &SessionState) -> &'static str {
    match (state.is_active, state.is_paused) {
        (true, true) => "(p) resume / (s)top",
        (true, false) => "(p)ause / (space) rep / (s)top",
        (false, _) => "(enter) start",
    }
}

fn render_metrics(state: &SessionState, area: Rect, buf: &mut Buffer) {
    let score = if state.form_score == 0 {
        Span::styled("Form: --", dim())
    } else {
        let grade = FormGrade::from_score(state.form_score);
        Span::styled(
            format!("Form: {}%", state.form_score),
            Style::default().fg(grade_color(grade)),
        )
    };

    Paragraph::new(Line::from(vec![
        Span::raw(format!("Avg/rep: {:.1}s  ", state.avg_time_per_rep)),
        score,
        Span::raw(format!("  Calories: {}", state.calories())),
    ]))
    .render(area, buf);
}

fn render_denied(reason: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(Span::styled("Camera Access Required", bold().fg(Color::Red))),
        Line::default(),
        Line::from(reason.to_string()),
        Line::default(),
        Line::from(Span::styled(
            "Please allow camera access to use the exercise tracker.",
            dim(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(area, buf);
}

fn render_skeleton(show_coordinates: bool, area: Rect, buf: &mut Buffer) {
    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, FRAME_WIDTH])
        .y_bounds([0.0, FRAME_HEIGHT])
        .paint(|ctx| {
            for &(from, to) in CONNECTIONS.iter() {
                let (a, b) = (JOINTS[from], JOINTS[to]);
                ctx.draw(&Bone::new(
                    a.x,
                    canvas_y(a.y),
                    b.x,
                    canvas_y(b.y),
                    Color::Green,
                ));
            }

            let coords: Vec<(f64, f64)> = JOINTS.iter().map(|j| (j.x, canvas_y(j.y))).collect();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Red,
            });

            if show_coordinates {
                for (idx, joint) in JOINTS.iter().enumerate() {
                    ctx.print(
                        joint.x,
                        canvas_y(joint.y),
                        Span::styled(joint_label(idx, joint), Style::default().fg(Color::White)),
                    );
                }
            }
        })
        .render(area, buf);
}
