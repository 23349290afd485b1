use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};

use crate::feedback::{age_secs, visible_messages, FeedbackMessage, MAX_VISIBLE};
use crate::scoring::FormGrade;
use crate::session::SessionState;
use crate::ui::charting::{compute_chart_params, format_label, rep_time_points};
use crate::ui::{bold, dim, grade_color, View};

pub fn render(view: &View, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MAX_VISIBLE as u16 * 2 + 2),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(area);

    render_messages(view, chunks[0], buf);
    render_metrics(view.state, chunks[1], buf);
    render_rep_chart(view.state, chunks[2], buf);
}

fn message_line<'a>(msg: &'a FeedbackMessage, age: u64) -> Line<'a> {
    let (marker, color) = if msg.is_warning() {
        ("! ", Color::Yellow)
    } else {
        ("+ ", Color::Green)
    };
    Line::from(vec![
        Span::styled(marker, bold().fg(color)),
        Span::styled(msg.message.as_str(), Style::default().fg(color)),
        Span::styled(format!(" ({age}s ago)"), dim()),
    ])
}

fn render_messages(view: &View, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Real-time Feedback ");

    let visible = visible_messages(&view.state.feedback_messages, view.now);
    let lines: Vec<Line> = if visible.is_empty() {
        vec![Line::from(Span::styled(
            "Waiting for feedback...",
            dim().add_modifier(Modifier::ITALIC),
        ))]
    } else {
        visible
            .into_iter()
            .map(|msg| message_line(msg, age_secs(msg, view.now)))
            .collect()
    };

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_metrics(state: &SessionState, area: Rect, buf: &mut Buffer) {
    let form = if state.form_score == 0 {
        Line::from(vec![
            Span::raw("Form quality: "),
            Span::styled("--", dim()),
        ])
    } else {
        let grade = FormGrade::from_score(state.form_score);
        Line::from(vec![
            Span::raw("Form quality: "),
            Span::styled(
                format!("{}% ({grade})", state.form_score),
                bold().fg(grade_color(grade)),
            ),
        ])
    };

    Paragraph::new(vec![
        Line::from(format!("Reps completed: {}", state.rep_count)),
        Line::from(format!(
            "Average time per rep: {:.1}s",
            state.avg_time_per_rep
        )),
        form,
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Performance Metrics "),
    )
    .render(area, buf);
}

fn render_rep_chart(state: &SessionState, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(" Rep Times ");

    if state.rep_times.is_empty() {
        Paragraph::new(Span::styled("No reps yet", dim()))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
        return;
    }

    let points = rep_time_points(&state.rep_times);
    let (last_rep, slowest) = compute_chart_params(&state.rep_times);
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("rep")
                .bounds([1.0, last_rep])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(format_label(last_rep), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("sec")
                .bounds([0.0, slowest])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(format_label(slowest), bold()),
                ]),
        )
        .render(area, buf);
}
