use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::exercise::Exercise;
use crate::pose::JOINT_REFERENCE;
use crate::ui::{bold, dim, View};

/// Exercise picker, session settings, start button, and reference cards
pub fn render(view: &View, area: Rect, buf: &mut Buffer) {
    let state = view.state;
    let locked = state.is_active;
    let setting_style = if locked { dim() } else { Style::default() };

    let mut lines: Vec<Line> = Exercise::ALL
        .iter()
        .map(|exercise| {
            if *exercise == state.selected_exercise {
                Line::from(Span::styled(
                    format!("> {exercise}"),
                    bold().fg(Color::Cyan),
                ))
            } else {
                Line::from(Span::styled(format!("  {exercise}"), setting_style))
            }
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("Target reps: {}", state.target_reps), setting_style),
        Span::styled(" (+/-)", dim()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(
            format!("Confidence: {:.1}", state.detection_confidence),
            setting_style,
        ),
        Span::styled(" ([/])", dim()),
    ]));
    lines.push(Line::default());

    lines.push(if locked {
        Line::from(Span::styled("Exercise in progress", dim()))
    } else {
        Line::from(Span::styled(
            "[Enter] Start Exercise",
            bold().fg(Color::Green),
        ))
    });

    if let Some(status) = view.status {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Exercise Information", bold())));
    lines.extend(
        state
            .selected_exercise
            .form_cues()
            .iter()
            .map(|cue| Line::from(format!("- {cue}"))),
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Joint IDs", bold())));
    lines.extend(
        JOINT_REFERENCE
            .iter()
            .map(|entry| Line::from(Span::styled(*entry, dim()))),
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(c)oords / (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Exercise "))
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
