use agentic_core::ViewState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let keybinds = [
        ("Tab", "Field"),
        ("F5", "Run"),
        ("^T", "Theme"),
        ("F1", "Help"),
        ("Esc", "Quit"),
    ];

    let keybind_spans: Vec<Span> = keybinds
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!(" {key}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(":{desc} "), theme.muted()),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(keybind_spans)), chunks[0]);

    let (text, style) = if let Some(ref err) = app.rounds_error {
        (err.clone(), Style::default().fg(theme.error))
    } else if let Some(ref message) = app.status_message {
        (message.clone(), theme.muted())
    } else if state.is_loading() {
        (
            format!("Waiting on {}", app.view.endpoint()),
            Style::default().fg(theme.warning),
        )
    } else if let Some(summary) = state.last_run() {
        let style = if summary.is_failure() {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.success)
        };
        (summary.status_line(), style)
    } else {
        ("Ready".to_string(), theme.muted())
    };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{text} "), style)))
            .alignment(Alignment::Right),
        chunks[1],
    );
}
