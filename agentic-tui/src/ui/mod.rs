pub mod form;
pub mod help;
pub mod spinner;
pub mod status;
pub mod transcript;

use agentic_core::ViewState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, state: &ViewState) {
    let theme = app.theme();
    let size = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.foreground)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(form::PROMPT_ROWS + 2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, app, chunks[0]);
    form::render_prompt(f, app, state, chunks[1]);
    form::render_controls(f, app, state, chunks[2]);
    transcript::render(f, app, state, chunks[3]);
    status::render(f, app, state, chunks[4]);

    if app.show_help {
        help::render(f, theme, size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Agentic Startup ", theme.title_style()),
        Span::styled("│ Simulation ", Style::default().fg(theme.foreground)),
        Span::styled(format!("│ {}", app.view.endpoint()), theme.muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(false)),
    );

    f.render_widget(header, area);
}
