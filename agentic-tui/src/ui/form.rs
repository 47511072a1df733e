use agentic_core::ViewState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Focus};
use crate::ui::spinner::Spinner;

pub const PROMPT_ROWS: u16 = 3;

pub fn render_prompt(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let theme = app.theme();
    let focused = app.focus == Focus::Prompt;

    let mut text = state.prompt().to_string();
    if focused {
        text.push('▏');
    }

    // Keep the tail of a long prompt visible, like a textarea that follows
    // the caret.
    let line_count = text.lines().count().max(1) as u16;
    let scroll = line_count.saturating_sub(PROMPT_ROWS);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.foreground))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused))
                .title(Span::styled(" Initial Prompt ", theme.title_style())),
        );

    f.render_widget(paragraph, area);
}

pub fn render_controls(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(24)])
        .split(area);

    render_rounds(f, app, chunks[0]);
    render_trigger(f, app, state, chunks[1]);
}

fn render_rounds(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let focused = app.focus == Focus::Rounds;

    let border_style = if app.rounds_valid() {
        theme.border_style(focused)
    } else {
        Style::default().fg(theme.error)
    };

    let mut value = app.rounds_input.clone();
    if focused {
        value.push('▏');
    }

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(value, Style::default().fg(theme.foreground)),
        Span::styled("  ↑↓", theme.muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Rounds (min 1) ", theme.title_style())),
    );

    f.render_widget(paragraph, area);
}

fn render_trigger(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let theme = app.theme();
    let focused = app.focus == Focus::Trigger;

    let label = if state.is_loading() {
        format!(
            "{} {}",
            Spinner::new().frame(app.animation_tick),
            state.trigger_label()
        )
    } else {
        format!("▶ {}", state.trigger_label())
    };

    // Disabled while running: dimmed and not highlighted even when focused.
    let style = if state.is_loading() {
        theme.muted()
    } else if focused {
        Style::default()
            .fg(theme.background)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused && !state.is_loading())),
        );

    f.render_widget(paragraph, area);
}
