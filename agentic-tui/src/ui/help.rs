use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::Theme;

const KEYBINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("Tab / Shift+Tab", "Move between fields"),
            ("Ctrl+R / F5", "Start simulation"),
            ("Ctrl+T", "Cycle theme"),
            ("F1", "Toggle this help"),
            ("Esc / Ctrl+C", "Quit"),
        ],
    ),
    (
        "Prompt",
        &[
            ("Enter", "New line"),
            ("Backspace", "Delete character"),
            ("Ctrl+U", "Clear prompt"),
        ],
    ),
    (
        "Rounds",
        &[
            ("0-9", "Edit value"),
            ("↑ / +", "Increase"),
            ("↓", "Decrease"),
            ("Enter", "Start simulation"),
        ],
    ),
    (
        "Conversation",
        &[
            ("j / k", "Scroll"),
            ("PgUp / PgDn", "Scroll a page"),
            ("g / G", "Top / bottom"),
            ("r", "Start simulation"),
            ("q", "Quit"),
        ],
    ),
];

/// Centered rectangle taking the given percentages of `screen`, never
/// smaller than 20x10.
pub fn centered_rect(screen: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (screen.width as u32 * width_percent as u32 / 100) as u16;
    let height = (screen.height as u32 * height_percent as u32 / 100) as u16;

    let width = width.max(20).min(screen.width);
    let height = height.max(10).min(screen.height);

    let x = screen.x + (screen.width.saturating_sub(width)) / 2;
    let y = screen.y + (screen.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width, height)
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (section, bindings) in KEYBINDINGS {
        lines.push(Line::from(Span::styled(
            section.to_string(),
            theme.title_style(),
        )));
        for (key, desc) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<18}", key),
                    Style::default()
                        .fg(theme.accent_secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc.to_string(), Style::default().fg(theme.foreground)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}

pub fn render(f: &mut Frame, theme: &Theme, screen: Rect) {
    let area = centered_rect(screen, 60, 70);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(theme.title_style())
        .style(Style::default().bg(theme.background));

    let paragraph = Paragraph::new(help_lines(theme))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
