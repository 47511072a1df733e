use agentic_core::{Message, ViewState, EMPTY_TRANSCRIPT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Focus};
use crate::theme::Theme;

/// Header line, one line per body line, then a blank separator.
pub fn message_lines(message: &Message, theme: &Theme) -> Vec<Line<'static>> {
    let is_system = message.is_system();
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(message.from.clone(), theme.sender_style(is_system)),
        Span::styled(" → ", theme.muted()),
        Span::styled(message.to.display(), theme.sender_style(is_system)),
    ]));

    for body_line in message.body().lines() {
        lines.push(Line::from(Span::styled(
            format!("  {}", body_line),
            theme.body_style(is_system),
        )));
    }

    lines.push(Line::from(""));
    lines
}

pub fn transcript_lines(conversation: &[Message], theme: &Theme) -> Vec<Line<'static>> {
    conversation
        .iter()
        .flat_map(|m| message_lines(m, theme))
        .collect()
}

/// Number of unwrapped lines the transcript occupies.
pub fn line_count(conversation: &[Message]) -> usize {
    conversation
        .iter()
        .map(|m| 2 + m.body().lines().count())
        .sum()
}

pub fn render(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let theme = app.theme();
    let conversation = state.conversation();

    let title = if conversation.is_empty() {
        " Conversation ".to_string()
    } else {
        format!(" Conversation ({}) ", conversation.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(app.focus == Focus::Transcript))
        .title(Span::styled(title, theme.title_style()));

    let paragraph = if conversation.is_empty() {
        Paragraph::new(Line::from(Span::styled(EMPTY_TRANSCRIPT, theme.muted())))
            .block(block)
            .alignment(Alignment::Center)
    } else {
        Paragraph::new(transcript_lines(conversation, theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.transcript_scroll, 0))
    };

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::tokyo_night;
    use agentic_core::{Recipient, Response};
    use serde_json::json;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_joins_recipients() {
        let message = Message::new(
            "CEO",
            Recipient::Multiple(vec!["CTO".to_string(), "CFO".to_string()]),
            Response::Text("Go.".to_string()),
        );
        let lines = message_lines(&message, &tokyo_night());
        assert_eq!(line_text(&lines[0]), "CEO → CTO, CFO");
        assert_eq!(line_text(&lines[1]), "  Go.");
    }

    #[test]
    fn test_structured_body_spans_lines() {
        let message = Message::new(
            "CTO",
            Recipient::Single("CEO".to_string()),
            Response::Structured(json!({"steps": 3})),
        );
        let lines = message_lines(&message, &tokyo_night());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text, vec!["CTO → CEO", "  {", "    \"steps\": 3", "  }", ""]);
        assert_eq!(line_count(&[message]), 5);
    }

    #[test]
    fn test_system_message_is_styled_apart() {
        let theme = tokyo_night();
        let lines = message_lines(&Message::system_error("network down"), &theme);
        assert_eq!(lines[0].spans[0].style.fg, Some(theme.error));
        assert_eq!(line_text(&lines[1]), "  Error: network down");
    }
}
