use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Focus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Run,
    NextFocus,
    PrevFocus,
    InsertChar(char),
    InsertNewline,
    DeleteChar,
    ClearField,
    IncrementRounds,
    DecrementRounds,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleHelp,
    CycleTheme,
    None,
}

/// Maps key presses to actions. Which keys mean what depends on the focused
/// field: in the prompt editor every printable key is text.
pub struct EventHandler {
    help_open: bool,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self { help_open: false }
    }

    pub fn set_help_open(&mut self, open: bool) {
        self.help_open = open;
    }

    pub fn handle_key(&self, key: KeyEvent, focus: Focus) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.help_open {
            return match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Action::ToggleHelp
                }
                KeyCode::Char('c') if ctrl => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('r') if ctrl => return Action::Run,
            KeyCode::Char('t') if ctrl => return Action::CycleTheme,
            KeyCode::F(5) => return Action::Run,
            KeyCode::F(1) => return Action::ToggleHelp,
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab => return Action::NextFocus,
            KeyCode::BackTab => return Action::PrevFocus,
            _ => {}
        }

        match focus {
            Focus::Prompt => self.prompt_key(key, ctrl),
            Focus::Rounds => self.rounds_key(key),
            Focus::Trigger => self.trigger_key(key),
            Focus::Transcript => self.transcript_key(key),
        }
    }

    fn prompt_key(&self, key: KeyEvent, ctrl: bool) -> Action {
        match key.code {
            KeyCode::Char('u') if ctrl => Action::ClearField,
            KeyCode::Char(c) if !ctrl => Action::InsertChar(c),
            KeyCode::Enter => Action::InsertNewline,
            KeyCode::Backspace => Action::DeleteChar,
            _ => Action::None,
        }
    }

    fn rounds_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => Action::InsertChar(c),
            KeyCode::Backspace => Action::DeleteChar,
            KeyCode::Up | KeyCode::Char('+') => Action::IncrementRounds,
            KeyCode::Down => Action::DecrementRounds,
            KeyCode::Enter => Action::Run,
            _ => Action::None,
        }
    }

    fn trigger_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::Run,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    fn transcript_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::Top,
            KeyCode::Char('G') | KeyCode::End => Action::Bottom,
            KeyCode::Char('r') => Action::Run,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}
