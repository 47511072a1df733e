mod palettes;

use ratatui::style::{Color, Modifier, Style};

pub use palettes::{catppuccin_mocha, nord, tokyo_night};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub border: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Header line of a transcript entry. System messages get their own
    /// colour so failures stand out from agent chatter.
    pub fn sender_style(&self, is_system: bool) -> Style {
        let fg = if is_system { self.error } else { self.accent_secondary };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn body_style(&self, is_system: bool) -> Style {
        if is_system {
            Style::default().fg(self.warning)
        } else {
            Style::default().fg(self.foreground)
        }
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.foreground_dim)
    }
}

pub fn hex_to_color(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Color::Rgb(r, g, b)
}

pub struct ThemeManager {
    themes: Vec<Theme>,
    current_index: usize,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            themes: vec![tokyo_night(), catppuccin_mocha(), nord()],
            current_index: 0,
        }
    }

    pub fn current(&self) -> &Theme {
        &self.themes[self.current_index]
    }

    pub fn cycle(&mut self) {
        self.current_index = (self.current_index + 1) % self.themes.len();
    }

    /// Case-insensitive; returns false and keeps the current theme when the
    /// name is unknown.
    pub fn set_by_name(&mut self, name: &str) -> bool {
        match self
            .themes
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.current_index = index;
                true
            }
            None => false,
        }
    }

    pub fn available(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.name).collect()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color(0x1a1b26), Color::Rgb(0x1a, 0x1b, 0x26));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut manager = ThemeManager::new();
        let first = manager.current().name;
        for _ in 0..manager.available().len() {
            manager.cycle();
        }
        assert_eq!(manager.current().name, first);
    }

    #[test]
    fn test_set_by_name() {
        let mut manager = ThemeManager::new();
        assert!(manager.set_by_name("nord"));
        assert_eq!(manager.current().name, "Nord");
        assert!(!manager.set_by_name("Solarized"));
        assert_eq!(manager.current().name, "Nord");
    }

    #[test]
    fn test_system_sender_uses_error_color() {
        let theme = tokyo_night();
        assert_eq!(theme.sender_style(true).fg, Some(theme.error));
        assert_eq!(theme.sender_style(false).fg, Some(theme.accent_secondary));
    }
}
