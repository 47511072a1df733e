use super::{hex_to_color, Theme};

pub fn tokyo_night() -> Theme {
    Theme {
        name: "Tokyo Night",
        background: hex_to_color(0x1a1b26),
        foreground: hex_to_color(0xc0caf5),
        foreground_dim: hex_to_color(0x565f89),
        border: hex_to_color(0x414868),
        accent: hex_to_color(0x7aa2f7),
        accent_secondary: hex_to_color(0xbb9af7),
        success: hex_to_color(0x9ece6a),
        warning: hex_to_color(0xe0af68),
        error: hex_to_color(0xf7768e),
    }
}

pub fn catppuccin_mocha() -> Theme {
    Theme {
        name: "Catppuccin Mocha",
        background: hex_to_color(0x1e1e2e),
        foreground: hex_to_color(0xcdd6f4),
        foreground_dim: hex_to_color(0x6c7086),
        border: hex_to_color(0x45475a),
        accent: hex_to_color(0x89b4fa),
        accent_secondary: hex_to_color(0xcba6f7),
        success: hex_to_color(0xa6e3a1),
        warning: hex_to_color(0xf9e2af),
        error: hex_to_color(0xf38ba8),
    }
}

pub fn nord() -> Theme {
    Theme {
        name: "Nord",
        background: hex_to_color(0x2e3440),
        foreground: hex_to_color(0xeceff4),
        foreground_dim: hex_to_color(0x4c566a),
        border: hex_to_color(0x434c5e),
        accent: hex_to_color(0x88c0d0),
        accent_secondary: hex_to_color(0xb48ead),
        success: hex_to_color(0xa3be8c),
        warning: hex_to_color(0xebcb8b),
        error: hex_to_color(0xbf616a),
    }
}
