use crate::formatting::ColorPalette;
use ratatui::style::{Color, Modifier, Style};

const PALETTE: ColorPalette = ColorPalette::CATPPUCCIN;

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub const ACCENT: Color = rgb(PALETTE.accent);
pub const MUTED: Color = rgb(PALETTE.primary);
pub const DANGER: Color = rgb(PALETTE.danger);
pub const TIMESTAMP: Color = rgb(PALETTE.timestamp);
pub const HEADER: Color = rgb(PALETTE.secondary);

pub fn heading() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn bullet() -> Style {
    Style::default().fg(ACCENT)
}

pub fn code() -> Style {
    Style::default().fg(TIMESTAMP)
}

pub fn selected() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { ACCENT } else { MUTED })
}
