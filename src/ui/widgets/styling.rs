use log::Level;
use ratatui::style::{Color, Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the list item under the cursor.
///
pub fn active_list_item_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text_style() -> Style {
    Style::default()
}

pub fn muted_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the style for a log entry of the given level.
///
pub fn log_level_style(level: Level) -> Style {
    match level {
        Level::Error => Style::default().fg(Color::Red),
        Level::Warn => Style::default().fg(Color::Yellow),
        Level::Info => normal_text_style(),
        Level::Debug | Level::Trace => muted_text_style(),
    }
}

/// Return block border style depending on whether the block has focus.
///
pub fn block_border_style(active: bool) -> Style {
    if active {
        active_block_border_style()
    } else {
        normal_block_border_style()
    }
}
