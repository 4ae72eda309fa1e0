use super::Frame;
use crate::logger::LogEntry;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the log widget with as many of the newest entries as fit.
///
pub fn log(frame: &mut Frame, size: Rect, entries: &[LogEntry]) {
    let block = Block::default().title("Log").borders(Borders::ALL);
    let visible = usize::from(size.height.saturating_sub(2));
    let skip = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries[skip..]
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry.line.to_owned(),
                styling::log_level_style(entry.level),
            )]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style())
        .block(block);
    frame.render_widget(list, size);
}
