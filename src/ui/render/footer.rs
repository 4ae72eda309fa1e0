use super::Frame;
use crate::state::{Focus, FormField, ListState, ViewState};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use url::Url;

/// Return the key hints for the focused part of the screen. Page hints are
/// only offered when the loaded pagination allows the move.
///
fn hints(state: &ListState, focus: Focus) -> String {
    match focus {
        Focus::List => {
            let mut hints = Vec::new();
            let pagination = state.get_pagination();
            if pagination.map_or(false, |p| p.has_previous()) {
                hints.push("h: previous page");
            }
            if pagination.map_or(true, |p| p.has_next()) {
                hints.push("l: next page");
            }
            hints.extend([
                "j/k: move",
                "e: edit",
                "a: add",
                "d: delete",
                "r: refresh",
                "b/f: back/forward",
                "g: go to",
                "q: quit",
            ]);
            hints.join("  ")
        }
        Focus::Drawer(FormField::Description) => {
            "Tab: next field  Ctrl-s: save  Esc: cancel".to_string()
        }
        Focus::Drawer(FormField::Archived) => {
            "Space: toggle  Tab: next field  Enter: save  Esc: cancel".to_string()
        }
        Focus::Drawer(FormField::Name) => {
            "Tab: next field  Enter: save  Esc: cancel".to_string()
        }
        Focus::Location => "Enter: go  Esc: cancel".to_string(),
    }
}

/// Render the footer: the current location with key hints, or the location
/// input while one is being typed.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &ListState, view: &ViewState, location: &Url) {
    let focus = view.focus();
    let paragraph = if focus == Focus::Location {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style())
            .title(Span::styled("Go to", styling::active_block_title_style()));
        Paragraph::new(Line::from(vec![
            Span::styled(view.location_input().to_owned(), styling::normal_text_style()),
            Span::styled("_", styling::active_list_item_style()),
        ]))
        .block(block)
    } else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style())
            .title(location.to_string());
        Paragraph::new(Span::styled(hints(state, focus), styling::muted_text_style())).block(block)
    };
    frame.render_widget(paragraph, size);
}
