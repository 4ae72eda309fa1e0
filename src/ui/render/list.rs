use super::Frame;
use crate::state::{Focus, ListState, ViewState};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState as Selection, Paragraph},
};

const BLOCK_TITLE: &str = "Projects";

/// Return the list title with the pagination of the loaded page.
///
fn title(state: &ListState) -> String {
    let mut title = match state.get_pagination() {
        Some(pagination) => format!(
            "{} · page {} of {} ({} projects)",
            BLOCK_TITLE,
            pagination.page,
            pagination.total_pages(),
            pagination.total
        ),
        None => BLOCK_TITLE.to_string(),
    };
    if state.is_loading() {
        title.push_str(" · loading...");
    }
    title
}

/// Render the project list widget according to state.
///
pub fn list(frame: &mut Frame, size: Rect, state: &ListState, view: &ViewState) {
    let active = view.focus() == Focus::List;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(active));
    block = if active {
        block.title(Span::styled(title(state), styling::active_block_title_style()))
    } else {
        block.title(title(state))
    };

    let projects = state.get_projects();
    if projects.is_empty() {
        let placeholder = if state.is_loading() {
            "Loading..."
        } else {
            "No projects on this page."
        };
        let paragraph = Paragraph::new(Span::styled(placeholder, styling::muted_text_style()))
            .block(block);
        frame.render_widget(paragraph, size);
        return;
    }

    let items: Vec<ListItem> = projects
        .iter()
        .map(|p| {
            let mut spans = vec![
                Span::styled(p.name.to_owned(), styling::normal_text_style()),
                Span::styled(format!("  {}", p.id), styling::muted_text_style()),
            ];
            if p.archived {
                spans.push(Span::styled(" [archived]", styling::muted_text_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let highlight_style = if active {
        styling::active_list_item_style()
    } else {
        styling::active_block_title_style()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut selection = Selection::default();
    selection.select(Some(view.cursor()));
    frame.render_stateful_widget(list, size, &mut selection);
}
