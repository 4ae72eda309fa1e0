use super::Frame;
use crate::state::{Focus, FormEditor, FormField, ListState};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

fn field_block(title: &'static str, active: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(active));
    if active {
        block.title(Span::styled(title, styling::active_block_title_style()))
    } else {
        block.title(title)
    }
}

/// Render the drawer holding the add/edit form over the given area.
///
pub fn drawer(frame: &mut Frame, size: Rect, state: &ListState, form: &FormEditor, focus: Focus) {
    let field = match focus {
        Focus::Drawer(field) => Some(field),
        _ => None,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(
            state.drawer_mode().title(),
            styling::active_block_title_style(),
        ));
    let inner = block.inner(size);
    frame.render_widget(Clear, size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    let name_active = field == Some(FormField::Name);
    let mut name = vec![Span::styled(form.name().to_owned(), styling::normal_text_style())];
    if name_active {
        name.push(Span::styled("_", styling::active_list_item_style()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(name)).block(field_block("Name", name_active)),
        chunks[0],
    );

    // The text area is cloned so the block can follow focus without
    // mutating view state while drawing.
    let mut description = form.description().clone();
    description.set_block(field_block(
        "Description",
        field == Some(FormField::Description),
    ));
    frame.render_widget(description.widget(), chunks[1]);

    let archived = if form.is_archived() {
        "[x] yes"
    } else {
        "[ ] no"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(archived, styling::normal_text_style())).block(field_block(
            "Archived",
            field == Some(FormField::Archived),
        )),
        chunks[2],
    );
}
