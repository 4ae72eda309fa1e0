mod drawer;
mod footer;
mod list;
mod log;

use self::log::log;
use super::Frame;
use crate::logger::LogEntry;
use crate::state::{ListState, ViewState};
use drawer::drawer;
use footer::footer;
use list::list;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use url::Url;

/// Rows given to the log region, borders included.
///
const LOG_HEIGHT: u16 = 8;

/// Render the whole screen: the project list, the drawer on top of it when
/// open, the location footer and the log.
///
pub fn render(
    frame: &mut Frame,
    state: &ListState,
    view: &ViewState,
    location: &Url,
    entries: &[LogEntry],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(LOG_HEIGHT),
        ])
        .split(frame.size());

    list(frame, chunks[0], state, view);
    if state.is_drawer_open() {
        if let Some(form) = view.form() {
            drawer(frame, drawer_area(chunks[0]), state, form, view.focus());
        }
    }
    footer(frame, chunks[1], state, view, location);
    log(frame, chunks[2], entries);
}

/// Return the right-hand part of the list area the drawer slides over.
///
fn drawer_area(r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(r)[1]
}
