//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - The project list and its pagination
//! - The drawer for creating and editing a project
//! - The location footer and the log region

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod widgets;

pub use render::render;
