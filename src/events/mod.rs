//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Page events: reloads triggered by changes of the page in the location
//! - Terminal events: commands typed by the user

pub mod page;
pub mod terminal;
