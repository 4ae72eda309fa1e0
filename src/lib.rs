//! Paginated project list bound to a navigable location.
//!
//! [`controller::ProjectListController`] loads pages of projects from a
//! [`repository::ProjectRepository`], keeps the page in the location's query
//! string and exposes add, edit, save and remove handlers to a view.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod logger;
pub mod repository;
pub mod route;
pub mod safe_call;
pub mod state;
pub mod ui;

pub use controller::{LoadOutcome, ProjectListController};
pub use repository::ProjectRepository;
