//! Reusable UI widget components.

pub mod styling;
