//! Drawer form state types.

use crate::api::{Project, ProjectFormData};

/// Specifying what the drawer form submits.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DrawerMode {
    Create,
    Edit(String), // ID of the project being edited
}

impl DrawerMode {
    /// Derive the mode from the selected project.
    ///
    pub fn for_selection(selected: Option<&Project>) -> Self {
        match selected {
            Some(project) => DrawerMode::Edit(project.id.to_owned()),
            None => DrawerMode::Create,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DrawerMode::Create => "New project",
            DrawerMode::Edit(_) => "Edit project",
        }
    }
}

/// Return the form data the drawer opens with for the selected project.
///
pub fn initial_form_data(selected: Option<&Project>) -> ProjectFormData {
    selected.map(ProjectFormData::from).unwrap_or_default()
}
