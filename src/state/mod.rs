//! Project list state.
//!
//! `ListState` holds the last loaded page, the selection and the drawer
//! flag. Projections such as the project list and pagination are read
//! straight from the stored result. `ViewState` holds what only the terminal
//! interface needs: the cursor, the focus and the drawer's edit buffers.

mod form;
mod view;

pub use form::{initial_form_data, DrawerMode};
pub use view::{Focus, FormEditor, FormField, ViewState};

use crate::api::{PagedResult, Pagination, Project, ProjectFormData};
use log::*;

/// Houses data representative of the project list.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListState {
    data: Option<PagedResult>,
    selected_project: Option<Project>,
    open_drawer: bool,
    loading: bool,
}

impl ListState {
    /// Return the projects of the loaded page, or an empty slice.
    ///
    pub fn get_projects(&self) -> &[Project] {
        self.data.as_ref().map(|d| d.data.as_slice()).unwrap_or(&[])
    }

    /// Return the pagination of the loaded page, if any.
    ///
    pub fn get_pagination(&self) -> Option<&Pagination> {
        self.data.as_ref().map(|d| &d.pagination)
    }

    /// Replace the loaded page.
    ///
    pub fn set_data(&mut self, data: PagedResult) -> &mut Self {
        self.data = Some(data);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) -> &mut Self {
        self.loading = loading;
        self
    }

    pub fn get_selected_project(&self) -> Option<&Project> {
        self.selected_project.as_ref()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.open_drawer
    }

    pub fn set_open_drawer(&mut self, open: bool) -> &mut Self {
        self.open_drawer = open;
        self
    }

    /// Select the project with the given ID from the loaded page and open the
    /// drawer. An unknown ID clears the selection.
    ///
    pub fn start_edit(&mut self, id: &str) -> &mut Self {
        self.selected_project = self.get_projects().iter().find(|p| p.id == id).cloned();
        if self.selected_project.is_none() {
            debug!("Project {} is not on the loaded page, editing without selection.", id);
        }
        self.open_drawer = true;
        self
    }

    /// Clear the selection and open the drawer.
    ///
    pub fn start_add(&mut self) -> &mut Self {
        self.selected_project = None;
        self.open_drawer = true;
        self
    }

    pub fn drawer_mode(&self) -> DrawerMode {
        DrawerMode::for_selection(self.get_selected_project())
    }

    pub fn form_data(&self) -> ProjectFormData {
        initial_form_data(self.get_selected_project())
    }
}
