use super::ListState;
use crate::api::ProjectFormData;
use tui_textarea::TextArea;

/// Specify the drawer fields in tab order.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Archived,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Archived,
            FormField::Archived => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Archived,
            FormField::Description => FormField::Name,
            FormField::Archived => FormField::Description,
        }
    }
}

/// Specify which part of the screen receives key events.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Drawer(FormField),
    Location,
}

/// Editing buffers for the drawer, started from the controller's form data.
///
pub struct FormEditor {
    id: Option<String>,
    name: String,
    description: TextArea<'static>,
    archived: bool,
}

impl FormEditor {
    pub fn new(data: ProjectFormData) -> Self {
        let description = data.description.unwrap_or_default();
        FormEditor {
            id: data.id,
            name: data.name,
            description: TextArea::from(description.lines().collect::<Vec<_>>()),
            archived: data.archived,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_name_char(&mut self, c: char) -> &mut Self {
        self.name.push(c);
        self
    }

    pub fn remove_name_char(&mut self) -> &mut Self {
        self.name.pop();
        self
    }

    pub fn description(&self) -> &TextArea<'static> {
        &self.description
    }

    pub fn description_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.description
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn toggle_archived(&mut self) -> &mut Self {
        self.archived = !self.archived;
        self
    }

    /// Collect the buffers into form data. A blank description is sent as
    /// none.
    ///
    pub fn to_form_data(&self) -> ProjectFormData {
        let description = self.description.lines().join("\n");
        ProjectFormData {
            id: self.id.clone(),
            name: self.name.trim().to_owned(),
            description: if description.trim().is_empty() {
                None
            } else {
                Some(description)
            },
            archived: self.archived,
        }
    }
}

/// Houses state owned by the terminal interface rather than the controller.
///
pub struct ViewState {
    cursor: usize,
    focus: Focus,
    form: Option<FormEditor>,
    location_input: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            cursor: 0,
            focus: Focus::List,
            form: None,
            location_input: String::new(),
        }
    }
}

impl ViewState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Return the ID of the project under the cursor, if any.
    ///
    pub fn project_under_cursor(&self, state: &ListState) -> Option<String> {
        state.get_projects().get(self.cursor).map(|p| p.id.to_owned())
    }

    pub fn next_project(&mut self, count: usize) -> &mut Self {
        if self.cursor + 1 < count {
            self.cursor += 1;
        }
        self
    }

    pub fn previous_project(&mut self) -> &mut Self {
        self.cursor = self.cursor.saturating_sub(1);
        self
    }

    pub fn form(&self) -> Option<&FormEditor> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormEditor> {
        self.form.as_mut()
    }

    /// Start editing the given form data with the name field focused.
    ///
    pub fn open_form(&mut self, data: ProjectFormData) -> &mut Self {
        self.form = Some(FormEditor::new(data));
        self.focus = Focus::Drawer(FormField::Name);
        self
    }

    pub fn close_form(&mut self) -> &mut Self {
        self.form = None;
        self.focus = Focus::List;
        self
    }

    pub fn next_field(&mut self) -> &mut Self {
        if let Focus::Drawer(field) = self.focus {
            self.focus = Focus::Drawer(field.next());
        }
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        if let Focus::Drawer(field) = self.focus {
            self.focus = Focus::Drawer(field.previous());
        }
        self
    }

    pub fn location_input(&self) -> &str {
        &self.location_input
    }

    /// Start typing a location, prefilled with the current one.
    ///
    pub fn open_location(&mut self, current: &str) -> &mut Self {
        self.location_input = current.to_owned();
        self.focus = Focus::Location;
        self
    }

    pub fn add_location_char(&mut self, c: char) -> &mut Self {
        self.location_input.push(c);
        self
    }

    pub fn remove_location_char(&mut self) -> &mut Self {
        self.location_input.pop();
        self
    }

    pub fn close_location(&mut self) -> &mut Self {
        self.location_input.clear();
        self.focus = Focus::List;
        self
    }

    /// Bring the view in line with the latest list state: keep the cursor on
    /// a loaded project and drop the form once the drawer has closed.
    ///
    pub fn sync(&mut self, state: &ListState) -> &mut Self {
        let count = state.get_projects().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        if matches!(self.focus, Focus::Drawer(_)) && !state.is_drawer_open() {
            self.close_form();
        }
        self
    }
}
