use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines project data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Defines the editable fields of a project as submitted by the drawer form.
/// A form without an ID creates a new project.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl ProjectFormData {
    /// Returns true if submitting this form updates an existing project.
    ///
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

impl From<&Project> for ProjectFormData {
    fn from(project: &Project) -> Self {
        ProjectFormData {
            id: Some(project.id.to_owned()),
            name: project.name.to_owned(),
            description: project.description.to_owned(),
            archived: project.archived,
        }
    }
}

/// Defines pagination metadata returned alongside a page of projects.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total: u64,
    pub page_size: u32,
}

impl Pagination {
    /// Returns the number of pages, never less than one.
    ///
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = (self.total + u64::from(self.page_size) - 1) / u64::from(self.page_size);
        pages.clamp(1, u64::from(u32::MAX)) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Defines a single page of projects.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult {
    pub data: Vec<Project>,
    pub pagination: Pagination,
}

/// Defines query parameters for listing projects.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams { page: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use serde_json::json;

    #[test]
    fn form_data_from_project() {
        let project: Project = Faker.fake();
        let form = ProjectFormData::from(&project);
        assert_eq!(Some(project.id.to_owned()), form.id);
        assert_eq!(project.name, form.name);
        assert_eq!(project.archived, form.archived);
        assert!(form.is_update());
    }

    #[test]
    fn form_data_without_id_is_create() {
        let form = ProjectFormData {
            name: "New".to_string(),
            ..ProjectFormData::default()
        };
        assert!(!form.is_update());
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn pagination_uses_camel_case() {
        let pagination: Pagination =
            serde_json::from_value(json!({ "page": 1, "total": 2, "pageSize": 10 })).unwrap();
        assert_eq!(
            Pagination {
                page: 1,
                total: 2,
                page_size: 10
            },
            pagination
        );
    }

    #[test]
    fn total_pages() {
        let mut pagination = Pagination {
            page: 1,
            total: 21,
            page_size: 10,
        };
        assert_eq!(3, pagination.total_pages());
        assert!(pagination.has_next());
        assert!(!pagination.has_previous());

        pagination.page = 3;
        assert!(!pagination.has_next());
        assert!(pagination.has_previous());

        pagination.total = 0;
        assert_eq!(1, pagination.total_pages());

        pagination.page_size = 0;
        assert_eq!(1, pagination.total_pages());
    }

    #[test]
    fn project_defaults_optional_fields() {
        let project: Project = serde_json::from_value(json!({ "id": "a", "name": "A" })).unwrap();
        assert_eq!(None, project.description);
        assert!(!project.archived);
    }
}
