mod client;
mod error;
mod resource;

pub use client::Client;
pub use error::ApiError;
pub use resource::*;

use crate::repository::ProjectRepository;
use anyhow::Result;
use async_trait::async_trait;
use client::Wrapper;
use log::*;
use reqwest::Method;
use std::sync::{Mutex, PoisonError};

const PROJECTS_ENDPOINT: &str = "projects";

/// Responsible for asynchronous interaction with the project API including
/// transformation of response data into explicitly-defined types.
///
pub struct ProjectsRepo {
    client: Client,
    params: Mutex<ListParams>,
}

impl ProjectsRepo {
    /// Returns a new instance for the given API client.
    ///
    pub fn new(client: Client) -> ProjectsRepo {
        debug!("Initializing projects repository at {}...", client.base_url);
        ProjectsRepo {
            client,
            params: Mutex::new(ListParams::default()),
        }
    }

    /// Returns the parameters the next list request will use.
    ///
    pub fn params(&self) -> ListParams {
        *self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn project_path(id: &str) -> String {
        format!("{}/{}", PROJECTS_ENDPOINT, id)
    }

    fn not_found_as(id: &str, error: ApiError) -> ApiError {
        match error {
            ApiError::Status { status: 404, .. } => ApiError::ProjectNotFound { id: id.to_owned() },
            other => other,
        }
    }
}

#[async_trait]
impl ProjectRepository for ProjectsRepo {
    fn set_params(&self, params: ListParams) {
        *self.params.lock().unwrap_or_else(PoisonError::into_inner) = params;
    }

    async fn get_all(&self) -> Result<PagedResult> {
        let params = self.params();
        debug!("Requesting projects page {}...", params.page);
        let result: PagedResult = self
            .client
            .get(PROJECTS_ENDPOINT, &[("page", params.page.to_string())])
            .await?;
        debug!(
            "Retrieved {} projects for page {} of {}",
            result.data.len(),
            result.pagination.page,
            result.pagination.total_pages()
        );
        Ok(result)
    }

    async fn save(&self, data: ProjectFormData) -> Result<Project> {
        let wrapper: Wrapper<Project> = match data.id.as_deref() {
            Some(id) => {
                debug!("Updating project {}...", id);
                self.client
                    .send(Method::PUT, &Self::project_path(id), &data)
                    .await
                    .map_err(|e| Self::not_found_as(id, e))?
            }
            None => {
                debug!("Creating project '{}'...", data.name);
                self.client
                    .send(Method::POST, PROJECTS_ENDPOINT, &data)
                    .await?
            }
        };
        Ok(wrapper.data)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!("Deleting project {}...", id);
        self.client
            .delete(&Self::project_path(id))
            .await
            .map_err(|e| Self::not_found_as(id, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    fn repo(server: &MockServer, token: Option<&str>) -> ProjectsRepo {
        ProjectsRepo::new(Client::new(&server.base_url(), token).unwrap())
    }

    #[tokio::test]
    async fn get_all_requests_configured_page() -> Result<()> {
        let token: Uuid = UUIDv4.fake();
        let projects: [Project; 2] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/projects")
                    .header("Authorization", &format!("Bearer {}", &token))
                    .query_param("page", "3");
                then.status(200).json_body(json!({
                    "data": [
                        { "id": projects[0].id, "name": projects[0].name },
                        { "id": projects[1].id, "name": projects[1].name },
                    ],
                    "pagination": { "page": 3, "total": 22, "pageSize": 10 }
                }));
            })
            .await;

        let repo = repo(&server, Some(&token.to_string()));
        repo.set_params(ListParams { page: 3 });
        let result = repo.get_all().await?;
        mock.assert_async().await;
        assert_eq!(2, result.data.len());
        assert_eq!(projects[0].id, result.data[0].id);
        assert_eq!(3, result.pagination.page);
        Ok(())
    }

    #[tokio::test]
    async fn get_all_server_error() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/projects");
                then.status(500).body("boom");
            })
            .await;

        let repo = repo(&server, None);
        let error = repo.get_all().await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(
            error.downcast_ref::<ApiError>(),
            Some(ApiError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn save_without_id_creates() -> Result<()> {
        let project: Project = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/projects")
                    .json_body(json!({ "name": project.name, "description": null, "archived": false }));
                then.status(201).json_body(json!({
                    "data": { "id": project.id, "name": project.name }
                }));
            })
            .await;

        let repo = repo(&server, None);
        let saved = repo
            .save(ProjectFormData {
                name: project.name.to_owned(),
                ..ProjectFormData::default()
            })
            .await?;
        mock.assert_async().await;
        assert_eq!(project.id, saved.id);
        Ok(())
    }

    #[tokio::test]
    async fn save_with_id_updates() -> Result<()> {
        let project: Project = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT").path(format!("/projects/{}", project.id));
                then.status(200).json_body(json!({
                    "data": { "id": project.id, "name": "Renamed", "archived": true }
                }));
            })
            .await;

        let repo = repo(&server, None);
        let mut form = ProjectFormData::from(&project);
        form.name = "Renamed".to_string();
        let saved = repo.save(form).await?;
        mock.assert_async().await;
        assert_eq!("Renamed", saved.name);
        assert!(saved.archived);
        Ok(())
    }

    #[tokio::test]
    async fn delete_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/projects/a");
                then.status(204);
            })
            .await;

        let repo = repo(&server, None);
        repo.delete("a").await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_project() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/projects/missing");
                then.status(404);
            })
            .await;

        let repo = repo(&server, None);
        let error = repo.delete("missing").await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(
            error.downcast_ref::<ApiError>(),
            Some(ApiError::ProjectNotFound { id }) if id == "missing"
        ));
    }
}
