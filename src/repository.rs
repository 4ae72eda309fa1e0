//! Abstract data access for the project collection.

use crate::api::{ListParams, PagedResult, Project, ProjectFormData};
use anyhow::Result;
use async_trait::async_trait;

/// A parameterized remote collection of projects.
///
/// `set_params` configures the next `get_all`. Implementations must read the
/// parameters before their first suspension point inside `get_all`, so that a
/// caller which sets parameters and immediately awaits the list always gets
/// the page it asked for even when other loads are in flight.
///
/// Every call may fail. Callers are expected to route failures through
/// [`crate::safe_call::safe_api_call`] rather than inspect the cause.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    fn set_params(&self, params: ListParams);

    async fn get_all(&self) -> Result<PagedResult>;

    /// Create the project if the form has no ID, otherwise update it.
    ///
    async fn save(&self, data: ProjectFormData) -> Result<Project>;

    async fn delete(&self, id: &str) -> Result<()>;
}
