//! Project list controller.
//!
//! Mediates between a paginated remote project collection and a view. The
//! page lives in the location's `page` query parameter; writing it never
//! loads directly, the page watcher started by [`ProjectListController::mount`]
//! observes the change and reloads.

use crate::api::{ListParams, Pagination, Project, ProjectFormData};
use crate::events::page::spawn_watcher;
use crate::repository::ProjectRepository;
use crate::route::RouteQuery;
use crate::safe_call::safe_api_call;
use crate::state::{DrawerMode, ListState};
use log::*;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Result of a single list load.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadOutcome {
    /// The page was stored and is now displayed.
    Applied,
    /// A newer load started before this one finished; its result was dropped.
    Stale,
    /// The repository failed; the previous page stays displayed.
    Failed,
}

/// Owns the list state and runs load, save and remove against the injected
/// repository.
///
pub struct ProjectListController<R: ProjectRepository + ?Sized> {
    repo: Arc<R>,
    page: RouteQuery,
    state: Arc<Mutex<ListState>>,
    latest_load: Arc<StdMutex<u64>>,
}

impl<R: ProjectRepository + ?Sized> Clone for ProjectListController<R> {
    fn clone(&self) -> Self {
        ProjectListController {
            repo: Arc::clone(&self.repo),
            page: self.page.clone(),
            state: Arc::clone(&self.state),
            latest_load: Arc::clone(&self.latest_load),
        }
    }
}

impl<R: ProjectRepository + ?Sized> ProjectListController<R> {
    /// Return a new controller with no selection, the drawer closed and
    /// nothing loaded.
    ///
    pub fn new(repo: Arc<R>, page: RouteQuery) -> Self {
        ProjectListController {
            repo,
            page,
            state: Arc::new(Mutex::new(ListState::default())),
            latest_load: Arc::new(StdMutex::new(0)),
        }
    }

    /// Return the projects of the loaded page, empty until a page loads.
    ///
    pub async fn projects(&self) -> Vec<Project> {
        self.state.lock().await.get_projects().to_vec()
    }

    pub async fn pagination(&self) -> Option<Pagination> {
        self.state.lock().await.get_pagination().cloned()
    }

    pub async fn selected_project(&self) -> Option<Project> {
        self.state.lock().await.get_selected_project().cloned()
    }

    pub async fn open_drawer(&self) -> bool {
        self.state.lock().await.is_drawer_open()
    }

    /// Set the drawer flag, e.g. when the view cancels the form.
    ///
    pub async fn set_open_drawer(&self, open: bool) {
        self.state.lock().await.set_open_drawer(open);
    }

    /// Returns true while the most recent load is in flight.
    ///
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading()
    }

    pub async fn drawer_mode(&self) -> DrawerMode {
        self.state.lock().await.drawer_mode()
    }

    /// Return the form data the drawer should start from.
    ///
    pub async fn form_data(&self) -> ProjectFormData {
        self.state.lock().await.form_data()
    }

    /// Return a copy of the whole list state for rendering.
    ///
    pub async fn snapshot(&self) -> ListState {
        self.state.lock().await.clone()
    }

    /// Return the page read from the current location.
    ///
    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn page_query(&self) -> &RouteQuery {
        &self.page
    }

    /// Write the page to the location. The page watcher performs the reload.
    ///
    pub fn set_page(&self, page: u32) {
        debug!("Setting page to {}...", page);
        self.page.set(page);
    }

    /// Move to the next page unless the loaded pagination says this is the
    /// last one. Returns false if the page was not changed.
    ///
    pub async fn next_page(&self) -> bool {
        let current = self.page();
        let last_page_reached = self
            .pagination()
            .await
            .map_or(false, |known| !Pagination { page: current, ..known }.has_next());
        if last_page_reached || current == u32::MAX {
            return false;
        }
        self.set_page(current + 1);
        true
    }

    /// Move to the previous page unless already on the first one.
    ///
    pub fn previous_page(&self) -> bool {
        let current = self.page();
        if current <= 1 {
            return false;
        }
        self.set_page(current - 1);
        true
    }

    /// Request the current page and store it unless a newer load has started
    /// in the meantime. Previous data stays visible while the request is in
    /// flight and after a failure.
    ///
    pub async fn load(&self) -> LoadOutcome {
        let (ticket, page) = self.begin_load();
        {
            let mut state = self.state.lock().await;
            let newest = *self.lock_latest_load() == ticket;
            if newest {
                state.set_loading(true);
            }
        }

        info!("Fetching projects page {}...", page);
        let result = safe_api_call(|| self.repo.get_all()).await;

        let mut state = self.state.lock().await;
        let newest = *self.lock_latest_load() == ticket;
        if !newest {
            debug!("Discarding stale response for page {}.", page);
            return LoadOutcome::Stale;
        }
        state.set_loading(false);
        match result {
            Some(data) => {
                info!("Received {} projects for page {}.", data.data.len(), page);
                state.set_data(data);
                LoadOutcome::Applied
            }
            None => {
                warn!("Keeping previous projects after failed load of page {}.", page);
                LoadOutcome::Failed
            }
        }
    }

    /// Take the next load ticket and hand the page to the repository. Both
    /// happen under one lock, so the newest ticket always belongs to the last
    /// parameters set.
    ///
    fn begin_load(&self) -> (u64, u32) {
        let mut latest = self.lock_latest_load();
        *latest += 1;
        let page = self.page();
        self.repo.set_params(ListParams { page });
        (*latest, page)
    }

    fn lock_latest_load(&self) -> MutexGuard<'_, u64> {
        self.latest_load.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload the current page.
    ///
    pub async fn refresh(&self) -> LoadOutcome {
        self.load().await
    }

    /// Select a project from the loaded page and open the drawer.
    ///
    pub async fn start_edit(&self, id: &str) {
        self.state.lock().await.start_edit(id);
    }

    /// Clear the selection and open the drawer.
    ///
    pub async fn start_add(&self) {
        self.state.lock().await.start_add();
    }

    /// Create or update a project. On success the drawer closes and the list
    /// reloads. Returns whether the save succeeded.
    ///
    pub async fn save(&self, data: ProjectFormData) -> bool {
        let action = if data.is_update() { "Updated" } else { "Created" };
        let saved = safe_api_call(|| self.repo.save(data)).await;
        match saved {
            Some(project) => {
                info!("{} project '{}' ({}).", action, project.name, project.id);
                self.state.lock().await.set_open_drawer(false);
                self.refresh().await;
                true
            }
            None => false,
        }
    }

    /// Delete a project. On success the list reloads; the drawer is left as
    /// is. Returns whether the delete succeeded.
    ///
    pub async fn remove(&self, id: &str) -> bool {
        let removed = safe_api_call(|| self.repo.delete(id)).await;
        match removed {
            Some(()) => {
                info!("Deleted project {}.", id);
                self.refresh().await;
                true
            }
            None => false,
        }
    }
}

impl<R: ProjectRepository + ?Sized + 'static> ProjectListController<R> {
    /// Start watching the page and perform the initial load. Returns the
    /// watcher task, which runs until aborted.
    ///
    pub async fn mount(&self) -> JoinHandle<()> {
        let watcher = spawn_watcher(self.clone(), self.page.watch());
        self.load().await;
        watcher
    }
}
