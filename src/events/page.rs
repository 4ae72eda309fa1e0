use crate::controller::ProjectListController;
use crate::repository::ProjectRepository;
use crate::route::QueryWatch;
use log::*;
use tokio::task::JoinHandle;

/// Spawn a task that reloads the project list each time the watched page
/// changes. Each reload runs on its own task so a slow page never holds back
/// a newer one; the controller drops whichever result is stale.
///
pub fn spawn_watcher<R>(
    controller: ProjectListController<R>,
    mut changes: QueryWatch,
) -> JoinHandle<()>
where
    R: ProjectRepository + ?Sized + 'static,
{
    debug!("Watching page starting at {}...", changes.current());
    tokio::spawn(async move {
        while let Some(page) = changes.changed().await {
            debug!("Page changed to {}, reloading projects...", page);
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.load().await;
            });
        }
        debug!("Location closed, page watcher stopped.");
    })
}
