use crate::controller::ProjectListController;
use crate::repository::ProjectRepository;
use crate::state::{Focus, FormField, ViewState};
use anyhow::Result;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use log::*;
use std::{thread, time::Duration};
use tokio::sync::mpsc;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for receiving terminal events from the polling thread.
///
pub struct Events {
    rx: mpsc::UnboundedReceiver<Event<KeyEvent>>,
}

impl Events {
    /// Return new instance after spawning new input polling thread. The
    /// thread stops once the receiver is dropped or the terminal fails.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Event::Input(key)
                    }
                    Ok(_) => Event::Tick,
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => Event::Tick,
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });
        Events { rx }
    }

    /// Wait for the next event. Returns `None` once the polling thread stopped.
    ///
    pub async fn next(&mut self) -> Option<Event<KeyEvent>> {
        self.rx.recv().await
    }
}

/// Specify what a key press asks for in the current focus.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextProject,
    PreviousProject,
    NextPage,
    PreviousPage,
    Refresh,
    Back,
    Forward,
    Edit,
    Add,
    Remove,
    OpenLocation,
    Submit,
    Close,
    NextField,
    PreviousField,
    Input(KeyEvent),
}

/// Map a key press to an action. Returns `None` for keys without a binding.
///
pub fn action_for(key: KeyEvent, focus: Focus) -> Option<Action> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    if control && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match focus {
        Focus::List => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::NextProject,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousProject,
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Action::NextPage,
            KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => Action::PreviousPage,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('b') => Action::Back,
            KeyCode::Char('f') => Action::Forward,
            KeyCode::Char('e') | KeyCode::Enter => Action::Edit,
            KeyCode::Char('a') => Action::Add,
            KeyCode::Char('d') | KeyCode::Delete => Action::Remove,
            KeyCode::Char('g') => Action::OpenLocation,
            _ => return None,
        },
        Focus::Drawer(field) => match key.code {
            KeyCode::Esc => Action::Close,
            KeyCode::Char('s') if control => Action::Submit,
            KeyCode::Tab => Action::NextField,
            KeyCode::BackTab => Action::PreviousField,
            KeyCode::Enter if field != FormField::Description => Action::Submit,
            _ => Action::Input(key),
        },
        Focus::Location => match key.code {
            KeyCode::Esc => Action::Close,
            KeyCode::Enter => Action::Submit,
            _ => Action::Input(key),
        },
    };
    Some(action)
}

/// Specify struct for applying terminal actions to the controller and view.
///
pub struct Handler<R: ProjectRepository + ?Sized> {
    controller: ProjectListController<R>,
}

impl<R: ProjectRepository + ?Sized> Handler<R> {
    pub fn new(controller: ProjectListController<R>) -> Self {
        Handler { controller }
    }

    /// Handle an action. Returns result with value true if should continue or
    /// false if exit was requested.
    ///
    pub async fn handle(&self, action: Action, view: &mut ViewState) -> Result<bool> {
        debug!("Processing terminal action '{:?}'...", action);
        let controller = &self.controller;
        match action {
            Action::Quit => return Ok(false),
            Action::NextProject => {
                let count = controller.projects().await.len();
                view.next_project(count);
            }
            Action::PreviousProject => {
                view.previous_project();
            }
            Action::NextPage => {
                if !controller.next_page().await {
                    warn!("Already on the last page.");
                }
            }
            Action::PreviousPage => {
                if !controller.previous_page() {
                    warn!("Already on the first page.");
                }
            }
            Action::Refresh => {
                controller.refresh().await;
            }
            Action::Back => {
                if !controller.page_query().router().back() {
                    warn!("No earlier location.");
                }
            }
            Action::Forward => {
                if !controller.page_query().router().forward() {
                    warn!("No later location.");
                }
            }
            Action::Edit => match view.project_under_cursor(&controller.snapshot().await) {
                Some(id) => {
                    controller.start_edit(&id).await;
                    view.open_form(controller.form_data().await);
                }
                None => warn!("No project to edit on this page."),
            },
            Action::Add => {
                controller.start_add().await;
                view.open_form(controller.form_data().await);
            }
            Action::Remove => match view.project_under_cursor(&controller.snapshot().await) {
                Some(id) => {
                    if controller.remove(&id).await {
                        info!("Project {} deleted.", id);
                    }
                }
                None => warn!("No project to delete on this page."),
            },
            Action::OpenLocation => {
                view.open_location(controller.page_query().router().current().as_str());
            }
            Action::Submit => match view.focus() {
                Focus::Drawer(_) => {
                    if let Some(data) = view.form().map(|form| form.to_form_data()) {
                        if controller.save(data).await {
                            view.close_form();
                        }
                    }
                }
                Focus::Location => {
                    let location = view.location_input().to_owned();
                    view.close_location();
                    controller.page_query().router().navigate(&location)?;
                }
                Focus::List => {}
            },
            Action::Close => match view.focus() {
                Focus::Drawer(_) => {
                    controller.set_open_drawer(false).await;
                    view.close_form();
                }
                Focus::Location => {
                    view.close_location();
                }
                Focus::List => {}
            },
            Action::NextField => {
                view.next_field();
            }
            Action::PreviousField => {
                view.previous_field();
            }
            Action::Input(key) => edit(view, key),
        }
        Ok(true)
    }
}

/// Apply a key press to the focused input.
///
fn edit(view: &mut ViewState, key: KeyEvent) {
    match view.focus() {
        Focus::Drawer(field) => {
            let Some(form) = view.form_mut() else {
                return;
            };
            match (field, key.code) {
                (FormField::Name, KeyCode::Char(c)) => {
                    form.add_name_char(c);
                }
                (FormField::Name, KeyCode::Backspace) => {
                    form.remove_name_char();
                }
                (FormField::Description, _) => {
                    form.description_mut().input(key);
                }
                (FormField::Archived, KeyCode::Char(' ')) => {
                    form.toggle_archived();
                }
                _ => {}
            }
        }
        Focus::Location => match key.code {
            KeyCode::Char(c) => {
                view.add_location_char(c);
            }
            KeyCode::Backspace => {
                view.remove_location_char();
            }
            _ => {}
        },
        Focus::List => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ListParams, PagedResult, Pagination, Project, ProjectFormData};
    use crate::route::{RouteQuery, Router};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubRepo {
        saved: Mutex<Vec<ProjectFormData>>,
        deleted: Mutex<Vec<String>>,
    }

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            archived: false,
        }
    }

    #[async_trait]
    impl ProjectRepository for StubRepo {
        fn set_params(&self, _params: ListParams) {}

        async fn get_all(&self) -> Result<PagedResult> {
            Ok(PagedResult {
                data: vec![project("a", "Apollo"), project("b", "Gemini")],
                pagination: Pagination {
                    page: 1,
                    total: 25,
                    page_size: 10,
                },
            })
        }

        async fn save(&self, data: ProjectFormData) -> Result<Project> {
            self.saved.lock().unwrap().push(data.clone());
            Ok(Project {
                id: data.id.unwrap_or_else(|| "new".to_string()),
                name: data.name,
                description: data.description,
                archived: data.archived,
            })
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(id.to_owned());
            Ok(())
        }
    }

    async fn loaded_handler() -> (Arc<StubRepo>, ProjectListController<StubRepo>, Handler<StubRepo>) {
        let repo = Arc::new(StubRepo::default());
        let router = Router::parse("http://localhost/projects?page=1").unwrap();
        let controller =
            ProjectListController::new(Arc::clone(&repo), RouteQuery::new(router, "page", 1));
        controller.load().await;
        let handler = Handler::new(controller.clone());
        (repo, controller, handler)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_keys(handler: &Handler<StubRepo>, view: &mut ViewState, text: &str) {
        for c in text.chars() {
            let action = action_for(key(KeyCode::Char(c)), view.focus()).unwrap();
            handler.handle(action, view).await.unwrap();
        }
    }

    #[test]
    fn list_bindings() {
        assert_eq!(Some(Action::NextProject), action_for(key(KeyCode::Char('j')), Focus::List));
        assert_eq!(Some(Action::PreviousProject), action_for(key(KeyCode::Up), Focus::List));
        assert_eq!(Some(Action::NextPage), action_for(key(KeyCode::Right), Focus::List));
        assert_eq!(Some(Action::PreviousPage), action_for(key(KeyCode::Char('h')), Focus::List));
        assert_eq!(Some(Action::Edit), action_for(key(KeyCode::Enter), Focus::List));
        assert_eq!(Some(Action::Remove), action_for(key(KeyCode::Char('d')), Focus::List));
        assert_eq!(Some(Action::Quit), action_for(key(KeyCode::Char('q')), Focus::List));
        assert_eq!(None, action_for(key(KeyCode::Char('z')), Focus::List));
    }

    #[test]
    fn control_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Some(Action::Quit), action_for(ctrl_c, Focus::List));
        assert_eq!(Some(Action::Quit), action_for(ctrl_c, Focus::Drawer(FormField::Name)));
        assert_eq!(Some(Action::Quit), action_for(ctrl_c, Focus::Location));
    }

    #[test]
    fn drawer_bindings() {
        let name = Focus::Drawer(FormField::Name);
        let description = Focus::Drawer(FormField::Description);
        assert_eq!(Some(Action::Input(key(KeyCode::Char('q')))), action_for(key(KeyCode::Char('q')), name));
        assert_eq!(Some(Action::Submit), action_for(key(KeyCode::Enter), name));
        assert_eq!(
            Some(Action::Input(key(KeyCode::Enter))),
            action_for(key(KeyCode::Enter), description)
        );
        assert_eq!(
            Some(Action::Submit),
            action_for(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), description)
        );
        assert_eq!(Some(Action::NextField), action_for(key(KeyCode::Tab), name));
        assert_eq!(Some(Action::Close), action_for(key(KeyCode::Esc), name));
    }

    #[tokio::test]
    async fn add_type_and_submit_saves_new_project() {
        let (repo, controller, handler) = loaded_handler().await;
        let mut view = ViewState::default();

        handler.handle(Action::Add, &mut view).await.unwrap();
        assert!(controller.open_drawer().await);
        assert_eq!(Focus::Drawer(FormField::Name), view.focus());

        type_keys(&handler, &mut view, "Apollo").await;
        handler.handle(Action::NextField, &mut view).await.unwrap();
        handler.handle(Action::NextField, &mut view).await.unwrap();
        type_keys(&handler, &mut view, " ").await;
        handler.handle(Action::Submit, &mut view).await.unwrap();

        let saved = repo.saved.lock().unwrap().clone();
        assert_eq!(
            vec![ProjectFormData {
                id: None,
                name: "Apollo".to_string(),
                description: None,
                archived: true,
            }],
            saved
        );
        assert!(!controller.open_drawer().await);
        assert!(view.form().is_none());
        assert_eq!(Focus::List, view.focus());
    }

    #[tokio::test]
    async fn edit_opens_project_under_cursor() {
        let (_, controller, handler) = loaded_handler().await;
        let mut view = ViewState::default();

        handler.handle(Action::NextProject, &mut view).await.unwrap();
        handler.handle(Action::Edit, &mut view).await.unwrap();

        assert_eq!("b", controller.selected_project().await.unwrap().id);
        assert_eq!("Gemini", view.form().unwrap().name());

        handler.handle(Action::Close, &mut view).await.unwrap();
        assert!(!controller.open_drawer().await);
        assert_eq!(Focus::List, view.focus());
    }

    #[tokio::test]
    async fn remove_deletes_project_under_cursor() {
        let (repo, _, handler) = loaded_handler().await;
        let mut view = ViewState::default();
        handler.handle(Action::Remove, &mut view).await.unwrap();
        assert_eq!(vec!["a".to_string()], *repo.deleted.lock().unwrap());
    }

    #[tokio::test]
    async fn location_submit_navigates() {
        let (_, controller, handler) = loaded_handler().await;
        let mut view = ViewState::default();

        handler.handle(Action::OpenLocation, &mut view).await.unwrap();
        handler
            .handle(Action::Input(key(KeyCode::Backspace)), &mut view)
            .await
            .unwrap();
        type_keys(&handler, &mut view, "3").await;
        handler.handle(Action::Submit, &mut view).await.unwrap();

        assert_eq!(3, controller.page());
        assert_eq!(Focus::List, view.focus());
        assert!(controller.page_query().router().back());
        assert_eq!(1, controller.page());
    }

    #[tokio::test]
    async fn page_keys_move_the_cursor_page() {
        let (_, controller, handler) = loaded_handler().await;
        let mut view = ViewState::default();
        handler.handle(Action::NextPage, &mut view).await.unwrap();
        assert_eq!(2, controller.page());
        handler.handle(Action::PreviousPage, &mut view).await.unwrap();
        handler.handle(Action::PreviousPage, &mut view).await.unwrap();
        assert_eq!(1, controller.page());
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let (_, _, handler) = loaded_handler().await;
        let mut view = ViewState::default();
        assert!(!handler.handle(Action::Quit, &mut view).await.unwrap());
        assert!(handler.handle(Action::Refresh, &mut view).await.unwrap());
    }
}
