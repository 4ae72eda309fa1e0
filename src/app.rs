use crate::api::{Client, ProjectsRepo};
use crate::config::Config;
use crate::controller::ProjectListController;
use crate::error::AppResult;
use crate::events::terminal::{action_for, Event, Events, Handler as TerminalEventHandler};
use crate::logger::{CustomLogger, LogBuffer};
use crate::repository::ProjectRepository;
use crate::route::{RouteQuery, Router};
use crate::state::ViewState;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;

/// Query parameter holding the current page.
///
pub const PAGE_QUERY_KEY: &str = "page";

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Oversees logging, the project list controller and terminal output.
///
pub struct App {
    config: Config,
    log: LogBuffer,
}

impl App {
    /// Start a new application according to the given configuration, at the
    /// given location or the configured start location. Returns the result of
    /// the application execution.
    ///
    pub async fn start(config: Config, location: Option<&str>) -> Result<()> {
        let app = App {
            config,
            log: LogBuffer::default(),
        };
        app.start_logger()?;

        info!("Starting application...");
        let client = Client::new(&app.config.base_url, app.config.access_token.as_deref())?;
        let repo = Arc::new(ProjectsRepo::new(client));
        let router = Router::parse(location.unwrap_or(app.config.start_location.as_str()))?;
        let controller =
            ProjectListController::new(repo, RouteQuery::new(router, PAGE_QUERY_KEY, 1));

        let watcher = controller.mount().await;
        let mut terminal = setup_terminal()?;
        let result = app.start_ui(&mut terminal, controller).await;
        watcher.abort();
        restore_terminal(&mut terminal)?;

        info!("Exiting application...");
        result
    }

    /// Route log records into the buffer drawn in the log region.
    ///
    fn start_logger(&self) -> AppResult<()> {
        let logger = CustomLogger::new(self.config.level_filter());
        let log = self.log.clone();
        logger.set_log_callback(Box::new(move |level, line| log.push(level, line)));
        logger.init()
    }

    /// Draw the current state and handle terminal events until exit is
    /// requested.
    ///
    async fn start_ui<R>(
        &self,
        terminal: &mut AppTerminal,
        controller: ProjectListController<R>,
    ) -> Result<()>
    where
        R: ProjectRepository + ?Sized + 'static,
    {
        debug!("Starting user interface...");
        let handler = TerminalEventHandler::new(controller.clone());
        let mut events = Events::new();
        let mut view = ViewState::default();

        loop {
            let state = controller.snapshot().await;
            view.sync(&state);
            let location = controller.page_query().router().current();
            let entries = self.log.entries();
            terminal.draw(|frame| crate::ui::render(frame, &state, &view, &location, &entries))?;

            match events.next().await {
                Some(Event::Input(key)) => {
                    let action = match action_for(key, view.focus()) {
                        Some(action) => action,
                        None => continue,
                    };
                    match handler.handle(action, &mut view).await {
                        Ok(true) => {}
                        Ok(false) => {
                            debug!("Received application exit request.");
                            break;
                        }
                        Err(e) => error!("{}", e),
                    }
                }
                Some(Event::Tick) => {}
                None => {
                    warn!("Terminal events stopped.");
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Switch the terminal to raw mode on the alternate screen.
///
fn setup_terminal() -> AppResult<AppTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    enable_raw_mode()?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

/// Leave raw mode and the alternate screen.
///
fn restore_terminal(terminal: &mut AppTerminal) -> AppResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
