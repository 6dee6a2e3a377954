//! Interactive line-oriented shell.
//!
//! The shell owns the active view, turns each input line into a
//! [`Command`], forwards it to the view, and resolves any navigation the
//! view requests. Output is plain text.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use pawmatch_core::{
    logging, CatalogEvent, DogGateway, Favorites, FilterUpdate, Navigate, Route, SearchQuery,
    SessionStore,
};

use crate::command::{Command, CommandError};
use crate::render;
use crate::views::{ActiveView, CatalogView, EntryView, MatchView};

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Reply {
    /// Re-render the active view.
    Render,
    /// Show this text instead.
    Text(String),
}

pub struct Shell {
    gateway: Arc<dyn DogGateway>,
    session: SessionStore,
    page_size: u32,
    view: ActiveView,
}

impl Shell {
    pub fn new(gateway: Arc<dyn DogGateway>, session: SessionStore, page_size: u32) -> Self {
        let view = ActiveView::Entry(EntryView::new(gateway.clone(), session.clone()));
        Self {
            gateway,
            session,
            page_size,
            view,
        }
    }

    pub fn route(&self) -> Route {
        self.view.route()
    }

    /// Navigate to `route` and render whatever view ends up active.
    pub async fn open(&mut self, route: Route) -> String {
        self.navigate(Navigate::To(route)).await;
        self.render()
    }

    pub fn render(&self) -> String {
        match &self.view {
            ActiveView::Entry(view) => render::entry(view),
            ActiveView::Catalog(view) => render::catalog(view),
            ActiveView::Match(view) => render::matching(view),
        }
    }

    /// Execute one input line and return the text to show.
    pub async fn execute(&mut self, line: &str) -> (Flow, String) {
        if line.trim().is_empty() {
            return (Flow::Continue, String::new());
        }
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => return (Flow::Continue, format!("{e}\n")),
        };
        debug!(subsystem = logging::SHELL, command = command.name(), route = %self.route(), "Executing command");

        match command {
            Command::Quit => (Flow::Quit, "Goodbye!\n".to_string()),
            Command::Help => (Flow::Continue, help(self.route()).to_string()),
            Command::Show => (Flow::Continue, self.render()),
            command => match self.apply(command).await {
                Ok(Reply::Render) => (Flow::Continue, self.render()),
                Ok(Reply::Text(text)) => (Flow::Continue, text),
                Err(e) => (Flow::Continue, format!("{e}\n")),
            },
        }
    }

    async fn apply(&mut self, command: Command) -> Result<Reply, CommandError> {
        let nav = match (&mut self.view, command) {
            (ActiveView::Entry(view), Command::Login { name, email }) => {
                view.submit(&name, &email).await
            }

            (ActiveView::Catalog(view), Command::Breed(None)) => {
                let state = view.state();
                return Ok(Reply::Text(render::breeds(state.breeds(), state.query())));
            }
            (ActiveView::Catalog(view), Command::Breed(Some(name))) => {
                let breed = resolve_breed(view.state().breeds(), &name)?;
                view.dispatch(CatalogEvent::Filter(FilterUpdate::ToggleBreed(breed)))
                    .await
            }
            (ActiveView::Catalog(view), Command::Age { min, max }) => {
                view.dispatch(CatalogEvent::Filter(FilterUpdate::AgeRange { min, max }))
                    .await
            }
            (ActiveView::Catalog(view), Command::Zip(zip)) => {
                view.dispatch(CatalogEvent::Filter(FilterUpdate::ZipCode(zip)))
                    .await
            }
            (ActiveView::Catalog(view), Command::Sort(None)) => {
                return Ok(Reply::Text(render::sort_options(view.state().query().sort)));
            }
            (ActiveView::Catalog(view), Command::Sort(Some(key))) => {
                view.dispatch(CatalogEvent::Filter(FilterUpdate::Sort(key)))
                    .await
            }
            (ActiveView::Catalog(view), Command::Apply(set)) => {
                view.dispatch(CatalogEvent::Filter(FilterUpdate::Apply(set)))
                    .await
            }
            (ActiveView::Catalog(view), Command::Clear) => {
                view.dispatch(CatalogEvent::Filter(FilterUpdate::Clear)).await
            }
            (ActiveView::Catalog(view), Command::Page(page)) => {
                view.dispatch(CatalogEvent::GoToPage(page)).await
            }
            (ActiveView::Catalog(view), Command::Next) => view.dispatch(CatalogEvent::NextPage).await,
            (ActiveView::Catalog(view), Command::Prev) => view.dispatch(CatalogEvent::PrevPage).await,
            (ActiveView::Catalog(view), Command::Fav(reference)) => {
                if view.toggle_favorite(&reference).await.is_none() {
                    return Err(CommandError::Invalid(format!(
                        "No dog '{reference}' on this page."
                    )));
                }
                None
            }
            (ActiveView::Catalog(view), Command::Favs) => {
                return Ok(Reply::Text(render::favorites(view.state())));
            }
            (ActiveView::Catalog(view), Command::Match) => view.find_match(),
            (ActiveView::Catalog(view), Command::Logout) => Some(view.logout().await),

            (ActiveView::Match(view), Command::Back) => Some(view.back()),

            (_, command) => return Err(CommandError::Unavailable(command.name())),
        };

        if let Some(nav) = nav {
            self.navigate(nav).await;
        }
        Ok(Reply::Render)
    }

    /// Switch views, following redirects until a view settles.
    async fn navigate(&mut self, nav: Navigate) {
        let mut next = Some(nav);
        while let Some(nav) = next.take() {
            info!(subsystem = logging::SHELL, route = %nav.route(), "Navigating");
            next = match nav {
                Navigate::To(Route::Entry) => {
                    self.view =
                        ActiveView::Entry(EntryView::new(self.gateway.clone(), self.session.clone()));
                    None
                }
                Navigate::To(Route::Catalog) => {
                    let mut view = CatalogView::new(
                        self.gateway.clone(),
                        self.session.clone(),
                        SearchQuery::with_page_size(self.page_size),
                    );
                    let redirect = view.mount().await;
                    self.view = ActiveView::Catalog(view);
                    redirect
                }
                // Entering the match view directly carries no favorites.
                Navigate::To(Route::Match) => Some(Navigate::ToMatch(Favorites::new())),
                Navigate::ToMatch(favorites) => {
                    let mut view =
                        MatchView::new(self.gateway.clone(), self.session.clone(), favorites);
                    let redirect = view.load().await;
                    self.view = ActiveView::Match(view);
                    redirect
                }
            };
        }
    }

    /// Read commands from `input` until it ends or `quit` is entered.
    pub async fn run<R, W>(&mut self, initial: Route, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let screen = self.open(initial).await;
        output.write_all(screen.as_bytes()).await?;

        let mut lines = input.lines();
        loop {
            output
                .write_all(format!("pawmatch:{}> ", self.route()).as_bytes())
                .await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let (flow, text) = self.execute(&line).await;
            output.write_all(text.as_bytes()).await?;
            if flow == Flow::Quit {
                break;
            }
        }
        output.flush().await
    }
}

/// Match a typed breed against the loaded list, ignoring case. Any name is
/// accepted when the list failed to load.
fn resolve_breed(known: &[String], name: &str) -> Result<String, CommandError> {
    if known.is_empty() {
        return Ok(name.to_string());
    }
    known
        .iter()
        .find(|b| b.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| {
            CommandError::Invalid(format!(
                "Unknown breed '{name}'. Type 'breed' to list breeds."
            ))
        })
}

fn help(route: Route) -> &'static str {
    match route {
        Route::Entry => {
            "Commands:\n  \
             login <name> <email>   sign in\n  \
             help                   show this help\n  \
             quit                   exit\n"
        }
        Route::Catalog => {
            "Commands:\n  \
             breed [name]           toggle a breed filter, or list breeds\n  \
             age <min|-> <max|->    set the age range\n  \
             zip <code|->           set the zip code\n  \
             sort [field:dir]       set the sort order, or list options\n  \
             apply breeds=A,B; age=2-5; zip=CODE; sort=age:asc\n  \
             \x20                      commit every filter at once\n  \
             clear                  clear all filters\n  \
             page <n> | next | prev move between pages\n  \
             fav <id|#>             toggle a favorite\n  \
             favs                   list favorites\n  \
             match                  find your match\n  \
             show                   redraw the screen\n  \
             logout                 sign out\n  \
             quit                   exit\n"
        }
        Route::Match => {
            "Commands:\n  \
             back                   search more dogs\n  \
             show                   redraw the screen\n  \
             quit                   exit\n"
        }
    }
}
