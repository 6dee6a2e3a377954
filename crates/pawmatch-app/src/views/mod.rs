//! View controllers.
//!
//! Each view owns its state machine and a handle to the gateway and session
//! store. Operations that leave the view return a [`pawmatch_core::Navigate`]
//! for the shell to resolve.

pub mod catalog;
pub mod entry;
pub mod matching;

pub use catalog::CatalogView;
pub use entry::EntryView;
pub use matching::MatchView;

use pawmatch_core::Route;

/// The view currently shown by the shell.
pub enum ActiveView {
    Entry(EntryView),
    Catalog(CatalogView),
    Match(MatchView),
}

impl ActiveView {
    pub fn route(&self) -> Route {
        match self {
            ActiveView::Entry(_) => Route::Entry,
            ActiveView::Catalog(_) => Route::Catalog,
            ActiveView::Match(_) => Route::Match,
        }
    }
}
