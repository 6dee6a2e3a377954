//! Navigable views and navigation requests.

use std::fmt;

use crate::favorites::Favorites;

/// The three views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Catalog,
    Match,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Catalog => "/search",
            Route::Match => "/match",
        }
    }

    /// Resolve a path. Unrecognized paths land on the entry view.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = trimmed.trim_end_matches('/');
        match trimmed {
            "/search" | "search" => Route::Catalog,
            "/match" | "match" => Route::Match,
            _ => Route::Entry,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A request to leave the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigate {
    To(Route),
    /// Enter the match view carrying the favorites to match against.
    ToMatch(Favorites),
}

impl Navigate {
    pub fn route(&self) -> Route {
        match self {
            Navigate::To(route) => *route,
            Navigate::ToMatch(_) => Route::Match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Entry);
        assert_eq!(Route::parse("/search"), Route::Catalog);
        assert_eq!(Route::parse("/search/"), Route::Catalog);
        assert_eq!(Route::parse("/match"), Route::Match);
    }

    #[test]
    fn test_unknown_path_redirects_to_entry() {
        assert_eq!(Route::parse("/admin"), Route::Entry);
        assert_eq!(Route::parse(""), Route::Entry);
        assert_eq!(Route::parse("/search/extra"), Route::Entry);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [Route::Entry, Route::Catalog, Route::Match] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }

    #[test]
    fn test_navigate_route() {
        assert_eq!(Navigate::To(Route::Catalog).route(), Route::Catalog);
        assert_eq!(Navigate::ToMatch(Favorites::new()).route(), Route::Match);
    }
}
