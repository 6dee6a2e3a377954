//! Plain-text rendering of the views.

use std::fmt::Write;

use pawmatch_core::{
    adoption_link, match_blurb, CatalogPhase, CatalogState, Dog, MatchState, PageWindow,
    SearchQuery, SortKey,
};

use crate::views::{CatalogView, EntryView, MatchView};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn entry(view: &EntryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🐕 Fetch Dog Matcher");
    let _ = writeln!(out, "Find your perfect furry companion");
    let _ = writeln!(out, "{RULE}");
    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {error}");
    }
    let _ = writeln!(out, "Sign in with: login <name> <email>");
    out
}

pub fn catalog(view: &CatalogView) -> String {
    let state = view.state();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "🐕 Find Your Perfect Dog    Welcome, {}!    Find Match ({})",
        view.user_name().unwrap_or_default(),
        state.favorites().len()
    );
    let _ = writeln!(out, "{RULE}");
    out.push_str(&filters(state.query(), state.breeds().len()));
    let _ = writeln!(out, "{RULE}");

    if let Some(notice) = view.notice() {
        let _ = writeln!(out, "! {notice}");
    }

    match state.phase() {
        CatalogPhase::Idle | CatalogPhase::LoadingBreeds | CatalogPhase::LoadingResults => {
            let _ = writeln!(out, "Loading dogs...");
            return out;
        }
        CatalogPhase::Errored => {
            if let Some(error) = state.error() {
                let _ = writeln!(out, "! Failed to fetch dogs: {error}");
            }
        }
        CatalogPhase::Ready => {}
    }

    let _ = writeln!(out, "{}", state.summary());
    if state.dogs().is_empty() {
        let _ = writeln!(out, "No dogs found. Try adjusting your filters.");
    }
    for (index, dog) in state.dogs().iter().enumerate() {
        let favorite = state.favorites().contains(&dog.id);
        out.push_str(&dog_card(index + 1, dog, favorite));
    }
    if state.shows_pagination() {
        let _ = writeln!(out, "{}", pagination(&state.page_window()));
    }
    out
}

/// Current filter panel values.
pub fn filters(query: &SearchQuery, breed_count: usize) -> String {
    let breeds = match &query.breeds {
        Some(selected) => selected.join(", "),
        None => format!("any ({breed_count} available)"),
    };
    let age = match (query.age_min, query.age_max) {
        (None, None) => "any".to_string(),
        (min, max) => format!(
            "{} - {}",
            min.map_or("min".to_string(), |v| v.to_string()),
            max.map_or("max".to_string(), |v| v.to_string())
        ),
    };
    let zip = query
        .zip_codes
        .as_ref()
        .map_or("any".to_string(), |z| z.join(", "));

    let mut out = String::new();
    let _ = writeln!(out, "Breeds:   {breeds}");
    let _ = writeln!(out, "Age:      {age}");
    let _ = writeln!(out, "Zip code: {zip}");
    let _ = writeln!(out, "Sort by:  {}", query.sort.label());
    out
}

pub fn dog_card(index: usize, dog: &Dog, favorite: bool) -> String {
    let heart = if favorite { "♥" } else { "♡" };
    format!(
        "{index:>3}. {heart} {name}  [{id}]\n     Breed: {breed}  Age: {age} years old  Location: {zip}\n",
        name = dog.name,
        id = dog.id,
        breed = dog.breed,
        age = dog.age,
        zip = dog.zip_code,
    )
}

/// `‹ Previous  1 … 4 5 [6] 7 8 … 20  Next ›`, with disabled ends omitted.
pub fn pagination(window: &PageWindow) -> String {
    let mut parts: Vec<String> = Vec::new();
    if window.has_prev() {
        parts.push("‹ Previous".to_string());
    }
    if window.show_first {
        parts.push("1".to_string());
    }
    if window.leading_ellipsis {
        parts.push("…".to_string());
    }
    for page in &window.pages {
        if *page == window.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.trailing_ellipsis {
        parts.push("…".to_string());
    }
    if window.show_last {
        parts.push(window.total_pages.to_string());
    }
    if window.has_next() {
        parts.push("Next ›".to_string());
    }
    parts.join(" ")
}

pub fn breeds(all: &[String], query: &SearchQuery) -> String {
    if all.is_empty() {
        return "No breeds available.\n".to_string();
    }
    let mut out = String::new();
    for breed in all {
        let mark = if query.has_breed(breed) { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {breed}");
    }
    out
}

pub fn favorites(state: &CatalogState) -> String {
    let favorites = state.favorites();
    if favorites.is_empty() {
        return "No favorites yet. Use 'fav <id|#>' to add one.\n".to_string();
    }
    let mut out = String::new();
    for id in favorites.ids() {
        match state.dogs().iter().find(|d| &d.id == id) {
            Some(dog) => {
                let _ = writeln!(out, "♥ {id}  {} ({})", dog.name, dog.breed);
            }
            None => {
                let _ = writeln!(out, "♥ {id}");
            }
        }
    }
    out
}

pub fn sort_options(current: SortKey) -> String {
    let mut out = String::new();
    for key in SortKey::ALL {
        let mark = if key == current { "*" } else { " " };
        let _ = writeln!(out, "{mark} {:<11} {}", key.to_string(), key.label());
    }
    out
}

pub fn matching(view: &MatchView) -> String {
    let mut out = String::new();
    match view.state() {
        MatchState::Loading | MatchState::Redirect(_) => {
            let _ = writeln!(out, "Finding Your Perfect Match...");
        }
        MatchState::Errored(message) => {
            let _ = writeln!(out, "Oops!");
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "Type 'back' to try again.");
        }
        MatchState::Ready(dog) => {
            let _ = writeln!(out, "🎉 It's a Match!");
            let _ = writeln!(
                out,
                "We found your perfect companion, {}!",
                view.user_name().unwrap_or_default()
            );
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "Meet {}!", dog.name);
            let _ = writeln!(out, "  {} years old | {} | {}", dog.age, dog.breed, dog.zip_code);
            let _ = writeln!(out, "  {}", dog.img);
            let _ = writeln!(out);
            let _ = writeln!(out, "🌟 Perfect Match! {}", match_blurb(dog));
            let _ = writeln!(out, "Contact for adoption: {}", adoption_link(dog));
            let _ = writeln!(out, "Type 'back' to search more dogs.");
        }
    }
    out
}
