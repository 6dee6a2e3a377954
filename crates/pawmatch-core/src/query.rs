//! Catalog search query and the filter mutations applied to it.
//!
//! A [`SearchQuery`] is the complete input of one search-then-resolve fetch
//! cycle. Every filter or sort mutation resets the page offset to zero in the
//! same update; only [`SearchQuery::go_to_page`] moves the offset on its own.
//! The offset is always a multiple of the page size.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::SortKey;

/// Filter, sort and paging state for `GET /dogs/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Selected breeds in selection order. `None` when no breed is selected.
    pub breeds: Option<Vec<String>>,
    pub zip_codes: Option<Vec<String>>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub size: u32,
    pub from: u32,
    pub sort: SortKey,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::with_page_size(defaults::PAGE_SIZE)
    }
}

/// A partial update emitted by the filter panel when a field commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Select the breed if absent, deselect it if present.
    ToggleBreed(String),
    /// Commit both age bounds. `None` clears a bound.
    AgeRange { min: Option<u32>, max: Option<u32> },
    /// Commit the zip code field. `None` clears it.
    ZipCode(Option<String>),
    Sort(SortKey),
    /// Commit every panel field at once.
    Apply(FilterSet),
    /// Restore the default query.
    Clear,
}

/// Every field of the filter panel, committed together by [`FilterUpdate::Apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub breeds: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub zip_code: Option<String>,
    pub sort: SortKey,
}

impl SearchQuery {
    /// Default query with a custom page size (minimum 1).
    pub fn with_page_size(size: u32) -> Self {
        Self {
            breeds: None,
            zip_codes: None,
            age_min: None,
            age_max: None,
            size: size.max(1),
            from: defaults::PAGE_OFFSET,
            sort: SortKey::default(),
        }
    }

    /// 1-based page number the offset points at.
    pub fn current_page(&self) -> u32 {
        self.from / self.size + 1
    }

    /// True when the query carries no breed, age or zip constraint.
    pub fn is_unfiltered(&self) -> bool {
        self.breeds.is_none()
            && self.zip_codes.is_none()
            && self.age_min.is_none()
            && self.age_max.is_none()
    }

    pub fn has_breed(&self, breed: &str) -> bool {
        self.breeds
            .as_ref()
            .is_some_and(|b| b.iter().any(|x| x == breed))
    }

    pub fn toggle_breed(&mut self, breed: &str) {
        let mut breeds = self.breeds.take().unwrap_or_default();
        if let Some(pos) = breeds.iter().position(|b| b == breed) {
            breeds.remove(pos);
        } else {
            breeds.push(breed.to_string());
        }
        self.breeds = non_empty(breeds);
        self.from = 0;
    }

    pub fn set_age_range(&mut self, min: Option<u32>, max: Option<u32>) {
        self.age_min = min;
        self.age_max = max;
        self.from = 0;
    }

    pub fn set_zip_code(&mut self, zip: Option<String>) {
        self.zip_codes = zip
            .map(|z| z.trim().to_string())
            .filter(|z| !z.is_empty())
            .map(|z| vec![z]);
        self.from = 0;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.from = 0;
    }

    /// Move to a 1-based page, leaving every filter untouched.
    ///
    /// Page 0 is treated as page 1. Pages past the last offset that fits in
    /// a `u32` clamp to it, so `from` stays a multiple of `size`.
    pub fn go_to_page(&mut self, page: u32) {
        let index = page.saturating_sub(1);
        self.from = match u32::MAX.checked_div(self.size) {
            Some(max_index) => index.min(max_index) * self.size,
            None => 0,
        };
    }

    /// The default query, keeping the current page size.
    pub fn cleared(&self) -> Self {
        Self::with_page_size(self.size)
    }

    /// Apply one filter panel update.
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::ToggleBreed(breed) => self.toggle_breed(&breed),
            FilterUpdate::AgeRange { min, max } => self.set_age_range(min, max),
            FilterUpdate::ZipCode(zip) => self.set_zip_code(zip),
            FilterUpdate::Sort(sort) => self.set_sort(sort),
            FilterUpdate::Apply(set) => {
                self.breeds = non_empty(set.breeds);
                self.set_age_range(set.age_min, set.age_max);
                self.set_zip_code(set.zip_code);
                self.set_sort(set.sort);
            }
            FilterUpdate::Clear => *self = self.cleared(),
        }
    }

    /// Query-string pairs for `GET /dogs/search`.
    ///
    /// List parameters repeat their key once per value; absent options are
    /// omitted entirely.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for breed in self.breeds.iter().flatten() {
            pairs.push(("breeds[]", breed.clone()));
        }
        for zip in self.zip_codes.iter().flatten() {
            pairs.push(("zipCodes[]", zip.clone()));
        }
        if let Some(min) = self.age_min {
            pairs.push(("ageMin", min.to_string()));
        }
        if let Some(max) = self.age_max {
            pairs.push(("ageMax", max.to_string()));
        }
        pairs.push(("size", self.size.to_string()));
        pairs.push(("from", self.from.to_string()));
        pairs.push(("sort", self.sort.to_string()));
        pairs
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Parse an age input field. Blank input clears the bound.
pub fn parse_age_input(input: &str) -> Result<Option<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Error::InvalidInput(format!("age '{}' is not a non-negative integer", trimmed)))
}

/// Parse a zip code input field. Blank input clears the filter.
pub fn parse_zip_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "-" {
        None
    } else {
        Some(trimmed.to_string())
    }
}
