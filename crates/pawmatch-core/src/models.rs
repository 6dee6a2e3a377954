//! Data models shared by the gateway and the views.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// =============================================================================
// IDENTITY
// =============================================================================

/// Authenticated identity established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    /// When the local session was created.
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            started_at: Utc::now(),
        }
    }

    /// Time elapsed since login.
    pub fn age(&self) -> Duration {
        Utc::now() - self.started_at
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
}

/// Error body returned by the remote service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// DOGS
// =============================================================================

/// Opaque, server-assigned dog identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(pub String);

impl DogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A dog record as returned by `POST /dogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

// =============================================================================
// SORTING
// =============================================================================

/// Field the remote search sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Breed,
    Name,
    Age,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Breed => "breed",
            SortField::Name => "name",
            SortField::Age => "age",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A `(field, direction)` pair, serialized as `field:direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Every sort key offered by the filter panel, in display order.
    pub const ALL: [SortKey; 6] = [
        SortKey::new(SortField::Breed, SortDirection::Asc),
        SortKey::new(SortField::Breed, SortDirection::Desc),
        SortKey::new(SortField::Age, SortDirection::Asc),
        SortKey::new(SortField::Age, SortDirection::Desc),
        SortKey::new(SortField::Name, SortDirection::Asc),
        SortKey::new(SortField::Name, SortDirection::Desc),
    ];

    /// Human-readable label for the sort selector.
    pub fn label(&self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Breed, SortDirection::Asc) => "Breed (A-Z)",
            (SortField::Breed, SortDirection::Desc) => "Breed (Z-A)",
            (SortField::Age, SortDirection::Asc) => "Age (Youngest)",
            (SortField::Age, SortDirection::Desc) => "Age (Oldest)",
            (SortField::Name, SortDirection::Asc) => "Name (A-Z)",
            (SortField::Name, SortDirection::Desc) => "Name (Z-A)",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::new(SortField::Breed, SortDirection::Asc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("sort key '{}' is not field:direction", s)))?;

        let field = match field.trim().to_lowercase().as_str() {
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            "age" => SortField::Age,
            other => {
                return Err(Error::InvalidInput(format!("unknown sort field '{}'", other)));
            }
        };
        let direction = match direction.trim().to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown sort direction '{}'",
                    other
                )));
            }
        };

        Ok(SortKey::new(field, direction))
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// One page of search results from `GET /dogs/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    pub result_ids: Vec<DogId>,
    pub total: u64,
    /// Cursor for the next page; the client pages by offset and ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Cursor for the previous page; ignored like `next`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Response of `POST /dogs/match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub matched: DogId,
}
