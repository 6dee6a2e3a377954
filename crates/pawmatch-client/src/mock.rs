//! In-memory stub gateway for deterministic testing.
//!
//! Answers every [`DogGateway`] operation from a fixed dog catalog, applying
//! the same filtering, sorting and paging the remote service would. Calls are
//! recorded for assertions and individual operations can be made to fail.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pawmatch_client::mock::{sample_dogs, StubGateway, StubOperation};
//! use pawmatch_core::{DogGateway, SearchQuery};
//!
//! #[tokio::test]
//! async fn test_with_stub_gateway() {
//!     let gateway = StubGateway::new()
//!         .with_dogs(sample_dogs())
//!         .with_failure(StubOperation::ComputeMatch);
//!
//!     let page = gateway.search_dog_ids(&SearchQuery::default()).await.unwrap();
//!     assert!(page.total > 0);
//! }
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use pawmatch_core::{
    logging, Dog, DogGateway, DogId, Error, Result, SearchQuery, SearchResultPage, SortDirection,
    SortField, LOGIN_FAILED_MESSAGE,
};

/// Gateway operations, for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubOperation {
    Authenticate,
    EndSession,
    ListBreeds,
    SearchDogIds,
    FetchDogsByIds,
    ComputeMatch,
}

/// One recorded call.
#[derive(Debug, Clone)]
pub struct StubCall {
    pub operation: StubOperation,
    pub input: String,
}

#[derive(Debug, Clone, Default)]
struct StubConfig {
    dogs: Vec<Dog>,
    breeds: Option<Vec<String>>,
    failures: HashSet<StubOperation>,
    login_rejection: Option<Option<String>>,
    match_id: Option<DogId>,
}

/// Stub gateway for testing.
#[derive(Clone, Default)]
pub struct StubGateway {
    config: Arc<StubConfig>,
    call_log: Arc<Mutex<Vec<StubCall>>>,
}

impl StubGateway {
    /// Create an empty stub: no dogs, every login accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dog catalog.
    pub fn with_dogs(mut self, dogs: Vec<Dog>) -> Self {
        Arc::make_mut(&mut self.config).dogs = dogs;
        self
    }

    /// Set an explicit breed list. Without one, breeds are derived from the
    /// catalog, sorted and deduplicated.
    pub fn with_breeds(mut self, breeds: Vec<String>) -> Self {
        Arc::make_mut(&mut self.config).breeds = Some(breeds);
        self
    }

    /// Make every call to `operation` fail with a 500.
    pub fn with_failure(mut self, operation: StubOperation) -> Self {
        Arc::make_mut(&mut self.config).failures.insert(operation);
        self
    }

    /// Reject logins, optionally with a server message.
    pub fn with_rejected_login(mut self, message: Option<&str>) -> Self {
        Arc::make_mut(&mut self.config).login_rejection = Some(message.map(str::to_string));
        self
    }

    /// Always answer match requests with this id. Without one, the first
    /// favorite is returned.
    pub fn with_match(mut self, id: impl Into<DogId>) -> Self {
        Arc::make_mut(&mut self.config).match_id = Some(id.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<StubCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Operations in call order.
    pub fn operations(&self) -> Vec<StubOperation> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.operation)
            .collect()
    }

    /// Number of calls to `operation`.
    pub fn call_count(&self, operation: StubOperation) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn enter(&self, operation: StubOperation, input: String) -> Result<()> {
        debug!(subsystem = logging::GATEWAY, component = "stub", ?operation, input = %input, "Stub call");
        self.call_log.lock().unwrap().push(StubCall { operation, input });
        if self.config.failures.contains(&operation) {
            return Err(Error::Status {
                status: 500,
                body: format!("stub failure: {:?}", operation),
            });
        }
        Ok(())
    }

    fn matches(query: &SearchQuery, dog: &Dog) -> bool {
        if let Some(breeds) = &query.breeds {
            if !breeds.iter().any(|b| b == &dog.breed) {
                return false;
            }
        }
        if let Some(zips) = &query.zip_codes {
            if !zips.iter().any(|z| z == &dog.zip_code) {
                return false;
            }
        }
        if query.age_min.is_some_and(|min| dog.age < min) {
            return false;
        }
        if query.age_max.is_some_and(|max| dog.age > max) {
            return false;
        }
        true
    }

    fn compare(query: &SearchQuery, a: &Dog, b: &Dog) -> Ordering {
        let ord = match query.sort.field {
            SortField::Breed => a.breed.cmp(&b.breed),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
        };
        let ord = match query.sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    }
}

#[async_trait]
impl DogGateway for StubGateway {
    async fn authenticate(&self, name: &str, email: &str) -> Result<()> {
        self.enter(StubOperation::Authenticate, format!("{} <{}>", name, email))?;
        match &self.config.login_rejection {
            Some(message) => Err(Error::Auth(
                message
                    .clone()
                    .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
            )),
            None => Ok(()),
        }
    }

    async fn end_session(&self) -> Result<()> {
        self.enter(StubOperation::EndSession, String::new())
    }

    async fn list_breeds(&self) -> Result<Vec<String>> {
        self.enter(StubOperation::ListBreeds, String::new())?;
        if let Some(breeds) = &self.config.breeds {
            return Ok(breeds.clone());
        }
        let mut breeds: Vec<String> = self.config.dogs.iter().map(|d| d.breed.clone()).collect();
        breeds.sort();
        breeds.dedup();
        Ok(breeds)
    }

    async fn search_dog_ids(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        let input = query
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        self.enter(StubOperation::SearchDogIds, input)?;

        let mut hits: Vec<&Dog> = self
            .config
            .dogs
            .iter()
            .filter(|d| Self::matches(query, d))
            .collect();
        hits.sort_by(|a, b| Self::compare(query, a, b));

        let total = hits.len() as u64;
        let result_ids = hits
            .into_iter()
            .skip(query.from as usize)
            .take(query.size as usize)
            .map(|d| d.id.clone())
            .collect();

        Ok(SearchResultPage {
            result_ids,
            total,
            next: None,
            prev: None,
        })
    }

    async fn fetch_dogs_by_ids_remote(&self, ids: &[DogId]) -> Result<Vec<Dog>> {
        let input = ids
            .iter()
            .map(DogId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.enter(StubOperation::FetchDogsByIds, input)?;

        Ok(ids
            .iter()
            .filter_map(|id| self.config.dogs.iter().find(|d| &d.id == id).cloned())
            .collect())
    }

    async fn compute_match(&self, favorite_ids: &[DogId]) -> Result<DogId> {
        let input = favorite_ids
            .iter()
            .map(DogId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.enter(StubOperation::ComputeMatch, input)?;

        if let Some(id) = &self.config.match_id {
            return Ok(id.clone());
        }
        favorite_ids.first().cloned().ok_or_else(|| Error::Status {
            status: 400,
            body: "no favorites given".to_string(),
        })
    }
}

/// Small fixed catalog covering several breeds, ages and zip codes.
pub fn sample_dogs() -> Vec<Dog> {
    let rows: [(&str, &str, u32, &str, &str); 12] = [
        ("dog-1", "Rex", 3, "02139", "Beagle"),
        ("dog-2", "Bella", 1, "02139", "Pug"),
        ("dog-3", "Max", 5, "10001", "Beagle"),
        ("dog-4", "Luna", 7, "60614", "Akita"),
        ("dog-5", "Charlie", 2, "10001", "Beagle"),
        ("dog-6", "Daisy", 9, "94103", "Corgi"),
        ("dog-7", "Milo", 4, "02139", "Pug"),
        ("dog-8", "Rosie", 6, "60614", "Beagle"),
        ("dog-9", "Cooper", 0, "94103", "Corgi"),
        ("dog-10", "Sadie", 11, "10001", "Akita"),
        ("dog-11", "Buddy", 2, "60614", "Beagle"),
        ("dog-12", "Lola", 3, "94103", "Pug"),
    ];
    rows.into_iter()
        .map(|(id, name, age, zip, breed)| Dog {
            id: DogId::from(id),
            img: format!("https://images.example/{}.jpg", id),
            name: name.to_string(),
            age,
            zip_code: zip.to_string(),
            breed: breed.to_string(),
        })
        .collect()
}
