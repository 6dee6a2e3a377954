//! HTTP gateway to the remote dog service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info, instrument, warn};

use pawmatch_core::{
    defaults, logging, ApiErrorBody, Dog, DogGateway, DogId, Error, LoginRequest, MatchResult,
    Result, SearchQuery, SearchResultPage, LOGIN_FAILED_MESSAGE,
};

use crate::config::ClientConfig;

/// Gateway that talks to the remote service over HTTPS.
///
/// The underlying client keeps a cookie jar, so the session cookie set by
/// `POST /auth/login` is sent on every later request.
pub struct FetchGateway {
    client: Client,
    config: ClientConfig,
}

impl FetchGateway {
    /// Create a gateway with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.validate()?;

        let mut builder = Client::builder().cookie_store(true);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            timeout_secs = ?config.timeout_seconds,
            "Initializing dog service gateway"
        );

        Ok(Self { client, config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header("Content-Type", "application/json")
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header("Content-Type", "application/json")
    }

    /// Send a request, logging it, and turn non-success statuses into
    /// [`Error::Status`].
    async fn send(&self, method: &'static str, path: &'static str, req: RequestBuilder) -> Result<Response> {
        debug!(method, path, "Making request");
        let start = Instant::now();

        let response = req.send().await.map_err(|e| {
            error!(method, path, error = %e, "API error: request failed");
            Error::from(e)
        })?;

        let elapsed = start.elapsed().as_millis() as u64;
        let status = response.status();
        if elapsed > defaults::SLOW_REQUEST_MS {
            warn!(method, path, duration_ms = elapsed, slow = true, "Slow request");
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(method, path, status = status.as_u16(), body = %body, "API error");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(method, path, status = status.as_u16(), duration_ms = elapsed, "Request complete");
        Ok(response)
    }

    async fn json<T: serde::de::DeserializeOwned>(path: &'static str, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            error!(path, error = %e, "API error: failed to parse response");
            Error::Serialization(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

/// Extract the user-facing login failure message from an error body.
pub(crate) fn login_failure_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string())
}

#[async_trait]
impl DogGateway for FetchGateway {
    #[instrument(skip(self, name, email), fields(subsystem = logging::GATEWAY, component = "fetch", op = "authenticate"))]
    async fn authenticate(&self, name: &str, email: &str) -> Result<()> {
        let body = LoginRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        match self
            .send("POST", "/auth/login", self.post("/auth/login").json(&body))
            .await
        {
            Ok(_) => {
                info!("Login successful");
                Ok(())
            }
            Err(Error::Status { body, .. }) => Err(Error::Auth(login_failure_message(&body))),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self), fields(subsystem = logging::GATEWAY, component = "fetch", op = "end_session"))]
    async fn end_session(&self) -> Result<()> {
        self.send("POST", "/auth/logout", self.post("/auth/logout"))
            .await
            .map(|_| ())
    }

    #[instrument(skip(self), fields(subsystem = logging::GATEWAY, component = "fetch", op = "list_breeds"))]
    async fn list_breeds(&self) -> Result<Vec<String>> {
        let response = self
            .send("GET", "/dogs/breeds", self.get("/dogs/breeds"))
            .await?;
        let breeds: Vec<String> = Self::json("/dogs/breeds", response).await?;
        debug!(result_count = breeds.len(), "Breeds fetched");
        Ok(breeds)
    }

    #[instrument(skip(self, query), fields(subsystem = logging::GATEWAY, component = "fetch", op = "search_dog_ids", from = query.from, sort = %query.sort))]
    async fn search_dog_ids(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        let pairs = query.to_query_pairs();
        let response = self
            .send("GET", "/dogs/search", self.get("/dogs/search").query(&pairs))
            .await?;
        let page: SearchResultPage = Self::json("/dogs/search", response).await?;
        debug!(
            total = page.total,
            result_count = page.result_ids.len(),
            "Search complete"
        );
        Ok(page)
    }

    #[instrument(skip(self, ids), fields(subsystem = logging::GATEWAY, component = "fetch", op = "fetch_dogs_by_ids", input_count = ids.len()))]
    async fn fetch_dogs_by_ids_remote(&self, ids: &[DogId]) -> Result<Vec<Dog>> {
        let response = self
            .send("POST", "/dogs", self.post("/dogs").json(ids))
            .await?;
        let dogs: Vec<Dog> = Self::json("/dogs", response).await?;
        debug!(result_count = dogs.len(), "Dogs resolved");
        Ok(dogs)
    }

    #[instrument(skip(self, favorite_ids), fields(subsystem = logging::GATEWAY, component = "fetch", op = "compute_match", input_count = favorite_ids.len()))]
    async fn compute_match(&self, favorite_ids: &[DogId]) -> Result<DogId> {
        let response = self
            .send("POST", "/dogs/match", self.post("/dogs/match").json(favorite_ids))
            .await?;
        let result: MatchResult = Self::json("/dogs/match", response).await?;
        info!(dog_id = %result.matched, "Match computed");
        Ok(result.matched)
    }
}
