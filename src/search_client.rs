// Fetch orchestration for the search endpoint
//
// One fetch cycle per SearchParameters value: build the request body, issue
// a single POST, expose the outcome as a three-state result. Responses that
// complete after a newer request was issued are discarded rather than
// applied, so the displayed result set always corresponds to the latest
// parameters.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::booking::{BookingRequest, BookingResponse, SearchParameters};
use crate::party::{self, CompositionError};

// Production search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://www.virginholidays.co.uk/cjs-search-api/search";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Error, Debug, Clone)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("search endpoint returned status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("invalid party composition: {0}")]
    Composition(#[from] CompositionError),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: SEARCH_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// Transport seam for the search endpoint: one POST, JSON in and out.
// Production uses HttpSearchApi; tests substitute a scripted transport.
#[async_trait]
pub trait SearchApi: Send + Sync + 'static {
    async fn search(&self, request: &BookingRequest) -> Result<BookingResponse, SearchError>;
}

pub struct HttpSearchApi {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpSearchApi {
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, request: &BookingRequest) -> Result<BookingResponse, SearchError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(self.config.timeout_ms)
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        response
            .json::<BookingResponse>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

// Fetch lifecycle for the current search cycle.
#[derive(Debug, Clone)]
pub enum FetchState {
    Idle,
    Pending,
    Succeeded(BookingResponse),
    Failed(SearchError),
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }
}

// What one search call produced. Superseded means a newer request was
// issued while this one was in flight; its response was discarded.
#[derive(Debug)]
pub enum SearchOutcome {
    Loaded(BookingResponse),
    Superseded,
    Failed(SearchError),
}

pub struct SearchClient {
    api: Arc<dyn SearchApi>,
    state: RwLock<FetchState>,
    // Monotonic request token; only the latest issued request may apply
    // its outcome.
    latest_token: AtomicU64,
}

impl SearchClient {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self {
            api,
            state: RwLock::new(FetchState::Idle),
            latest_token: AtomicU64::new(0),
        }
    }

    // Client talking to the real search endpoint.
    pub fn http(config: ClientConfig) -> Result<Self, SearchError> {
        Ok(Self::new(Arc::new(HttpSearchApi::new(config)?)))
    }

    pub fn state(&self) -> FetchState {
        self.state.read().clone()
    }

    // Build the POST body for one search cycle: a pass-through of the query
    // parameters plus the normalized party composition.
    pub fn build_request(params: &SearchParameters) -> Result<BookingRequest, SearchError> {
        let party_compositions =
            party::parse_and_convert(&[params.party_compositions.as_str()])?;

        Ok(BookingRequest {
            booking_type: params.booking_type.clone(),
            direct: false,
            location: params.location.clone(),
            departure_date: params.departure_date.clone(),
            duration: params.duration.clone(),
            gateway: params.gateway.clone(),
            party_compositions,
        })
    }

    pub async fn search(&self, params: &SearchParameters) -> SearchOutcome {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write() = FetchState::Pending;

        let outcome = match Self::build_request(params) {
            Ok(request) => self.api.search(&request).await,
            Err(err) => Err(err),
        };

        if self.latest_token.load(Ordering::SeqCst) != token {
            debug!(token, "discarding superseded search response");
            return SearchOutcome::Superseded;
        }

        match outcome {
            Ok(response) => {
                debug!(token, holidays = response.holidays.len(), "search completed");
                *self.state.write() = FetchState::Succeeded(response.clone());
                SearchOutcome::Loaded(response)
            }
            Err(err) => {
                warn!(token, error = %err, "search failed");
                *self.state.write() = FetchState::Failed(err.clone());
                SearchOutcome::Failed(err)
            }
        }
    }
}
