use std::time::Instant;

use crate::models::{Property, SearchResponse};
use crate::search::error::SearchError;
use crate::search::traits::SearchBackend;
use crate::search::types::SearchQuery;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const VALIDATION_MESSAGE: &str =
    "Please enter district, mandal, village IDs and survey number.";
pub const NOT_FOUND_MESSAGE: &str = "No properties found for given filters.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Pre-flight check failure. Never reaches the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", VALIDATION_MESSAGE)]
    MissingField(&'static str),

    #[error("{}", VALIDATION_MESSAGE)]
    BlankSurveyNo,
}

/// Where the form is in its search cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Loading,
    Success,
    Failed,
}

/// A search that passed validation and is waiting for its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Map a backend failure to the message shown to the user
pub fn failure_message(err: &SearchError) -> &'static str {
    match err {
        SearchError::NotFound => NOT_FOUND_MESSAGE,
        SearchError::Timeout | SearchError::Other(_) => SEARCH_FAILED_MESSAGE,
    }
}

/// Property search form: four input fields plus loading / error / results state.
///
/// Every submit takes a new sequence number and only the outcome carrying the
/// latest number is applied, so a slow earlier search can never overwrite a
/// newer one.
#[derive(Debug, Default)]
pub struct SearchForm {
    pub district: Option<String>,
    pub mandal: Option<String>,
    pub village: Option<String>,
    pub survey_no: Option<String>,

    loading: bool,
    error_msg: Option<String>,
    results: Vec<Property>,
    phase: Phase,
    latest_seq: u64,
}

impl SearchForm {
    /// Build a form with its input fields already filled in
    pub fn with_fields(
        district: Option<String>,
        mandal: Option<String>,
        village: Option<String>,
        survey_no: Option<String>,
    ) -> Self {
        Self {
            district,
            mandal,
            village,
            survey_no,
            ..Self::default()
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    pub fn results(&self) -> &[Property] {
        &self.results
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check the current fields and build the outgoing query.
    ///
    /// District, mandal and village only need to be present; an empty string
    /// passes. The survey number must be non-blank and is sent trimmed.
    pub fn validate(&self) -> Result<SearchQuery, ValidationError> {
        let district = self
            .district
            .as_ref()
            .ok_or(ValidationError::MissingField("district"))?;
        let mandal = self
            .mandal
            .as_ref()
            .ok_or(ValidationError::MissingField("mandal"))?;
        let village = self
            .village
            .as_ref()
            .ok_or(ValidationError::MissingField("village"))?;
        let survey_no = self
            .survey_no
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::BlankSurveyNo)?;

        Ok(SearchQuery::new(
            district.as_str(),
            mandal.as_str(),
            village.as_str(),
            survey_no,
        ))
    }

    /// Start a search cycle. Returns a ticket when the request should go out,
    /// or `None` when validation failed and the error message has been set.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        self.phase = Phase::Validating;
        self.error_msg = None;
        self.results.clear();
        // Any earlier in-flight search is now stale.
        self.latest_seq += 1;

        match self.validate() {
            Err(err) => {
                debug!("Search form rejected: {:?}", err);
                self.error_msg = Some(err.to_string());
                self.loading = false;
                self.phase = Phase::Idle;
                None
            }
            Ok(query) => {
                self.loading = true;
                self.phase = Phase::Loading;
                Some(SearchTicket {
                    seq: self.latest_seq,
                    query,
                })
            }
        }
    }

    /// Apply the outcome of a submitted search. Returns `false` if the ticket
    /// was superseded by a later submit and the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResponse, SearchError>,
    ) -> bool {
        if ticket.seq() != self.latest_seq {
            debug!(
                "Discarding stale search #{} (latest is #{})",
                ticket.seq(),
                self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(response) => {
                debug!("Search #{} returned {} results", ticket.seq, response.count);
                self.results = response.results;
                self.phase = Phase::Success;
            }
            Err(err) => {
                warn!("Search #{} failed: {}", ticket.seq, err);
                self.results.clear();
                self.error_msg = Some(failure_message(&err).to_string());
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// Validate, run the search against `backend`, and apply the outcome
    pub async fn on_search<B: SearchBackend + ?Sized>(&mut self, backend: &B) {
        let Some(ticket) = self.submit() else {
            return;
        };

        let started = Instant::now();
        let outcome = backend.search_properties(ticket.query()).await;
        info!(
            "search-call via {} took {} ms",
            backend.backend_name(),
            started.elapsed().as_millis()
        );

        self.resolve(&ticket, outcome);
    }
}
