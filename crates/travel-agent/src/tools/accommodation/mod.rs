//! Accommodation search through a scraping platform.
//!
//! A search starts a scraper run, polls it until it settles, downloads the
//! resulting listings and renders them as text. Every outcome, failures
//! included, ends up as a string for the runtime.

mod error;
mod payload;
mod record;
mod request;
mod summary;

use std::sync::Arc;

use schemars::schema_for;
use serde_json::Value;
use travel_agent_core::poll::{PollError, Poller, Sleeper, TokioSleeper};
use travel_agent_core::tool::{Tool, ToolResult};
use travel_agent_platform::TaskPlatform;

pub use error::{SearchError, SearchErrorKind};
pub use payload::{SearchDefaults, SearchPayload};
pub use record::ResultRecord;
pub use request::{SearchRequest, ValidSearch};
pub use summary::{MAX_ENTRIES, Summary};

/// The scraper actor used by default.
pub const DEFAULT_ACTOR_ID: &str = "voyager~booking-scraper";

/// The search workflow, independent of the tool interface.
pub struct AccommodationSearch<P, S = TokioSleeper> {
    platform: P,
    poller: Poller<S>,
    defaults: SearchDefaults,
}

impl<P: TaskPlatform> AccommodationSearch<P> {
    /// Creates a search on `platform` with the default payload and polling
    /// policy.
    #[inline]
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            poller: Poller::default(),
            defaults: SearchDefaults::default(),
        }
    }
}

impl<P: TaskPlatform, S: Sleeper> AccommodationSearch<P, S> {
    /// Replaces the poller.
    #[inline]
    pub fn with_poller<S2: Sleeper>(
        self,
        poller: Poller<S2>,
    ) -> AccommodationSearch<P, S2> {
        AccommodationSearch {
            platform: self.platform,
            poller,
            defaults: self.defaults,
        }
    }

    /// Replaces the fixed part of the payload.
    #[inline]
    pub fn with_defaults(mut self, defaults: SearchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Runs one search.
    pub async fn search(
        &self,
        request: SearchRequest,
    ) -> Result<Summary, SearchError> {
        let search = request.validate()?;
        let city = &search.city;

        let payload = SearchPayload::for_search(&search, &self.defaults);
        info!("searching accommodation in {city}");
        let run = self
            .platform
            .start_run(&payload.to_value())
            .await
            .map_err(SearchError::from_platform)?;
        let Some(run_id) = run.id.filter(|id| !id.is_empty()) else {
            return Err(SearchError::NotStarted(city.clone()));
        };

        let run = self
            .poller
            .wait_for(&self.platform, &run_id)
            .await
            .map_err(|err| match err {
                PollError::Failed(_) => SearchError::Failed(city.clone()),
                PollError::TimedOut { .. } => {
                    SearchError::TimedOut(city.clone())
                }
                PollError::Platform(err) => SearchError::from_platform(err),
            })?;
        let Some(dataset_id) =
            run.default_dataset_id.filter(|id| !id.is_empty())
        else {
            return Err(SearchError::NoDataset(city.clone()));
        };

        let items = self
            .platform
            .dataset_items(&dataset_id)
            .await
            .map_err(SearchError::from_platform)?;
        if items.is_empty() {
            return Err(SearchError::NothingFound(city.clone()));
        }
        info!("run {run_id} found {} listings in {city}", items.len());

        let records = items
            .into_iter()
            .take(MAX_ENTRIES)
            .map(serde_json::from_value)
            .collect::<Result<Vec<ResultRecord>, _>>()
            .map_err(|err| SearchError::Unknown(err.to_string()))?;

        Ok(Summary::render(&search, &records, &self.defaults.currency))
    }

    /// Runs one search and renders the outcome, whatever it is, as text.
    pub async fn search_text(&self, request: SearchRequest) -> String {
        match self.search(request).await {
            Ok(summary) => summary.to_string(),
            Err(err) => {
                debug!("accommodation search ended early: {err:?}");
                err.to_string()
            }
        }
    }
}

/// A tool for finding accommodation in a city.
pub struct AccommodationTool<P, S = TokioSleeper> {
    search: Arc<AccommodationSearch<P, S>>,
    parameter_schema: Value,
}

impl<P, S> AccommodationTool<P, S> {
    /// Creates a new accommodation tool.
    #[inline]
    pub fn new(search: AccommodationSearch<P, S>) -> Self {
        AccommodationTool {
            search: Arc::new(search),
            parameter_schema: schema_for!(SearchRequest).to_value(),
        }
    }
}

impl<P, S> Tool for AccommodationTool<P, S>
where
    P: TaskPlatform + 'static,
    S: Sleeper,
{
    type Input = SearchRequest;

    fn name(&self) -> &str {
        "search_accommodation"
    }

    fn description(&self) -> &str {
        r#"
Searches accommodation in a city and returns up to 5 listings with price, distance from the center and a link.
`price` is the total for the whole stay, not per night. `minMaxPrice` is a per-night range.
The search may take up to a minute."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: SearchRequest,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let search = Arc::clone(&self.search);
        async move { Ok(search.search_text(input).await) }
    }
}
