//! A task platform backed by the Apify REST API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use travel_agent_platform::{
    ErrorKind, PlatformError, RunInfo, TaskPlatform,
};

pub use config::{ApifyConfig, ApifyConfigBuilder};
use proto::Envelope;

/// Error type for [`ApifyPlatform`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl PlatformError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // URLs carry the API token as a query parameter.
        Self::new(format!("{}", err.without_url()), ErrorKind::Connection)
    }
}

/// Apify actor runner.
#[derive(Clone, Debug)]
pub struct ApifyPlatform {
    client: Client,
    config: Arc<ApifyConfig>,
}

impl ApifyPlatform {
    /// Creates a new `ApifyPlatform` with the given configuration.
    #[inline]
    pub fn new(config: ApifyConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this platform.
    #[inline]
    pub fn config(&self) -> &ApifyConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let url = format!("{}{}", self.config.base_url, path);
        Url::parse_with_params(&url, [("token", self.config.token.as_str())])
            .map_err(|err| {
                Error::new(format!("Invalid endpoint: {err}"), ErrorKind::Other)
            })
    }
}

impl TaskPlatform for ApifyPlatform {
    type Error = Error;

    fn start_run(
        &self,
        input: &Value,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static
    {
        let path = format!("/acts/{}/runs", self.config.actor_id);
        let resp_fut = self
            .endpoint(&path)
            .map(|url| self.client.post(url).json(input).send());

        async move {
            let envelope: Envelope<RunInfo> = read_json(resp_fut?.await).await?;
            let run = envelope.into_data();
            debug!("started run: {:?}", run.id);
            Ok(run)
        }
    }

    fn get_run(
        &self,
        run_id: &str,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static
    {
        let path = format!("/acts/{}/runs/{}", self.config.actor_id, run_id);
        let resp_fut =
            self.endpoint(&path).map(|url| self.client.get(url).send());

        async move {
            let envelope: Envelope<RunInfo> = read_json(resp_fut?.await).await?;
            Ok(envelope.into_data())
        }
    }

    fn dataset_items(
        &self,
        dataset_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + 'static
    {
        let path = format!("/datasets/{dataset_id}/items");
        let resp_fut =
            self.endpoint(&path).map(|url| self.client.get(url).send());

        async move {
            let items: Vec<Value> = read_json(resp_fut?.await).await?;
            debug!("downloaded {} dataset items", items.len());
            Ok(items)
        }
    }
}

async fn read_json<T: DeserializeOwned>(
    resp_or_err: Result<Response, reqwest::Error>,
) -> Result<T, Error> {
    let resp = resp_or_err.and_then(Response::error_for_status)?;
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| {
        Error::new(
            format!("Unexpected response body: {err}"),
            ErrorKind::InvalidResponse,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> ApifyPlatform {
        ApifyPlatform::new(
            ApifyConfigBuilder::with_actor("voyager~booking-scraper", "t0k")
                .with_base_url("http://localhost:9/v2")
                .build(),
        )
    }

    #[test]
    fn test_endpoint_carries_token() {
        let url = platform()
            .endpoint("/acts/voyager~booking-scraper/runs/abc")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9/v2/acts/voyager~booking-scraper/runs/abc?token=t0k"
        );
    }

    #[tokio::test]
    async fn test_connection_error_hides_token() {
        // Nothing listens on the discard port.
        let err = platform().get_run("abc").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert!(!err.message().contains("t0k"));
    }
}
