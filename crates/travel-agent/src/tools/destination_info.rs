use std::time::Duration;

use reqwest::{Client, Url};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use travel_agent_core::tool::{Tool, ToolResult};

const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const NOT_AVAILABLE: &str = "N/A";

#[derive(Deserialize, JsonSchema)]
pub struct DestinationInfoParameters {
    #[schemars(description = "Name of the country, e.g. \"Japan\".")]
    country: String,
}

/// General facts about a country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CountryInfo {
    /// Common name.
    pub name: String,
    /// First listed capital.
    pub capital: String,
    /// First listed currency code.
    pub currency: String,
    /// First listed language.
    pub language: String,
    /// First listed timezone.
    pub timezone: String,
    /// Population, if known.
    #[serde(serialize_with = "serialize_or_na")]
    pub population: Option<u64>,
}

impl CountryInfo {
    /// Extracts the facts from a country record. Returns `None` when the
    /// record has no common name.
    pub fn from_record(record: &Value) -> Option<Self> {
        let name = record.pointer("/name/common")?.as_str()?.to_owned();
        let first_key = |field: &str| {
            record[field]
                .as_object()
                .and_then(|map| map.keys().next())
                .map(String::to_owned)
        };
        let first_value = |field: &str| match &record[field] {
            Value::Array(values) => values.first().and_then(Value::as_str),
            Value::Object(map) => map.values().next().and_then(Value::as_str),
            _ => None,
        }
        .map(str::to_owned);

        Some(Self {
            name,
            capital: or_na(first_value("capital")),
            currency: or_na(first_key("currencies")),
            language: or_na(first_value("languages")),
            timezone: or_na(first_value("timezones")),
            population: record["population"].as_u64(),
        })
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Report {
    Info(CountryInfo),
    Error { error: String },
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

fn serialize_or_na<S: Serializer>(
    value: &Option<u64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_u64(*value),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// A tool for looking up general information about a country.
pub struct DestinationInfoTool {
    client: Client,
    base_url: String,
    parameter_schema: Value,
}

impl DestinationInfoTool {
    /// Creates a new destination info tool backed by REST Countries.
    #[inline]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new destination info tool backed by a custom endpoint.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        DestinationInfoTool {
            client: Client::new(),
            base_url: base_url.into(),
            parameter_schema: schema_for!(DestinationInfoParameters).to_value(),
        }
    }

    fn lookup_url(&self, country: &str) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("name")
            .push(country);
        Some(url)
    }
}

impl Default for DestinationInfoTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for DestinationInfoTool {
    type Input = DestinationInfoParameters;

    fn name(&self) -> &str {
        "destination_info"
    }

    fn description(&self) -> &str {
        r#"
Looks up general information about a country: capital, currency, language, timezone and population.
Fields the source does not know are reported as "N/A"."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: DestinationInfoParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let req = self
            .lookup_url(input.country.trim())
            .map(|url| self.client.get(url).timeout(LOOKUP_TIMEOUT).send());

        async move {
            let report = match req {
                Some(req) => lookup(req).await,
                None => Report::Error {
                    error: "Country lookup failed: invalid endpoint".to_owned(),
                },
            };
            serde_json::to_string_pretty(&report).or_else(|err| {
                Ok(format!("{{\"error\": \"Country lookup failed: {err}\"}}"))
            })
        }
    }
}

async fn lookup(
    req: impl Future<Output = Result<reqwest::Response, reqwest::Error>>,
) -> Report {
    let failed = |err: reqwest::Error| Report::Error {
        error: format!("Country lookup failed: {}", err.without_url()),
    };
    let resp = match req.await {
        Ok(resp) => resp,
        Err(err) => return failed(err),
    };
    if !resp.status().is_success() {
        debug!("country lookup returned {}", resp.status());
        return not_found();
    }
    let records: Vec<Value> = match resp.json().await {
        Ok(records) => records,
        Err(err) => return failed(err),
    };
    match records.first().and_then(CountryInfo::from_record) {
        Some(info) => Report::Info(info),
        None => not_found(),
    }
}

fn not_found() -> Report {
    Report::Error {
        error: "Country not found".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn italy() -> Value {
        json!({
            "name": { "common": "Italy", "official": "Italian Republic" },
            "capital": ["Rome"],
            "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
            "languages": { "ita": "Italian", "cat": "Catalan" },
            "timezones": ["UTC+01:00"],
            "population": 59554023,
        })
    }

    #[test]
    fn test_from_record() {
        let info = CountryInfo::from_record(&italy()).unwrap();
        assert_eq!(
            info,
            CountryInfo {
                name: "Italy".to_owned(),
                capital: "Rome".to_owned(),
                currency: "EUR".to_owned(),
                language: "Italian".to_owned(),
                timezone: "UTC+01:00".to_owned(),
                population: Some(59554023),
            }
        );
    }

    #[test]
    fn test_missing_fields_are_na() {
        let info = CountryInfo::from_record(&json!({
            "name": { "common": "Antarctica" },
            "capital": [],
        }))
        .unwrap();
        assert_eq!(info.capital, "N/A");
        assert_eq!(info.currency, "N/A");
        assert_eq!(info.language, "N/A");
        assert_eq!(
            serde_json::to_value(&info).unwrap()["population"],
            json!("N/A")
        );

        assert_eq!(CountryInfo::from_record(&json!({ "capital": ["X"] })), None);
    }

    #[test]
    fn test_lookup_url_escapes_country() {
        let tool = DestinationInfoTool::with_base_url("https://example.com/v3.1/");
        assert_eq!(
            tool.lookup_url("United Kingdom").unwrap().as_str(),
            "https://example.com/v3.1/name/United%20Kingdom"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_error() {
        // Nothing listens on the discard port.
        let tool = DestinationInfoTool::with_base_url("http://127.0.0.1:9/v3.1");
        let output = tool
            .execute(DestinationInfoParameters {
                country: "Italy".to_owned(),
            })
            .await
            .unwrap();
        let report: Value = serde_json::from_str(&output).unwrap();
        let error = report["error"].as_str().unwrap();
        assert!(error.starts_with("Country lookup failed: "), "{error}");
    }
}
