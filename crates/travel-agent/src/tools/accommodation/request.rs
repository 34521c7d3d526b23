use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

use super::error::SearchError;

/// Parameters of an accommodation search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// City to search in. Required.
    pub city: Option<String>,
    /// Check-in date, YYYY-MM-DD.
    pub check_in: Option<String>,
    /// Check-out date, YYYY-MM-DD.
    pub check_out: Option<String>,
    /// Number of adults.
    pub adults: Option<u32>,
    /// Number of children.
    pub children: Option<u32>,
    /// Price range per night as "min-max", e.g. "50-150".
    #[serde(rename = "minMaxPrice")]
    pub price_range: Option<String>,
}

/// A [`SearchRequest`] that passed validation.
///
/// Zero counts and blank strings have been dropped here, so every `Some`
/// is meant to reach the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidSearch {
    /// Trimmed, non-empty city name.
    pub city: String,
    /// Check-in date.
    pub check_in: Option<NaiveDate>,
    /// Check-out date.
    pub check_out: Option<NaiveDate>,
    /// Number of adults, never zero.
    pub adults: Option<u32>,
    /// Number of children, never zero.
    pub children: Option<u32>,
    /// Trimmed, non-empty price range.
    pub price_range: Option<String>,
}

impl ValidSearch {
    /// Number of nights between check-in and check-out, when both are
    /// known and in order.
    pub fn nights(&self) -> Option<u32> {
        let days = (self.check_out? - self.check_in?).num_days();
        u32::try_from(days).ok().filter(|nights| *nights > 0)
    }
}

impl SearchRequest {
    /// Checks the request without touching the network.
    ///
    /// A missing city is reported as a readable message rather than a
    /// deserialization error, which is why it is optional above.
    pub fn validate(self) -> Result<ValidSearch, SearchError> {
        let Some(city) = non_blank(self.city) else {
            return Err(SearchError::Validation(
                "Field 'city' is required.".to_owned(),
            ));
        };
        Ok(ValidSearch {
            city,
            check_in: parse_date("checkIn", self.check_in)?,
            check_out: parse_date("checkOut", self.check_out)?,
            adults: self.adults.filter(|n| *n > 0),
            children: self.children.filter(|n| *n > 0),
            price_range: non_blank(self.price_range),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_date(
    field: &str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, SearchError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            SearchError::Validation(format!(
                "Field '{field}' must be a date in YYYY-MM-DD format, got '{value}'."
            ))
        })
}
