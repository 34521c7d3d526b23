use serde::Serialize;
use serde_json::Value;

use super::request::ValidSearch;

/// Fixed part of every search payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchDefaults {
    /// How many listings the scraper should collect.
    pub max_items: u32,
    /// Currency prices are quoted in.
    pub currency: String,
    /// Locale of the scraped pages.
    pub language: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            max_items: 3,
            currency: "EUR".to_owned(),
            language: "it".to_owned(),
        }
    }
}

/// Actor input for one search.
///
/// Starts from [`SearchDefaults`]; optional fields are overlaid only when
/// present so the scraper keeps its own defaults for everything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    search: String,
    max_items: u32,
    currency: String,
    language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adults: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_max_price: Option<String>,
}

impl SearchPayload {
    /// Creates the base payload for `city`.
    pub fn base(city: &str, defaults: &SearchDefaults) -> Self {
        Self {
            search: city.to_owned(),
            max_items: defaults.max_items,
            currency: defaults.currency.clone(),
            language: defaults.language.clone(),
            check_in: None,
            check_out: None,
            adults: None,
            children: None,
            min_max_price: None,
        }
    }

    /// Creates the payload for a validated search.
    pub fn for_search(search: &ValidSearch, defaults: &SearchDefaults) -> Self {
        let date = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
        Self::base(&search.city, defaults)
            .with_check_in(search.check_in.map(date))
            .with_check_out(search.check_out.map(date))
            .with_adults(search.adults)
            .with_children(search.children)
            .with_price_range(search.price_range.clone())
    }

    /// Sets the check-in date. `None` leaves the payload untouched.
    #[inline]
    pub fn with_check_in(mut self, value: Option<String>) -> Self {
        if value.is_some() {
            self.check_in = value;
        }
        self
    }

    /// Sets the check-out date. `None` leaves the payload untouched.
    #[inline]
    pub fn with_check_out(mut self, value: Option<String>) -> Self {
        if value.is_some() {
            self.check_out = value;
        }
        self
    }

    /// Sets the number of adults. `None` leaves the payload untouched.
    #[inline]
    pub fn with_adults(mut self, value: Option<u32>) -> Self {
        if value.is_some() {
            self.adults = value;
        }
        self
    }

    /// Sets the number of children. `None` leaves the payload untouched.
    #[inline]
    pub fn with_children(mut self, value: Option<u32>) -> Self {
        if value.is_some() {
            self.children = value;
        }
        self
    }

    /// Sets the nightly price range. `None` leaves the payload untouched.
    #[inline]
    pub fn with_price_range(mut self, value: Option<String>) -> Self {
        if value.is_some() {
            self.min_max_price = value;
        }
        self
    }

    /// Serializes the payload into the JSON sent to the platform.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_base_payload() {
        let payload = SearchPayload::base("Rome", &SearchDefaults::default());
        assert_eq!(
            payload.to_value(),
            json!({
                "search": "Rome",
                "maxItems": 3,
                "currency": "EUR",
                "language": "it",
            })
        );
    }

    #[test]
    fn test_overlay_present_fields_only() {
        let search = ValidSearch {
            city: "Rome".to_owned(),
            check_in: NaiveDate::from_ymd_opt(2025, 8, 10),
            check_out: None,
            adults: Some(2),
            children: None,
            price_range: Some("50-150".to_owned()),
        };
        let payload =
            SearchPayload::for_search(&search, &SearchDefaults::default());
        assert_eq!(
            payload.to_value(),
            json!({
                "search": "Rome",
                "maxItems": 3,
                "currency": "EUR",
                "language": "it",
                "checkIn": "2025-08-10",
                "adults": 2,
                "minMaxPrice": "50-150",
            })
        );
    }

    #[test]
    fn test_absent_value_keeps_previous_overlay() {
        let payload = SearchPayload::base("Rome", &SearchDefaults::default())
            .with_adults(Some(3))
            .with_adults(None);
        assert_eq!(payload.to_value()["adults"], json!(3));
    }
}
