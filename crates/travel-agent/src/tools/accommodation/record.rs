use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAME_PLACEHOLDER: &str = "Name not available";

/// One accommodation listing produced by the scraper.
///
/// Scrapers are loose about types, so text fields accept numbers too and
/// `price` accepts numeric strings. Blank values read as absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Listing name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Alternate name some scrapers use instead of `name`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Price for the whole stay.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// Currency of `price`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub currency: Option<String>,
    /// Distance from the city center, already human readable.
    #[serde(default, deserialize_with = "lenient_text")]
    pub distance_from_center: Option<String>,
    /// Link to the listing.
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

impl ResultRecord {
    /// Returns the best available name.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(NAME_PLACEHOLDER)
    }

    /// Returns the total price for the stay. Non-positive prices mean the
    /// listing did not quote one.
    #[inline]
    pub fn total_price(&self) -> Option<f64> {
        self.price.filter(|price| *price > 0.0)
    }

    /// Returns the price per night, given the length of the stay.
    pub fn nightly_price(&self, nights: u32) -> Option<f64> {
        if nights == 0 {
            return None;
        }
        self.total_price().map(|total| total / f64::from(nights))
    }

    /// Returns the quoted currency, or `fallback` when there is none.
    #[inline]
    pub fn currency_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(fallback)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return Ok(None),
    };
    Ok(Some(text).filter(|t| !t.is_empty()))
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(price.filter(|p: &f64| p.is_finite()))
}
