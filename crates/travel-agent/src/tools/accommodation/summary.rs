use std::fmt::{self, Display};

use super::record::ResultRecord;
use super::request::ValidSearch;

/// At most this many listings make it into a summary.
pub const MAX_ENTRIES: usize = 5;

/// Human-readable search results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    lines: Vec<String>,
}

impl Summary {
    /// Renders the first [`MAX_ENTRIES`] records for `search`.
    ///
    /// Records without a currency are labelled with `default_currency`.
    pub fn render(
        search: &ValidSearch,
        records: &[ResultRecord],
        default_currency: &str,
    ) -> Self {
        let mut lines = vec![format!("**Accommodation found in {}**", search.city)];
        if let (Some(check_in), Some(check_out)) =
            (search.check_in, search.check_out)
        {
            lines.push(format!("From {check_in} to {check_out}"));
        }
        lines.push(String::new());

        let nights = search.nights();
        for (idx, record) in records.iter().take(MAX_ENTRIES).enumerate() {
            lines.push(format!("{}. **{}**", idx + 1, record.display_name()));
            lines.push(price_line(record, nights, default_currency));
            if let Some(distance) = &record.distance_from_center {
                lines.push(distance.clone());
            }
            if let Some(url) = &record.url {
                lines.push(url.clone());
            }
            lines.push(String::new());
        }

        Self { lines }
    }

    /// Returns the rendered lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn price_line(
    record: &ResultRecord,
    nights: Option<u32>,
    default_currency: &str,
) -> String {
    let Some(total) = record.total_price() else {
        return "Price on request".to_owned();
    };
    let currency = record.currency_or(default_currency);
    match nights.and_then(|n| record.nightly_price(n)) {
        Some(nightly) => format!(
            "{total} {currency} (total for the stay, {nightly:.2} {currency} per night)"
        ),
        None => format!("{total} {currency} (total for the stay)"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn search(dates: Option<(&str, &str)>) -> ValidSearch {
        let parse = |d: &str| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok();
        ValidSearch {
            city: "Florence".to_owned(),
            check_in: dates.and_then(|(d, _)| parse(d)),
            check_out: dates.and_then(|(_, d)| parse(d)),
            adults: None,
            children: None,
            price_range: None,
        }
    }

    fn records(values: serde_json::Value) -> Vec<ResultRecord> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_full_entry() {
        let records = records(json!([{
            "name": "Hotel Duomo",
            "price": 450,
            "currency": "EUR",
            "distanceFromCenter": "0.3 km from center",
            "url": "https://example.com/duomo",
        }]));
        let summary = Summary::render(
            &search(Some(("2025-08-10", "2025-08-13"))),
            &records,
            "EUR",
        );
        assert_eq!(
            summary.lines(),
            [
                "**Accommodation found in Florence**",
                "From 2025-08-10 to 2025-08-13",
                "",
                "1. **Hotel Duomo**",
                "450 EUR (total for the stay, 150.00 EUR per night)",
                "0.3 km from center",
                "https://example.com/duomo",
                "",
            ]
        );
    }

    #[test]
    fn test_sparse_entry() {
        let records = records(json!([{ "title": "Casa Blu" }]));
        let summary = Summary::render(&search(None), &records, "EUR");
        assert_eq!(
            summary.to_string(),
            "**Accommodation found in Florence**\n\n1. **Casa Blu**\nPrice on request\n"
        );
    }

    #[test]
    fn test_single_date_has_no_range() {
        let records = records(json!([{ "name": "Ostello", "price": 300 }]));
        let mut search = search(Some(("2025-08-10", "2025-08-13")));
        search.check_out = None;

        let summary = Summary::render(&search, &records, "EUR");
        assert_eq!(
            summary.lines(),
            [
                "**Accommodation found in Florence**",
                "",
                "1. **Ostello**",
                "300 EUR (total for the stay)",
                "",
            ]
        );
    }

    #[test]
    fn test_default_currency_label() {
        let records = records(json!([{ "name": "Ostello", "price": 99.5 }]));
        let summary = Summary::render(&search(None), &records, "EUR");
        assert_eq!(summary.lines()[3], "99.5 EUR (total for the stay)");
    }

    #[test]
    fn test_caps_entries_in_order() {
        let records: Vec<_> = (1..=7)
            .map(|i| ResultRecord {
                name: Some(format!("Hotel {i}")),
                ..Default::default()
            })
            .collect();
        let summary = Summary::render(&search(None), &records, "EUR");

        let entries: Vec<_> = summary
            .lines()
            .iter()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(
            entries,
            [
                "1. **Hotel 1**",
                "2. **Hotel 2**",
                "3. **Hotel 3**",
                "4. **Hotel 4**",
                "5. **Hotel 5**",
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let records = records(json!([
            { "name": "A", "price": 100 },
            { "name": "B", "url": "https://example.com/b" },
        ]));
        let search = search(Some(("2025-01-01", "2025-01-02")));
        let first = Summary::render(&search, &records, "EUR").to_string();
        let second = Summary::render(&search, &records, "EUR").to_string();
        assert_eq!(first, second);
    }
}
