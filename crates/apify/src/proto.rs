use serde::Deserialize;

/// Most Apify endpoints wrap their payload in a `data` object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

impl<T: Default> Envelope<T> {
    #[inline]
    pub fn into_data(self) -> T {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use travel_agent_platform::RunInfo;

    use super::*;

    #[test]
    fn test_parse_run_envelope() {
        let body = r#"{
            "data": {
                "id": "HG7ML7M8z78YcAPEB",
                "actId": "HDSasDasz78YcAPEB",
                "status": "SUCCEEDED",
                "defaultDatasetId": "wmKPijuyDnPZAPRMk"
            }
        }"#;
        let envelope: Envelope<RunInfo> = serde_json::from_str(body).unwrap();
        let run = envelope.into_data();
        assert_eq!(run.id.as_deref(), Some("HG7ML7M8z78YcAPEB"));
        assert_eq!(run.status.as_deref(), Some("SUCCEEDED"));
        assert_eq!(run.default_dataset_id.as_deref(), Some("wmKPijuyDnPZAPRMk"));
    }

    #[test]
    fn test_missing_data_is_empty_run() {
        let envelope: Envelope<RunInfo> =
            serde_json::from_str(r#"{"error": {"type": "oops"}}"#).unwrap();
        assert_eq!(envelope.into_data(), RunInfo::default());
    }
}
