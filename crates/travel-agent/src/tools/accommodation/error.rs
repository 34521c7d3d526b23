use travel_agent_platform::{ErrorKind as PlatformErrorKind, PlatformError};

/// Broad classes of [`SearchError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchErrorKind {
    /// The request was rejected before any network activity.
    Validation,
    /// The platform answered, but the run produced nothing usable.
    RemoteFailure,
    /// The run did not finish within the polling ceiling.
    Timeout,
    /// The platform could not be reached.
    Transport,
    /// Anything else.
    Unknown,
}

/// Why an accommodation search did not produce a summary.
///
/// Remote outcomes carry the requested city.
///
/// The `Display` output is what the end user eventually reads.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request is incomplete or malformed.
    #[error("{0}")]
    Validation(String),
    /// The platform did not hand out a run id.
    #[error("Could not start the accommodation search for {0}")]
    NotStarted(String),
    /// The run ended in a failure state.
    #[error("Accommodation search failed for {0}")]
    Failed(String),
    /// The run was still going at the polling ceiling.
    #[error("Accommodation search timed out for {0}")]
    TimedOut(String),
    /// The run succeeded without pointing at its output.
    #[error("No dataset found for {0}")]
    NoDataset(String),
    /// The run produced an empty dataset.
    #[error("No accommodation found for {0}")]
    NothingFound(String),
    /// A request never got a usable answer.
    #[error("Connection error: {0}")]
    Transport(String),
    /// Anything else, e.g. a response that could not be decoded.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SearchError {
    /// Classifies a platform error by the layer it came from.
    pub fn from_platform<E: PlatformError>(err: E) -> Self {
        match err.kind() {
            PlatformErrorKind::Connection => Self::Transport(err.to_string()),
            PlatformErrorKind::InvalidResponse | PlatformErrorKind::Other => {
                Self::Unknown(err.to_string())
            }
        }
    }

    /// Returns the class of this error.
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            Self::Validation(_) => SearchErrorKind::Validation,
            Self::NotStarted(_)
            | Self::Failed(_)
            | Self::NoDataset(_)
            | Self::NothingFound(_) => SearchErrorKind::RemoteFailure,
            Self::TimedOut(_) => SearchErrorKind::Timeout,
            Self::Transport(_) => SearchErrorKind::Transport,
            Self::Unknown(_) => SearchErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_city() {
        let city = || "Lisbon".to_owned();
        for err in [
            SearchError::NotStarted(city()),
            SearchError::Failed(city()),
            SearchError::TimedOut(city()),
            SearchError::NoDataset(city()),
            SearchError::NothingFound(city()),
        ] {
            assert!(err.to_string().contains("Lisbon"), "{err}");
        }
    }

    #[test]
    fn test_timeout_is_distinct_from_failure() {
        let failed = SearchError::Failed("Oslo".to_owned());
        let timed_out = SearchError::TimedOut("Oslo".to_owned());
        assert_eq!(failed.kind(), SearchErrorKind::RemoteFailure);
        assert_eq!(timed_out.kind(), SearchErrorKind::Timeout);
        assert_ne!(failed.to_string(), timed_out.to_string());
    }

    #[test]
    fn test_transport_keeps_underlying_text() {
        let err = SearchError::Transport("connection reset".to_owned());
        assert_eq!(err.to_string(), "Connection error: connection reset");
        assert_eq!(err.kind(), SearchErrorKind::Transport);
    }
}
