use serde::{Deserialize, Serialize};

/// A snapshot of a run as reported by the platform.
///
/// Every field is optional because platforms are free to omit anything
/// they consider irrelevant for the current state. Consumers decide which
/// missing fields are fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    /// The unique identifier for the run.
    pub id: Option<String>,
    /// The raw status string, e.g. `RUNNING` or `SUCCEEDED`.
    pub status: Option<String>,
    /// The dataset where the run stores its output items.
    pub default_dataset_id: Option<String>,
}

impl RunInfo {
    /// Returns the normalized status of this run.
    #[inline]
    pub fn run_status(&self) -> RunStatus {
        self.status.as_deref().map(RunStatus::from).unwrap_or_default()
    }
}

/// Normalized run status.
///
/// Platforms report a richer vocabulary (`READY`, `TIMING-OUT`,
/// `ABORTING`, ...). Everything that may still change is folded into
/// [`RunStatus::Running`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum RunStatus {
    /// The run has not reached a final state yet.
    #[default]
    Running,
    /// The run finished and its output is available.
    Succeeded,
    /// The run ended without producing usable output.
    Failed,
}

impl RunStatus {
    /// Returns `true` if the status will not change anymore.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

impl From<&str> for RunStatus {
    fn from(value: &str) -> Self {
        match value {
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" | "ABORTED" | "TIMED-OUT" => RunStatus::Failed,
            _ => RunStatus::Running,
        }
    }
}
