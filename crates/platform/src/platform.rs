use std::error::Error;

use serde_json::Value;

use crate::error::ErrorKind;
use crate::run::RunInfo;

/// The error type for a task platform.
pub trait PlatformError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A remote platform that executes jobs of one pre-configured task.
///
/// Once the platform is created, it should behave like a stateless object.
/// Every method maps to exactly one round trip, and callers are free to
/// invoke them from multiple tasks at the same time.
///
/// The returned futures must not borrow `self`, so that a caller can drive
/// them after the platform handle has been moved elsewhere.
pub trait TaskPlatform: Send + Sync {
    /// The error type that may be returned by the platform.
    type Error: PlatformError;

    /// Starts a new run of the task with the given input.
    fn start_run(
        &self,
        input: &Value,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static;

    /// Fetches the current state of a run.
    fn get_run(
        &self,
        run_id: &str,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static;

    /// Downloads all items stored in a dataset.
    fn dataset_items(
        &self,
        dataset_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + 'static;
}
