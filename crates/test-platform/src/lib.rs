//! A local fake task platform for testing purpose.

pub mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use travel_agent_platform::{
    ErrorKind, PlatformError, RunInfo, TaskPlatform,
};

#[derive(Clone, Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
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

/// A call received by [`ScriptedPlatform`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformCall {
    StartRun(Value),
    GetRun(String),
    DatasetItems(String),
}

#[derive(Default)]
struct Script {
    start: Option<Result<RunInfo, Error>>,
    statuses: Vec<Result<RunInfo, Error>>,
    dataset: Option<Result<Vec<Value>, Error>>,
}

#[derive(Default)]
struct State {
    script: Script,
    next_status: usize,
    calls: Vec<PlatformCall>,
}

/// A local fake platform for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// platform should reply to each kind of call. Status replies are handed
/// out in order, and the last one is repeated once the script runs out, so
/// a single `RUNNING` reply simulates a run that never finishes. Calls
/// without a scripted reply fail with [`ErrorKind::Other`].
///
/// Clones share the same script and call log.
///
/// # Note
///
/// This type is not optimized for production use. You should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct ScriptedPlatform {
    state: Arc<Mutex<State>>,
}

impl ScriptedPlatform {
    #[inline]
    pub fn set_start_reply(&self, run: RunInfo) {
        self.lock().script.start = Some(Ok(run));
    }

    #[inline]
    pub fn add_status_reply(&self, run: RunInfo) {
        self.lock().script.statuses.push(Ok(run));
    }

    #[inline]
    pub fn set_dataset_reply(&self, items: Vec<Value>) {
        self.lock().script.dataset = Some(Ok(items));
    }

    #[inline]
    pub fn fail_start(&self, error: Error) {
        self.lock().script.start = Some(Err(error));
    }

    #[inline]
    pub fn add_status_failure(&self, error: Error) {
        self.lock().script.statuses.push(Err(error));
    }

    #[inline]
    pub fn fail_dataset(&self, error: Error) {
        self.lock().script.dataset = Some(Err(error));
    }

    /// Returns every call received so far, in order.
    #[inline]
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.lock().calls.clone()
    }

    /// Returns the number of status polls received so far.
    pub fn status_polls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, PlatformCall::GetRun(_)))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Debug for ScriptedPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedPlatform")
            .field("calls", &self.lock().calls)
            .finish_non_exhaustive()
    }
}

fn unscripted<T>(what: &str) -> Result<T, Error> {
    Err(Error::new(format!("no scripted reply for {what}"), ErrorKind::Other))
}

impl TaskPlatform for ScriptedPlatform {
    type Error = Error;

    fn start_run(
        &self,
        input: &Value,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static
    {
        let mut state = self.lock();
        state.calls.push(PlatformCall::StartRun(input.clone()));
        let reply = state
            .script
            .start
            .clone()
            .unwrap_or_else(|| unscripted("start_run"));
        ready(reply)
    }

    fn get_run(
        &self,
        run_id: &str,
    ) -> impl Future<Output = Result<RunInfo, Self::Error>> + Send + 'static
    {
        let mut state = self.lock();
        state.calls.push(PlatformCall::GetRun(run_id.to_owned()));
        let idx = state.next_status;
        let reply = match state.script.statuses.len() {
            0 => unscripted("get_run"),
            len => state.script.statuses[idx.min(len - 1)].clone(),
        };
        state.next_status += 1;
        ready(reply)
    }

    fn dataset_items(
        &self,
        dataset_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + 'static
    {
        let mut state = self.lock();
        state
            .calls
            .push(PlatformCall::DatasetItems(dataset_id.to_owned()));
        let reply = state
            .script
            .dataset
            .clone()
            .unwrap_or_else(|| unscripted("dataset_items"));
        ready(reply)
    }
}
