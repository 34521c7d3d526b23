use travel_agent_platform::RunInfo;

/// A run that has just been created.
#[inline]
pub fn started(run_id: &str) -> RunInfo {
    RunInfo {
        id: Some(run_id.to_owned()),
        status: Some("READY".to_owned()),
        default_dataset_id: None,
    }
}

/// A status reply for a run that is still in progress.
#[inline]
pub fn running() -> RunInfo {
    with_status("RUNNING")
}

/// A status reply for a failed run.
#[inline]
pub fn failed() -> RunInfo {
    with_status("FAILED")
}

/// A status reply for a finished run, optionally pointing at a dataset.
#[inline]
pub fn succeeded(dataset_id: Option<&str>) -> RunInfo {
    RunInfo {
        default_dataset_id: dataset_id.map(ToOwned::to_owned),
        ..with_status("SUCCEEDED")
    }
}

/// A status reply with an arbitrary raw status string.
#[inline]
pub fn with_status(status: &str) -> RunInfo {
    RunInfo {
        id: None,
        status: Some(status.to_owned()),
        default_dataset_id: None,
    }
}
