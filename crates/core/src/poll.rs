//! Bounded polling of remote runs.
//!
//! A run is polled at a fixed cadence until it reaches a terminal status
//! or the accumulated waiting time hits the ceiling. There is no backoff
//! and no way to cancel the loop from outside other than dropping the
//! future.

use std::time::Duration;

use travel_agent_platform::{RunInfo, RunStatus, TaskPlatform};

/// The shortest interval a [`PollPolicy`] accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Cadence and deadline for [`Poller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PollPolicy {
    interval: Duration,
    ceiling: Duration,
}

impl PollPolicy {
    /// Creates a policy that waits `interval` between polls and gives up
    /// once `ceiling` has been spent waiting.
    ///
    /// Intervals shorter than one millisecond are rounded up.
    #[inline]
    pub fn new(interval: Duration, ceiling: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            ceiling,
        }
    }

    /// Returns the pause between two polls.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the total waiting budget.
    #[inline]
    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }
}

impl Default for PollPolicy {
    /// Polls every 5 seconds for at most 60 seconds.
    #[inline]
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(60))
    }
}

/// Something that can pause the current task.
///
/// Production code uses [`TokioSleeper`]. Tests plug in their own
/// implementation to observe or skip the pauses.
pub trait Sleeper: Send + Sync + 'static {
    /// Pauses for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// A [`Sleeper`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    #[inline]
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Why polling stopped without a successful run.
#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    /// The platform reported a failed run.
    #[error("run failed with status {:?}", .0.status)]
    Failed(RunInfo),
    /// The run was still going when the waiting budget ran out.
    #[error("run did not finish within {waited:?}")]
    TimedOut {
        /// Time spent waiting between polls.
        waited: Duration,
    },
    /// A status request failed.
    #[error(transparent)]
    Platform(E),
}

/// Polls a run until it succeeds, fails, or runs out of time.
#[derive(Clone, Debug, Default)]
pub struct Poller<S = TokioSleeper> {
    policy: PollPolicy,
    sleeper: S,
}

impl Poller<TokioSleeper> {
    /// Creates a poller with the given policy, sleeping on the tokio timer.
    #[inline]
    pub fn new(policy: PollPolicy) -> Self {
        Self::with_sleeper(policy, TokioSleeper)
    }
}

impl<S: Sleeper> Poller<S> {
    /// Creates a poller with a custom sleeper.
    #[inline]
    pub fn with_sleeper(policy: PollPolicy, sleeper: S) -> Self {
        Self { policy, sleeper }
    }

    /// Returns the policy of this poller.
    #[inline]
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Waits for the run to reach a terminal status.
    ///
    /// The first status request is sent right away. On success, the last
    /// status snapshot is returned so that callers can read the output
    /// location from it.
    pub async fn wait_for<P: TaskPlatform>(
        &self,
        platform: &P,
        run_id: &str,
    ) -> Result<RunInfo, PollError<P::Error>> {
        let mut waited = Duration::ZERO;
        while waited < self.policy.ceiling {
            let run = platform
                .get_run(run_id)
                .await
                .map_err(PollError::Platform)?;
            debug!("run {run_id} status: {:?}", run.status);

            match run.run_status() {
                RunStatus::Succeeded => return Ok(run),
                RunStatus::Failed => return Err(PollError::Failed(run)),
                RunStatus::Running => {}
            }

            self.sleeper.sleep(self.policy.interval).await;
            waited += self.policy.interval;
        }
        warn!("gave up on run {run_id} after {waited:?}");
        Err(PollError::TimedOut { waited })
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;
    use std::sync::{Arc, Mutex};

    use travel_agent_platform::{ErrorKind, PlatformError};
    use travel_agent_test_platform::{Error, ScriptedPlatform, preset};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSleeper {
        pauses: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        fn total(&self) -> Duration {
            self.pauses.lock().unwrap().iter().sum()
        }

        fn count(&self) -> usize {
            self.pauses.lock().unwrap().len()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
            self.pauses.lock().unwrap().push(duration);
            ready(())
        }
    }

    fn poller() -> (Poller<RecordingSleeper>, RecordingSleeper) {
        let sleeper = RecordingSleeper::default();
        let poller =
            Poller::with_sleeper(PollPolicy::default(), sleeper.clone());
        (poller, sleeper)
    }

    #[tokio::test]
    async fn test_succeeds_after_two_intervals() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::running());
        platform.add_status_reply(preset::running());
        platform.add_status_reply(preset::succeeded(Some("ds-1")));

        let (poller, sleeper) = poller();
        let run = poller.wait_for(&platform, "run-1").await.unwrap();

        assert_eq!(run.default_dataset_id.as_deref(), Some("ds-1"));
        assert_eq!(platform.status_polls(), 3);
        assert_eq!(sleeper.count(), 2);
        assert_eq!(sleeper.total(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_times_out_at_ceiling() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::running());

        let (poller, sleeper) = poller();
        let err = poller.wait_for(&platform, "run-1").await.unwrap_err();

        assert!(matches!(
            err,
            PollError::TimedOut { waited } if waited == Duration::from_secs(60)
        ));
        assert_eq!(platform.status_polls(), 12);
        assert_eq!(sleeper.total(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_failure_stops_immediately() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::failed());
        platform.add_status_reply(preset::succeeded(Some("ds-1")));

        let (poller, sleeper) = poller();
        let err = poller.wait_for(&platform, "run-1").await.unwrap_err();

        assert!(matches!(err, PollError::Failed(_)));
        assert_eq!(platform.status_polls(), 1);
        assert_eq!(sleeper.count(), 0);
    }

    #[tokio::test]
    async fn test_aborted_counts_as_failure() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::running());
        platform.add_status_reply(preset::with_status("ABORTED"));

        let (poller, _) = poller();
        let err = poller.wait_for(&platform, "run-1").await.unwrap_err();
        assert!(matches!(err, PollError::Failed(_)));
        assert_eq!(platform.status_polls(), 2);
    }

    #[tokio::test]
    async fn test_platform_error_is_propagated() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::running());
        platform.add_status_failure(Error::new("reset", ErrorKind::Connection));

        let (poller, _) = poller();
        let err = poller.wait_for(&platform, "run-1").await.unwrap_err();
        let PollError::Platform(err) = err else {
            panic!("expected a platform error");
        };
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(platform.status_polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_waits_on_the_clock() {
        let platform = ScriptedPlatform::default();
        platform.add_status_reply(preset::running());
        platform.add_status_reply(preset::succeeded(None));

        let start = tokio::time::Instant::now();
        let poller = Poller::new(PollPolicy::default());
        poller.wait_for(&platform, "run-1").await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_is_rounded_up() {
        let policy = PollPolicy::new(Duration::ZERO, Duration::from_secs(1));
        assert_eq!(policy.interval(), MIN_INTERVAL);
        assert_eq!(policy.ceiling(), Duration::from_secs(1));
    }
}
