//! Position poller — waits for both covers to reach their closed thresholds.

use std::time::Duration;

use shuttersync_domain::cover::ClosureThresholds;
use shuttersync_domain::error::ControlError;

use crate::ports::DeviceClient;

/// Cap on the linear backoff applied after consecutive read failures.
const MAX_BACKOFF_FACTOR: u32 = 5;

/// Repeatedly queries the cover positions until every cover sits at or
/// below its closed threshold.
pub struct PositionPoller<C> {
    client: C,
    interval: Duration,
    max_attempts: u32,
}

impl<C: DeviceClient> PositionPoller<C> {
    /// Create a poller reading through `client` every `interval`, giving up
    /// after `max_attempts` reads.
    pub fn new(client: C, interval: Duration, max_attempts: u32) -> Self {
        Self {
            client,
            interval,
            max_attempts,
        }
    }

    /// Poll until every cover is at or below its threshold.
    ///
    /// Completion is signalled on the first read where all covers are
    /// closed; the poller never completes while any last-read position is
    /// above its threshold. Transient read failures consume an attempt and
    /// back off linearly (interval × consecutive failures, capped);
    /// non-retryable failures propagate immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Timeout`] when the attempt budget is
    /// exhausted, or the underlying read error when it is not retryable.
    pub async fn wait_until_closed(
        &self,
        thresholds: &ClosureThresholds,
    ) -> Result<(), ControlError> {
        let started = tokio::time::Instant::now();
        let mut consecutive_failures: u32 = 0;

        for attempt in 1..=self.max_attempts {
            match self.client.cover_positions().await {
                Ok(snapshot) => {
                    if thresholds.all_closed(&snapshot) {
                        tracing::debug!(attempt, "all covers closed");
                        return Ok(());
                    }
                    consecutive_failures = 0;
                    // No point sleeping once the budget is spent.
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.interval).await;
                    }
                }
                Err(err) if err.is_retryable() => {
                    consecutive_failures += 1;
                    tracing::warn!(
                        error = %err,
                        attempt,
                        consecutive_failures,
                        "position read failed, backing off"
                    );
                    if attempt < self.max_attempts {
                        let factor = consecutive_failures.min(MAX_BACKOFF_FACTOR);
                        tokio::time::sleep(self.interval * factor).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(ControlError::Timeout {
            waited_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttersync_domain::cover::CoverSnapshot;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use shuttersync_domain::actuator::ActuatorStatus;
    use shuttersync_domain::channel::{ChannelId, CoverId};

    /// Fake client replaying a scripted sequence of position reads.
    /// The last entry repeats once the script is exhausted.
    struct ScriptedClient {
        reads: Mutex<VecDeque<Result<CoverSnapshot, ControlError>>>,
        read_count: AtomicU32,
    }

    impl ScriptedClient {
        fn with(reads: Vec<Result<CoverSnapshot, ControlError>>) -> Self {
            Self {
                reads: Mutex::new(reads.into()),
                read_count: AtomicU32::new(0),
            }
        }

        fn read_count(&self) -> u32 {
            self.read_count.load(Ordering::SeqCst)
        }
    }

    fn transport_error() -> ControlError {
        ControlError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "request timed out",
        )))
    }

    impl DeviceClient for ScriptedClient {
        fn cover_positions(
            &self,
        ) -> impl Future<Output = Result<CoverSnapshot, ControlError>> + Send {
            self.read_count.fetch_add(1, Ordering::SeqCst);
            let mut reads = self.reads.lock().unwrap();
            let next = if reads.len() > 1 {
                reads.pop_front()
            } else {
                reads.front().map(|r| match r {
                    Ok(snapshot) => Ok(*snapshot),
                    Err(_) => Err(transport_error()),
                })
            };
            async move { next.unwrap_or_else(|| Err(transport_error())) }
        }

        async fn actuator_status(
            &self,
            channel: ChannelId,
        ) -> Result<ActuatorStatus, ControlError> {
            Ok(ActuatorStatus {
                channel,
                is_on: false,
            })
        }

        async fn set_actuator(&self, _channel: ChannelId, _on: bool) -> Result<(), ControlError> {
            Ok(())
        }

        async fn command_cover(&self, _cover: CoverId, _target_pos: u8) -> Result<(), ControlError> {
            Ok(())
        }
    }

    fn poller(
        client: &std::sync::Arc<ScriptedClient>,
        max_attempts: u32,
    ) -> PositionPoller<std::sync::Arc<ScriptedClient>> {
        PositionPoller::new(
            std::sync::Arc::clone(client),
            Duration::from_millis(2),
            max_attempts,
        )
    }

    #[tokio::test]
    async fn should_complete_on_first_read_when_already_closed() {
        let client = std::sync::Arc::new(ScriptedClient::with(vec![Ok(CoverSnapshot::new(5, 10))]));
        let thresholds = ClosureThresholds::new([15, 20]);

        poller(&client, 10)
            .wait_until_closed(&thresholds)
            .await
            .unwrap();

        assert_eq!(client.read_count(), 1);
    }

    #[tokio::test]
    async fn should_keep_polling_until_both_covers_close() {
        // [30,30] is not closed, [10,15] is (10≤15, 15≤20).
        let client = std::sync::Arc::new(ScriptedClient::with(vec![
            Ok(CoverSnapshot::new(30, 30)),
            Ok(CoverSnapshot::new(10, 15)),
        ]));
        let thresholds = ClosureThresholds::new([15, 20]);

        poller(&client, 10)
            .wait_until_closed(&thresholds)
            .await
            .unwrap();

        assert_eq!(client.read_count(), 2);
    }

    #[tokio::test]
    async fn should_not_complete_while_one_cover_is_above_threshold() {
        // [5,40] closes under [40,40] only on the second read.
        let client = std::sync::Arc::new(ScriptedClient::with(vec![
            Ok(CoverSnapshot::new(5, 50)),
            Ok(CoverSnapshot::new(5, 40)),
        ]));
        let thresholds = ClosureThresholds::new([40, 40]);

        poller(&client, 10)
            .wait_until_closed(&thresholds)
            .await
            .unwrap();

        assert_eq!(client.read_count(), 2);
    }

    #[tokio::test]
    async fn should_time_out_when_covers_never_close() {
        let client = std::sync::Arc::new(ScriptedClient::with(vec![Ok(CoverSnapshot::new(50, 50))]));
        let thresholds = ClosureThresholds::new([15, 20]);

        let err = poller(&client, 3)
            .wait_until_closed(&thresholds)
            .await
            .unwrap_err();

        assert!(matches!(err, ControlError::Timeout { .. }));
        assert_eq!(client.read_count(), 3);
    }

    #[tokio::test]
    async fn should_give_up_without_sleeping_after_the_final_attempt() {
        let client = std::sync::Arc::new(ScriptedClient::with(vec![Ok(CoverSnapshot::new(50, 50))]));
        let thresholds = ClosureThresholds::new([15, 20]);
        let started = tokio::time::Instant::now();

        let err = PositionPoller::new(std::sync::Arc::clone(&client), Duration::from_millis(500), 1)
            .wait_until_closed(&thresholds)
            .await
            .unwrap_err();

        assert!(matches!(err, ControlError::Timeout { .. }));
        // A single-attempt budget never waits out the interval.
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn should_retry_transient_read_failures() {
        let client = std::sync::Arc::new(ScriptedClient::with(vec![
            Err(transport_error()),
            Err(transport_error()),
            Ok(CoverSnapshot::new(5, 5)),
        ]));
        let thresholds = ClosureThresholds::new([15, 20]);

        poller(&client, 10)
            .wait_until_closed(&thresholds)
            .await
            .unwrap();

        assert_eq!(client.read_count(), 3);
    }

    #[tokio::test]
    async fn should_propagate_parse_failures_immediately() {
        let parse_err =
            ControlError::Parse(serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err());
        let client = std::sync::Arc::new(ScriptedClient::with(vec![Err(parse_err), Ok(CoverSnapshot::new(5, 5))]));
        let thresholds = ClosureThresholds::new([15, 20]);

        let err = poller(&client, 10)
            .wait_until_closed(&thresholds)
            .await
            .unwrap_err();

        assert!(matches!(err, ControlError::Parse(_)));
        assert_eq!(client.read_count(), 1);
    }

    #[tokio::test]
    async fn should_time_out_when_reads_keep_failing() {
        let client = std::sync::Arc::new(ScriptedClient::with(vec![Err(transport_error())]));
        let thresholds = ClosureThresholds::new([15, 20]);

        let err = poller(&client, 3)
            .wait_until_closed(&thresholds)
            .await
            .unwrap_err();

        assert!(matches!(err, ControlError::Timeout { .. }));
    }
}
