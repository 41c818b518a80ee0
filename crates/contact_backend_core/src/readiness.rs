use std::time::Duration;

use crate::config::ReadinessPolicy;
use crate::error::ReadinessError;

/// Outcome of one readiness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Ready(T),
    Pending,
}

/// Polls `probe` until it reports ready, pausing `policy.effective_interval()`
/// between attempts and giving up after `policy.max_attempts()`.
///
/// Errors from the probe end the wait immediately.
pub fn poll_until_ready<T, E>(
    resource: &str,
    policy: &ReadinessPolicy,
    pause: &mut dyn FnMut(Duration),
    mut probe: impl FnMut(u32) -> Result<Probe<T>, E>,
) -> Result<T, ReadinessError<E>> {
    let max_attempts = policy.max_attempts();
    let interval = policy.effective_interval();

    for attempt in 1..=max_attempts {
        match probe(attempt).map_err(ReadinessError::Check)? {
            Probe::Ready(value) => return Ok(value),
            Probe::Pending if attempt < max_attempts => pause(interval),
            Probe::Pending => {}
        }
    }

    Err(ReadinessError::TimedOut {
        resource: resource.to_string(),
        attempts: max_attempts,
    })
}

/// Sleeps the calling thread; the pause used outside of tests.
pub fn thread_pause(duration: Duration) {
    std::thread::sleep(duration);
}

#[cfg(test)]
mod tests {
    use crate::config::MIN_POLL_INTERVAL;

    use super::*;

    fn policy(attempts: u64) -> ReadinessPolicy {
        ReadinessPolicy::new(Duration::from_secs(1), Duration::from_secs(attempts))
    }

    #[test]
    fn returns_as_soon_as_probe_is_ready() {
        let mut pauses = Vec::new();
        let mut pause = |duration: Duration| pauses.push(duration);

        let value = poll_until_ready::<_, String>("role", &policy(10), &mut pause, |attempt| {
            Ok(if attempt == 3 {
                Probe::Ready(attempt)
            } else {
                Probe::Pending
            })
        })
        .expect("probe should become ready");

        assert_eq!(value, 3);
        assert_eq!(pauses, vec![Duration::from_secs(1); 2]);
    }

    #[test]
    fn times_out_after_max_attempts_without_trailing_pause() {
        let mut pause_count = 0;
        let mut pause = |_: Duration| pause_count += 1;
        let mut probes = 0;

        let error = poll_until_ready::<(), String>("role", &policy(4), &mut pause, |_| {
            probes += 1;
            Ok(Probe::Pending)
        })
        .expect_err("probe never becomes ready");

        assert_eq!(probes, 4);
        assert_eq!(pause_count, 3);
        assert!(matches!(
            error,
            ReadinessError::TimedOut { ref resource, attempts: 4 } if resource == "role"
        ));
    }

    #[test]
    fn zero_interval_keeps_polling_until_ready() {
        let policy = ReadinessPolicy::new(Duration::ZERO, Duration::from_secs(60));
        let mut pauses = Vec::new();
        let mut pause = |duration: Duration| pauses.push(duration);
        let mut probes = 0;

        let value = poll_until_ready::<_, String>("role", &policy, &mut pause, |attempt| {
            probes += 1;
            Ok(if attempt == 3 {
                Probe::Ready(attempt)
            } else {
                Probe::Pending
            })
        })
        .expect("zero interval should not collapse the wait to one check");

        assert_eq!(value, 3);
        assert_eq!(probes, 3);
        assert_eq!(pauses, vec![MIN_POLL_INTERVAL; 2]);
    }

    #[test]
    fn probe_errors_stop_the_wait() {
        let mut pause = |_: Duration| panic!("should not pause after an error");
        let mut probes = 0;

        let error = poll_until_ready::<(), _>("role", &policy(10), &mut pause, |_| {
            probes += 1;
            Err("access denied".to_string())
        })
        .expect_err("probe error should propagate");

        assert_eq!(probes, 1);
        assert!(matches!(error, ReadinessError::Check(ref message) if message == "access denied"));
    }
}
