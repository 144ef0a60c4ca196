//! Tick clocks
//!
//! The engine drives its tick clock through [`TickScheduler`]: a single
//! repeating slot that is either armed with a period or stopped. Starting an
//! armed clock replaces the previous schedule, so there is never more than
//! one pending tick source.

use std::future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A single-slot repeating timer that can be started and stopped
pub trait TickScheduler {
    /// Arm the clock with `period`, replacing any running schedule
    fn start(&mut self, period: Duration);

    /// Disarm the clock; no tick fires until the next `start`
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Tokio-backed clock for the interactive loop
///
/// The first tick fires one full period after `start`, not immediately.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Wait for the next tick. Never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

/// Clock without a timer, for driving the engine by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    period: Option<Duration>,
    /// How many times the clock has been armed
    pub starts: u32,
    /// How many times the clock has been disarmed
    pub stops: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the current schedule, if armed
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_start_stop() {
        let mut clock = ManualScheduler::new();
        assert!(!clock.is_running());

        clock.start(Duration::from_millis(150));
        assert!(clock.is_running());
        assert_eq!(clock.period(), Some(Duration::from_millis(150)));

        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.starts, 1);
        assert_eq!(clock.stops, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_first_tick_after_one_period() {
        let mut clock = IntervalScheduler::new();
        clock.start(Duration::from_millis(150));
        let begin = Instant::now();

        clock.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(150));

        clock.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_interval_never_ticks() {
        let mut clock = IntervalScheduler::new();
        clock.start(Duration::from_millis(150));
        clock.stop();
        assert!(!clock.is_running());

        let fired = tokio::time::timeout(Duration::from_secs(5), clock.tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_schedule() {
        let mut clock = IntervalScheduler::new();
        clock.start(Duration::from_millis(150));
        tokio::time::advance(Duration::from_millis(100)).await;

        // Re-arming resets the phase: next tick is a full period away
        clock.start(Duration::from_millis(150));
        let begin = Instant::now();
        clock.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(150));
    }
}
