use std::time::{Duration, Instant};

/// Fixed-period tick scheduler driven by the main loop.
///
/// The loop asks [`TickTimer::poll`] with the current instant; the timer
/// fires at most once per call. Stopping the timer is the only way to cancel
/// pending ticks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Starts (or restarts) the timer; the first tick is one period away.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a tick is due and schedules the following one.
    ///
    /// Deadlines advance by whole periods from the previous deadline; if the
    /// loop fell more than a period behind, the schedule restarts from `now`
    /// instead of firing a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }

    /// Time left until the next tick, or `None` when stopped.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
