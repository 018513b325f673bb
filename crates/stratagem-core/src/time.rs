//! Wall-clock budget management.
//!
//! [`Timer`] measures elapsed time and arms a deadline. It runs no background
//! thread: callers must invoke [`Timer::time_check`] at the points where a
//! computation may be abandoned. The search engines do this before every move
//! application (max-n, minimax) or before popping the next leaf to expand
//! (best-first tree search).

use std::time::{Duration, Instant};

use thiserror::Error;

/// Signals that the armed deadline has passed.
///
/// Expiry is an ordinary early-termination condition, not a failure: engines
/// unwind to the top-level call and return the best answer produced by the
/// work completed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline expired")]
pub struct Timeout;

/// Cooperative deadline collaborator shared by all search engines.
///
/// A timer that was never started never expires.
#[derive(Debug, Default, Clone)]
pub struct Timer {
    started_at: Option<Instant>,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the deadline at `now + budget`.
    ///
    /// Required for [`Self::time_check`] to ever report expiry.
    pub fn start(&mut self, budget: Duration) {
        let now = Instant::now();
        self.started_at = Some(now);
        self.deadline = Some(now + budget);
    }

    /// Report [`Timeout`] once the armed deadline has passed.
    pub fn time_check(&self) -> Result<(), Timeout> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Timeout),
            _ => Ok(()),
        }
    }

    /// Time elapsed since the timer was last started, zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|start| start.elapsed()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Thread::sleep granularity is too coarse for millisecond deadlines.
    fn spin(duration: Duration) {
        let start = Instant::now();
        while start.elapsed() < duration {}
    }

    #[test]
    fn non_started_timer_does_not_expire() {
        let timer = Timer::new();
        assert!(timer.time_check().is_ok());
        spin(Duration::from_millis(1));
        assert!(timer.time_check().is_ok());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn does_not_expire_before_deadline() {
        let mut timer = Timer::new();
        timer.start(Duration::from_millis(50));
        spin(Duration::from_millis(1));
        assert!(timer.elapsed() >= Duration::from_millis(1));
        assert!(timer.time_check().is_ok());
    }

    #[test]
    fn expires_after_deadline() {
        let mut timer = Timer::new();
        timer.start(Duration::from_millis(1));
        spin(Duration::from_millis(2));
        assert_eq!(timer.time_check(), Err(Timeout));
    }

    #[test]
    fn restart_rearms_the_deadline() {
        let mut timer = Timer::new();
        timer.start(Duration::from_millis(1));
        spin(Duration::from_millis(2));
        assert!(timer.time_check().is_err());
        timer.start(Duration::from_millis(50));
        assert!(timer.time_check().is_ok());
    }
}
