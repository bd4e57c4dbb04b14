//! Debouncing build requests.

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

/// At most one pending build. Requesting a build while one is pending pushes it back.
#[derive(Debug)]
pub(crate) struct Scheduler {
  delay: Duration,
  deadline: Option<Instant>,
}

impl Scheduler {
  pub(crate) fn new(delay: Duration) -> Self {
    Self { delay, deadline: None }
  }

  /// Cancels any pending build and schedules a new one for `delay` after `now`.
  pub(crate) fn request(&mut self, now: Instant) {
    self.deadline = Some(now.checked_add(self.delay).unwrap_or(now));
  }

  /// When the pending build is due, if there is one.
  pub(crate) fn deadline(&self) -> Option<Instant> {
    self.deadline
  }

  /// If the pending build is due at `now`, disarms the timer and returns `true`. The caller must
  /// then run exactly one build.
  pub(crate) fn take_due(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if deadline <= now => {
        self.deadline = None;
        true
      }
      Some(_) | None => false,
    }
  }
}
