//! One-shot deferred tasks for idle saves.
//!
//! The store only schedules and cancels; whoever drives the timer reports a
//! due deadline back through `DebouncedImageStore::on_idle_elapsed`. This keeps
//! firing on the same logical context as edits, whether that is a test moving a
//! virtual clock or a tokio task waiting on a deadline.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

/// Handle of a scheduled deadline. Never reused by the timer that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl std::fmt::Display for TimerId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

pub trait IdleTimer {
  /// Arrange for a deadline `delay` from now.
  fn schedule(&mut self, delay: Duration) -> TimerId;

  /// Cancel a deadline. Canceling an unknown or already fired id is a no-op.
  fn cancel(&mut self, id: TimerId);
}

/// Timer on a virtual clock that only moves when `advance` is called.
#[derive(Debug, Default)]
pub struct ManualTimer {
  now: Duration,
  next_id: u64,
  scheduled: BTreeMap<TimerId, Duration>,
}

impl ManualTimer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Time elapsed on the virtual clock.
  pub fn now(&self) -> Duration {
    self.now
  }

  pub fn is_scheduled(&self, id: TimerId) -> bool {
    self.scheduled.contains_key(&id)
  }

  /// Deadline of a scheduled timer, on the virtual clock.
  pub fn deadline(&self, id: TimerId) -> Option<Duration> {
    self.scheduled.get(&id).copied()
  }

  pub fn scheduled_count(&self) -> usize {
    self.scheduled.len()
  }

  /// Move the clock forward and return the timers that came due, earliest
  /// deadline first. Returned timers are no longer scheduled.
  pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
    self.now += by;

    let mut due: Vec<(Duration, TimerId)> = self
      .scheduled
      .iter()
      .filter(|(_, deadline)| **deadline <= self.now)
      .map(|(id, deadline)| (*deadline, *id))
      .collect();
    due.sort();

    for (_, id) in &due {
      self.scheduled.remove(id);
    }

    due.into_iter().map(|(_, id)| id).collect()
  }
}

impl IdleTimer for ManualTimer {
  fn schedule(&mut self, delay: Duration) -> TimerId {
    let id = TimerId(self.next_id);
    self.next_id += 1;
    self.scheduled.insert(id, self.now + delay);
    id
  }

  fn cancel(&mut self, id: TimerId) {
    self.scheduled.remove(&id);
  }
}

/// Single armed deadline on tokio's clock, polled by an event loop.
///
/// Scheduling replaces whatever was armed before.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
  next_id: u64,
  armed: Option<(TimerId, Instant)>,
}

impl DeadlineTimer {
  pub fn new() -> Self {
    Self::default()
  }

  /// When the armed timer is due, if one is armed.
  pub fn next_deadline(&self) -> Option<Instant> {
    self.armed.map(|(_, deadline)| deadline)
  }

  /// Disarm and return the armed timer if its deadline is at or before `now`.
  pub fn take_due(&mut self, now: Instant) -> Option<TimerId> {
    match self.armed {
      Some((id, deadline)) if deadline <= now => {
        self.armed = None;
        Some(id)
      }
      _ => None,
    }
  }
}

impl IdleTimer for DeadlineTimer {
  fn schedule(&mut self, delay: Duration) -> TimerId {
    let id = TimerId(self.next_id);
    self.next_id += 1;
    self.armed = Some((id, Instant::now() + delay));
    id
  }

  fn cancel(&mut self, id: TimerId) {
    if matches!(self.armed, Some((armed, _)) if armed == id) {
      self.armed = None;
    }
  }
}
