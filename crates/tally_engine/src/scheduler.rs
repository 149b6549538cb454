use std::time::{Duration, Instant};

use tally_logging::tally_trace;

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    deadline: Instant,
}

/// Debounce timer holding at most one pending refresh.
///
/// Scheduling replaces whatever was pending, so a burst of edits fires a
/// single refresh once the last one has been quiet for its delay.
#[derive(Debug)]
pub struct RefreshScheduler<C: Clock = SystemClock> {
    clock: C,
    pending: Option<Pending>,
}

impl<C: Clock> RefreshScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            pending: None,
        }
    }

    /// Arms the timer for `generation`. Returns the generation it replaced.
    pub fn schedule(&mut self, generation: u64, delay: Duration) -> Option<u64> {
        let deadline = self.clock.now() + delay;
        let replaced = self.cancel_pending();
        tally_trace!(
            "schedule generation={} delay={:?} replaced={:?}",
            generation,
            delay,
            replaced
        );
        self.pending = Some(Pending {
            generation,
            deadline,
        });
        replaced
    }

    pub fn cancel_pending(&mut self) -> Option<u64> {
        self.pending.take().map(|pending| pending.generation)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.map(|pending| pending.generation)
    }

    /// Time left before the pending refresh is due; zero if overdue.
    pub fn time_until_due(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }

    /// Returns the pending generation once its deadline has passed.
    pub fn poll(&mut self) -> Option<u64> {
        let due = self
            .pending
            .is_some_and(|pending| self.clock.now() >= pending.deadline);
        if due {
            self.fire_now()
        } else {
            None
        }
    }

    /// Fires the pending refresh immediately, regardless of its deadline.
    pub fn fire_now(&mut self) -> Option<u64> {
        let generation = self.cancel_pending()?;
        tally_trace!("fire generation={}", generation);
        Some(generation)
    }
}

impl Default for RefreshScheduler<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}
