use std::io::Write;
use std::time::Duration;

use tally_core::Effect;
use tally_engine::{Clock, RefreshEvent, RefreshHandle, RefreshScheduler};
use tally_logging::tally_trace;

/// Where debounced refreshes are armed and later collected.
pub trait RefreshTimer {
    fn arm(&mut self, generation: u64, delay: Duration);
    /// Generations whose refresh is due now.
    fn due(&mut self) -> Vec<u64>;
}

/// Real-time timer used by `watch`.
impl RefreshTimer for RefreshHandle {
    fn arm(&mut self, generation: u64, delay: Duration) {
        self.schedule(generation, delay);
    }

    fn due(&mut self) -> Vec<u64> {
        std::iter::from_fn(|| self.try_recv())
            .map(|RefreshEvent::Due { generation }| generation)
            .collect()
    }
}

/// One-shot commands do not wait out the debounce; they fire at once.
pub struct FireImmediately<C: Clock>(pub RefreshScheduler<C>);

impl<C: Clock> RefreshTimer for FireImmediately<C> {
    fn arm(&mut self, generation: u64, delay: Duration) {
        self.0.schedule(generation, delay);
    }

    fn due(&mut self) -> Vec<u64> {
        self.0.fire_now().into_iter().collect()
    }
}

pub struct EffectRunner<T, W> {
    timer: T,
    out: W,
}

impl<T: RefreshTimer, W: Write> EffectRunner<T, W> {
    pub fn new(timer: T, out: W) -> Self {
        Self { timer, out }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> std::io::Result<()> {
        for effect in effects {
            match effect {
                Effect::ScheduleRefresh { generation, delay } => {
                    tally_trace!("ScheduleRefresh generation={} delay={:?}", generation, delay);
                    self.timer.arm(generation, delay);
                }
                Effect::ShowSummary { table } => {
                    self.out.write_all(table.as_bytes())?;
                    self.out.flush()?;
                }
            }
        }
        Ok(())
    }

    pub fn due(&mut self) -> Vec<u64> {
        self.timer.due()
    }
}
