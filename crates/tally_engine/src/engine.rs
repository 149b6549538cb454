use std::future;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tally_logging::{tally_debug, tally_error};
use tokio::sync::mpsc as async_mpsc;
use tokio_util::sync::CancellationToken;

use crate::clock::SystemClock;
use crate::scheduler::RefreshScheduler;
use crate::RefreshEvent;

enum RefreshCommand {
    Schedule { generation: u64, delay: Duration },
    Cancel,
}

/// Real-time driver for [`RefreshScheduler`].
///
/// A background thread waits on the scheduler deadline and reports due
/// refreshes through [`RefreshHandle::try_recv`]. Dropping the handle stops
/// the thread.
pub struct RefreshHandle {
    cmd_tx: async_mpsc::UnboundedSender<RefreshCommand>,
    event_rx: mpsc::Receiver<RefreshEvent>,
    shutdown: CancellationToken,
}

impl RefreshHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tally_error!("failed to start refresh timer runtime: {}", err);
                    return;
                }
            };
            let scheduler = RefreshScheduler::new(SystemClock);
            runtime.block_on(run_timer(scheduler, cmd_rx, event_tx, token));
        });

        Self {
            cmd_tx,
            event_rx,
            shutdown,
        }
    }

    /// Schedules a refresh, replacing any that has not fired yet.
    pub fn schedule(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(RefreshCommand::Schedule { generation, delay });
    }

    pub fn cancel(&self) {
        let _ = self.cmd_tx.send(RefreshCommand::Cancel);
    }

    pub fn try_recv(&self) -> Option<RefreshEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<RefreshEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Default for RefreshHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_timer(
    mut scheduler: RefreshScheduler<SystemClock>,
    mut cmd_rx: async_mpsc::UnboundedReceiver<RefreshCommand>,
    event_tx: mpsc::Sender<RefreshEvent>,
    shutdown: CancellationToken,
) {
    loop {
        let wait = scheduler.time_until_due();
        tokio::select! {
            _ = shutdown.cancelled() => break,
            command = cmd_rx.recv() => match command {
                Some(RefreshCommand::Schedule { generation, delay }) => {
                    scheduler.schedule(generation, delay);
                }
                Some(RefreshCommand::Cancel) => {
                    scheduler.cancel_pending();
                }
                None => break,
            },
            _ = sleep_until_due(wait) => {
                if let Some(generation) = scheduler.poll() {
                    if event_tx.send(RefreshEvent::Due { generation }).is_err() {
                        break;
                    }
                }
            }
        }
    }
    tally_debug!("refresh timer stopped");
}

async fn sleep_until_due(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => future::pending().await,
    }
}
