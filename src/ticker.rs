use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use tracing::debug;

/// A revocable fixed-delay periodic task.
///
/// The worker thread waits on a channel for up to one interval; a timeout
/// fires the tick, a stop message ends the worker *without* firing the tick
/// that was pending. The interval is measured from the end of one tick to the
/// start of the next wait, so drift equal to the tick's own runtime is
/// expected.
///
/// Revocation is structural: once the handle is revoked (or dropped), no
/// further tick can fire, there is no flag for a late callback to race on.
pub struct Ticker {
    stop_tx: Sender<()>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a worker calling `tick` once per interval until revoked.
    ///
    /// `interval_of` is queried before every wait, so an interval change
    /// takes effect from the next wait onwards.
    pub fn spawn<I, F>(mut interval_of: I, mut tick: F) -> Self
    where
        I: FnMut() -> Duration + Send + 'static,
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let worker = thread::spawn(move || {
            debug!("ticker started");

            loop {
                match stop_rx.recv_timeout(interval_of()) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            debug!("ticker stopped");
        });

        Self {
            stop_tx,
            worker: Some(worker),
        }
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// A tick that is still waiting for its interval never fires.
    pub fn revoke(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        // the channel holds at most the one message the worker consumes
        let _ = self.stop_tx.try_send(());

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::AtomicU64;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::Ticker;

    #[test]
    fn ticks_fire_while_armed() {
        let count = Arc::new(AtomicU64::new(0));

        let ticker = {
            let count = Arc::clone(&count);
            Ticker::spawn(
                || Duration::from_millis(5),
                move || {
                    count.fetch_add(1, Ordering::SeqCst);
                },
            )
        };

        std::thread::sleep(Duration::from_millis(100));
        ticker.revoke();

        assert!(count.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn revoke_cancels_the_pending_tick() {
        let count = Arc::new(AtomicU64::new(0));

        let ticker = {
            let count = Arc::clone(&count);
            Ticker::spawn(
                || Duration::from_secs(3600),
                move || {
                    count.fetch_add(1, Ordering::SeqCst);
                },
            )
        };

        std::thread::sleep(Duration::from_millis(50));
        ticker.revoke();

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_tick_fires_after_revoke_returns() {
        let count = Arc::new(AtomicU64::new(0));

        let ticker = {
            let count = Arc::clone(&count);
            Ticker::spawn(
                || Duration::from_millis(1),
                move || {
                    count.fetch_add(1, Ordering::SeqCst);
                },
            )
        };

        std::thread::sleep(Duration::from_millis(20));
        ticker.revoke();

        let after = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(count.load(Ordering::SeqCst), after);
    }
}
