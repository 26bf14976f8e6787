//! Background sweeper
//!
//! A dedicated thread that ticks every `sweep_interval` and removes expired
//! entries. Stopping drops the shutdown sender, which wakes the thread.

use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{bounded, tick, Receiver, Sender};

use super::blob_store::Shared;
use crate::error::Result;

/// Handle to the running sweeper thread
pub(crate) struct Sweeper {
    shutdown_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Start the sweeper for `store`
    pub(crate) fn spawn(store: Weak<Shared>, interval: Duration) -> Result<Self> {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("pastebin-sweeper".to_string())
            .spawn(move || run(store, interval, shutdown_rx))?;

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit
    pub(crate) fn stop(mut self) {
        self.stop_inner();
    }

    fn stop_inner(&mut self) {
        // Disconnecting the channel is the stop signal
        self.shutdown_tx.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Sweeper thread panicked");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop_inner();
    }
}

fn run(store: Weak<Shared>, interval: Duration, shutdown_rx: Receiver<()>) {
    let ticker = tick(interval);

    loop {
        let keep_running = crossbeam::select! {
            recv(shutdown_rx) -> _ => false,
            recv(ticker) -> _ => sweep_once(&store),
        };
        if !keep_running {
            break;
        }
    }

    tracing::trace!("Sweeper exiting");
}

/// One sweep pass; false once the store is gone
fn sweep_once(store: &Weak<Shared>) -> bool {
    let Some(shared) = store.upgrade() else {
        return false;
    };

    let removed = shared.sweep();
    if removed > 0 {
        tracing::debug!(removed, "Swept expired entries");
    }
    true
}
