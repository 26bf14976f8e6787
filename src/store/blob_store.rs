//! BlobStore implementation
//!
//! HashMap-based store with RwLock for concurrency and lazy expiry.
//!
//! Alongside the map sits an expiry queue of `(expires_at, id)` pairs in
//! insertion order. Every entry gets the same TTL and is stamped under the
//! write lock, so insertion order is also expiry order and a sweep only
//! has to look at the front of the queue.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};

use super::clock::{Clock, SystemClock};
use super::sweeper::Sweeper;
use super::Entry;
use crate::config::Config;
use crate::error::{PasteError, Result};
use crate::id::{IdGenerator, RandomIdGenerator};

/// Concurrent-safe expiring key/value store
///
/// ## Concurrency Model
///
/// - **Reads** (get): shared `RwLock` read guard, never block each other
/// - **Writes** (insert/delete): exclusive guard held for a single map
///   mutation
/// - **Sweep**: pops expired ids off the front of the expiry queue, one per
///   short write guard, so the work is proportional to what expired
///
/// The sweeper thread only holds a `Weak` reference to the shared state, so
/// dropping the store stops it.
pub struct BlobStore {
    /// State shared with the sweeper thread
    shared: Arc<Shared>,

    /// Background sweeper handle (taken on shutdown)
    sweeper: Mutex<Option<Sweeper>>,
}

/// State reachable from both the store handle and the sweeper
pub(crate) struct Shared {
    config: Config,
    table: RwLock<Table>,
    ids: Box<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

/// Entries plus their expiry queue, guarded together
#[derive(Default)]
struct Table {
    entries: HashMap<String, Entry>,

    /// Oldest first. Items for deleted or reclaimed ids stay queued and are
    /// skipped when popped.
    expiry: VecDeque<(Instant, String)>,
}

impl BlobStore {
    /// Open a store with OS-random ids and the system clock
    ///
    /// The config is validated before anything starts.
    pub fn open(config: Config) -> Result<Self> {
        Self::with_parts(config, RandomIdGenerator, Arc::new(SystemClock))
    }

    /// Open a store with a custom id source and clock
    pub fn with_parts(
        config: Config,
        ids: impl IdGenerator + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let sweep_interval = config.sweep_interval;
        let shared = Arc::new(Shared {
            config,
            table: RwLock::new(Table::default()),
            ids: Box::new(ids),
            clock,
        });

        let sweeper = Sweeper::spawn(Arc::downgrade(&shared), sweep_interval)?;

        tracing::info!(
            ttl_secs = shared.config.ttl.as_secs_f64(),
            sweep_secs = sweep_interval.as_secs_f64(),
            id_length = shared.config.id_length,
            "Blob store opened"
        );

        Ok(Self {
            shared,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Store a payload under a fresh id and return the id
    ///
    /// Fails with `InvalidInput` for empty or oversized payloads and with
    /// `ExhaustedIdSpace` if every attempt collided with a live entry.
    pub fn insert(&self, payload: impl Into<Bytes>) -> Result<String> {
        self.shared.insert(payload.into())
    }

    /// Fetch a live payload
    pub fn get(&self, id: &str) -> Option<Bytes> {
        self.shared.get(id)
    }

    /// Remove an entry, returning whether a live one existed
    pub fn delete(&self, id: &str) -> bool {
        self.shared.delete(id)
    }

    /// Remove every expired entry now, returning how many were dropped
    pub fn sweep(&self) -> usize {
        self.shared.sweep()
    }

    /// Stop the background sweeper
    ///
    /// The store stays usable; expired entries are still hidden by the lazy
    /// check and can be removed with [`BlobStore::sweep`].
    pub fn shutdown(&self) {
        if let Some(sweeper) = self.sweeper.lock().take() {
            sweeper.stop();
            tracing::info!("Blob store sweeper stopped");
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of physically stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.shared.table.read().entries.len()
    }

    /// Number of queued expiry records, stale ones included
    pub fn queued_expiries(&self) -> usize {
        self.shared.table.read().expiry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the background sweeper is still running
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.lock().is_some()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

impl Shared {
    fn check_payload(&self, payload: &Bytes) -> Result<()> {
        if payload.is_empty() {
            return Err(PasteError::InvalidInput("payload is empty".to_string()));
        }
        if payload.len() > self.config.max_payload_size {
            return Err(PasteError::InvalidInput(format!(
                "payload too large: {} bytes (max {})",
                payload.len(),
                self.config.max_payload_size
            )));
        }
        Ok(())
    }

    fn insert(&self, payload: Bytes) -> Result<String> {
        self.check_payload(&payload)?;

        let attempts = self.config.max_id_attempts;
        for attempt in 1..=attempts {
            // Generate outside the lock; only the claim is serialized
            let id = self.ids.generate(self.config.id_length);

            let mut table = self.table.write();
            let now = self.clock.now();
            if table.entries.get(&id).is_some_and(|e| !e.is_expired(now)) {
                tracing::debug!(attempt, "Id collision with a live entry, retrying");
                continue;
            }

            let size = payload.len();
            let entry = Entry::new(payload, now, self.config.ttl)?;
            table.expiry.push_back((entry.expires_at(), id.clone()));
            table.entries.insert(id.clone(), entry);
            drop(table);

            tracing::debug!(id = %id, size, "Stored blob");
            return Ok(id);
        }

        tracing::warn!(attempts, "Id space exhausted");
        Err(PasteError::ExhaustedIdSpace { attempts })
    }

    fn get(&self, id: &str) -> Option<Bytes> {
        let table = self.table.read();
        let entry = table.entries.get(id)?;
        if entry.is_expired(self.clock.now()) {
            return None;
        }
        Some(entry.payload().clone())
    }

    fn delete(&self, id: &str) -> bool {
        let removed = self.table.write().entries.remove(id);
        match removed {
            Some(entry) => !entry.is_expired(self.clock.now()),
            None => false,
        }
    }

    pub(crate) fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;

        loop {
            let mut table = self.table.write();
            let expires_at = match table.expiry.front() {
                Some((expires_at, _)) if *expires_at <= now => *expires_at,
                _ => break,
            };
            let Some((_, id)) = table.expiry.pop_front() else {
                break;
            };

            // Only the entry this record was queued for; a reclaimed id has
            // a later expiry
            if table
                .entries
                .get(&id)
                .is_some_and(|e| e.expires_at() == expires_at)
            {
                table.entries.remove(&id);
                removed += 1;
            }
        }

        tracing::trace!(removed, "Sweep finished");
        removed
    }
}
