//! Store Module
//!
//! The expiring, in-memory blob store.
//!
//! ## Responsibilities
//! - Map short ids to immutable payloads
//! - Reject inserts that would clobber a live entry (retry with a new id)
//! - Treat expired entries as absent on every access path
//! - Physically remove expired entries from a background sweeper
//!
//! ## Data Structure Choice
//! `HashMap` wrapped in a `parking_lot::RwLock`:
//! - Readers share the lock and never block each other
//! - Insert, delete and each sweep step take the write lock briefly
//! - Payloads are `Bytes`, so a read hands out a reference-counted view
//!   instead of copying the blob
//!
//! A `VecDeque` of `(expires_at, id)` sits under the same lock. With one
//! TTL for every entry it stays sorted by expiry, so sweeping pops from the
//! front and never scans live entries.

mod blob_store;
mod clock;
mod sweeper;

pub use blob_store::BlobStore;
pub use clock::{Clock, ManualClock, SystemClock};

use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::error::{PasteError, Result};

/// A stored blob and its lifetime
#[derive(Debug, Clone)]
pub struct Entry {
    payload: Bytes,
    created_at: Instant,
    expires_at: Instant,
}

impl Entry {
    /// Create an entry that expires `ttl` after `created_at`
    ///
    /// Fails when the expiry instant is not representable.
    pub fn new(payload: Bytes, created_at: Instant, ttl: Duration) -> Result<Self> {
        let expires_at = created_at.checked_add(ttl).ok_or_else(|| {
            PasteError::Config(format!("ttl of {:?} overflows the clock", ttl))
        })?;

        Ok(Self {
            payload,
            created_at,
            expires_at,
        })
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// An entry is dead from `expires_at` onwards
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
