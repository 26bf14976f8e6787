//! # pastebin
//!
//! An ephemeral text-sharing service with:
//! - An in-memory blob store with time-based expiry
//! - Unguessable, URL-safe short ids
//! - Deterministic content negotiation (plain text, HTML, download)
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Service                                 │
//! │          (paste / view / download / delete)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────┐
//!          │            │             │
//!          ▼            ▼             ▼
//!   ┌────────────┐ ┌──────────┐ ┌────────────┐
//!   │ Negotiator │ │ BlobStore│ │  Renderer  │
//!   │  (Accept)  │ │ (RwLock) │ │ (text/html)│
//!   └────────────┘ └────┬─────┘ └────────────┘
//!                       │
//!               ┌───────┴───────┐
//!               ▼               ▼
//!        ┌────────────┐  ┌────────────┐
//!        │ IdGenerator│  │  Sweeper   │
//!        │  (OsRng)   │  │  (thread)  │
//!        └────────────┘  └────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod id;
pub mod store;
pub mod negotiate;
pub mod render;
pub mod service;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PasteError, Result};
pub use config::Config;
pub use negotiate::negotiate;
pub use service::Service;
pub use store::BlobStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pastebin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
