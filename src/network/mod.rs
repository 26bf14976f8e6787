//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking accept loop)
//! - One worker thread per connection, capped by `max_connections`
//! - Commands routed through `Service`

mod client;
mod connection;
mod server;

pub use client::{Client, Download};
pub use connection::Connection;
pub use server::{Server, ShutdownHandle};
