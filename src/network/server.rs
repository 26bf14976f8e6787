//! TCP Server
//!
//! Accepts connections and hands each one to its own thread.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::Connection;
use crate::config::Config;
use crate::error::{PasteError, Result};
use crate::protocol::{write_response, Response};
use crate::service::Service;

/// How long the accept loop sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// TCP server for the pastebin service
pub struct Server {
    config: Config,
    service: Service,
    listener: Option<TcpListener>,
    shutdown: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
}

/// Cloneable handle that stops a running server
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

/// Decrements the live connection count when a worker finishes
struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Server {
    /// Create a new server with the given config and service
    pub fn new(config: Config, service: Service) -> Self {
        Self {
            config,
            service,
            listener: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bind the listen address and return the bound address
    ///
    /// Binding `:0` picks a free port; `run` binds on its own if this was
    /// never called.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            PasteError::Network(format!("failed to bind {}: {}", self.config.listen_addr, e))
        })?;
        // Non-blocking so the loop can notice shutdown
        listener.set_nonblocking(true)?;

        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Start the server (blocking until shutdown)
    pub fn run(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self
            .listener
            .take()
            .ok_or_else(|| PasteError::Network("listener not bound".to_string()))?;

        tracing::info!("Listening on {}", listener.local_addr()?);

        while !self.shutdown.load(Ordering::Relaxed) {
            match listener.accept() {
                Ok((stream, addr)) => {
                    if let Err(e) = self.dispatch(stream) {
                        tracing::warn!("Failed to dispatch connection from {}: {}", addr, e);
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Server shutting down");
        Ok(())
    }

    /// Hand an accepted stream to a worker thread, or refuse it when full
    fn dispatch(&self, mut stream: TcpStream) -> Result<()> {
        stream.set_nonblocking(false)?;

        let previous = self.active.fetch_add(1, Ordering::AcqRel);
        let guard = ActiveGuard(Arc::clone(&self.active));

        if previous >= self.config.max_connections {
            tracing::warn!(
                "Connection limit ({}) reached, refusing client",
                self.config.max_connections
            );
            write_response(&mut stream, &Response::error("too many connections"))?;
            return Ok(());
        }

        let mut connection = Connection::new(stream, self.service.clone())?;
        connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)?;

        thread::Builder::new()
            .name("pastebin-conn".to_string())
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = connection.handle() {
                    tracing::debug!("Connection {} ended with error: {}", connection.peer_addr(), e);
                }
            })?;

        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// A handle that can stop the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Number of connections currently being served
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}
