//! Service Module
//!
//! Request handlers that sit between the transport and the store.
//!
//! ## Responsibilities
//! - Validate requests before they reach the store
//! - Negotiate the representation for text endpoints
//! - Render payloads without copying the stored buffer where possible
//! - Map outcomes onto wire statuses

use std::sync::Arc;

use bytes::Bytes;

use crate::error::{PasteError, Result};
use crate::negotiate::negotiate;
use crate::protocol::{Command, Response};
use crate::render::{self, Rendered, ACCEPTED_TYPES};
use crate::store::BlobStore;

/// Paste, view, download and delete handlers over a shared store
///
/// Cloning is cheap; every clone talks to the same store.
#[derive(Clone)]
pub struct Service {
    store: Arc<BlobStore>,
}

impl Service {
    pub fn new(store: Arc<BlobStore>) -> Self {
        Self { store }
    }

    /// Execute a command
    ///
    /// Routes commands to the handlers and folds every outcome, errors
    /// included, into a response.
    pub fn execute(&self, command: Command) -> Response {
        let result = match command {
            Command::Paste { accept, blob } => self
                .paste(blob, &accept)
                .map(|id| Response::ok(Some(Bytes::from(id)))),
            Command::View { accept, id } => self.view(&id, &accept).map(rendered_or_not_found),
            Command::Download { id } => self.download(&id).map(rendered_or_not_found),
            Command::Delete { id } => self.delete(&id).map(|existed| {
                if existed {
                    Response::ok(Some(Bytes::from_static(b"Deleted")))
                } else {
                    Response::not_found()
                }
            }),
            Command::Ping => Ok(Response::ok(Some(Bytes::from_static(b"PONG")))),
        };

        result.unwrap_or_else(|e| error_response(&e))
    }

    /// Store a new blob and return its id
    ///
    /// The Accept header is checked first so an unsatisfiable request never
    /// touches the store.
    pub fn paste(&self, blob: impl Into<Bytes>, accept: &str) -> Result<String> {
        negotiate(accept, &ACCEPTED_TYPES)?;
        self.store.insert(blob)
    }

    /// Render a blob as HTML or plain text
    pub fn view(&self, id: &str, accept: &str) -> Result<Option<Rendered>> {
        let media_type = negotiate(accept, &ACCEPTED_TYPES)?;
        check_id(id)?;

        let rendered = self
            .store
            .get(id)
            .map(|payload| render::for_media_type(media_type, id, &payload));

        if rendered.is_none() {
            tracing::debug!(id, "View of unknown or expired id");
        }
        Ok(rendered)
    }

    /// Raw bytes as an attachment named after the id
    pub fn download(&self, id: &str) -> Result<Option<Rendered>> {
        check_id(id)?;
        Ok(self
            .store
            .get(id)
            .map(|payload| render::attachment(id, &payload)))
    }

    /// Delete a blob, reporting whether a live one existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        check_id(id)?;
        let existed = self.store.delete(id);
        tracing::debug!(id, existed, "Delete");
        Ok(existed)
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<BlobStore> {
        &self.store
    }
}

fn check_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(PasteError::InvalidInput("id is empty".to_string()));
    }
    Ok(())
}

fn rendered_or_not_found(rendered: Option<Rendered>) -> Response {
    match rendered {
        Some(r) => Response::rendered(r),
        None => Response::not_found(),
    }
}

fn error_response(error: &PasteError) -> Response {
    match error {
        PasteError::NotAcceptable => Response::not_acceptable(&error.to_string()),
        PasteError::InvalidInput(_) => Response::bad_request(&error.to_string()),
        _ => {
            tracing::error!("Request failed: {}", error);
            Response::error(&error.to_string())
        }
    }
}
