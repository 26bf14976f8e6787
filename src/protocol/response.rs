//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

use crate::render::Rendered;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    Error = 0x02,
    NotAcceptable = 0x03,
    BadRequest = 0x04,
}

impl Status {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::NotFound),
            0x02 => Some(Status::Error),
            0x03 => Some(Status::NotAcceptable),
            0x04 => Some(Status::BadRequest),
            _ => None,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Media type of the body, set for VIEW and DOWNLOAD
    pub content_type: Option<String>,

    /// `Content-Disposition` value, set for DOWNLOAD
    pub disposition: Option<String>,

    /// Optional payload (id for PASTE, body for VIEW/DOWNLOAD, message otherwise)
    pub payload: Option<Bytes>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Bytes>) -> Self {
        Self {
            status: Status::Ok,
            content_type: None,
            disposition: None,
            payload,
        }
    }

    /// Create an OK response carrying a rendered body and its headers
    pub fn rendered(rendered: Rendered) -> Self {
        Self {
            status: Status::Ok,
            content_type: Some(rendered.content_type.to_string()),
            disposition: rendered.disposition,
            payload: Some(rendered.body),
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            content_type: None,
            disposition: None,
            payload: None,
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self::with_message(Status::Error, message)
    }

    /// Create a NOT_ACCEPTABLE response
    pub fn not_acceptable(message: &str) -> Self {
        Self::with_message(Status::NotAcceptable, message)
    }

    /// Create a BAD_REQUEST response
    pub fn bad_request(message: &str) -> Self {
        Self::with_message(Status::BadRequest, message)
    }

    fn with_message(status: Status, message: &str) -> Self {
        Self {
            status,
            content_type: None,
            disposition: None,
            payload: Some(Bytes::copy_from_slice(message.as_bytes())),
        }
    }

    /// Payload as lossy UTF-8 (empty when absent)
    pub fn text(&self) -> String {
        self.payload
            .as_ref()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .unwrap_or_default()
    }
}
