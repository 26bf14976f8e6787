//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Command Type
//! - PASTE:    accept_len (2 bytes) + accept + blob
//! - VIEW:     accept_len (2 bytes) + accept + id
//! - DOWNLOAD: id
//! - DELETE:   id
//! - PING:     empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Response Payload
//! content_type_len (1) + content_type + disposition_len (2) + disposition
//! + body. Empty strings mean the header is absent.

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Command, CommandType, Response, Status};
use crate::error::{PasteError, Result};

/// Header size: 1 byte command/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: cmd_type (1) + payload_len (4) + payload
pub fn encode_command(command: &Command) -> Bytes {
    let mut payload = BytesMut::new();

    match command {
        Command::Paste { accept, blob } => {
            put_accept(&mut payload, accept);
            payload.put_slice(blob);
        }
        Command::View { accept, id } => {
            put_accept(&mut payload, accept);
            payload.put_slice(id.as_bytes());
        }
        Command::Download { id } | Command::Delete { id } => {
            payload.put_slice(id.as_bytes());
        }
        Command::Ping => {}
    }

    frame(command.command_type() as u8, &payload)
}

/// Accept headers longer than a u16 are cut; nothing legitimate comes close
fn put_accept(buf: &mut BytesMut, accept: &str) {
    let accept = clip(accept, u16::MAX as usize);
    buf.put_u16(accept.len() as u16);
    buf.put_slice(accept.as_bytes());
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Decode a command from bytes
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let (cmd_type, payload) = split_frame(bytes, "command")?;

    let cmd_type = CommandType::from_byte(cmd_type).ok_or_else(|| {
        PasteError::Protocol(format!("Unknown command type: 0x{:02x}", cmd_type))
    })?;

    match cmd_type {
        CommandType::Paste => {
            let (accept, blob) = split_accept(payload, "PASTE")?;
            Ok(Command::Paste {
                accept,
                blob: blob.to_vec(),
            })
        }
        CommandType::View => {
            let (accept, id) = split_accept(payload, "VIEW")?;
            Ok(Command::View {
                accept,
                id: decode_id(id, "VIEW")?,
            })
        }
        CommandType::Download => Ok(Command::Download {
            id: decode_id(payload, "DOWNLOAD")?,
        }),
        CommandType::Delete => Ok(Command::Delete {
            id: decode_id(payload, "DELETE")?,
        }),
        CommandType::Ping => {
            if !payload.is_empty() {
                return Err(PasteError::Protocol(format!(
                    "PING command: unexpected payload of {} bytes",
                    payload.len()
                )));
            }
            Ok(Command::Ping)
        }
    }
}

/// Split `accept_len (2) + accept + rest`
fn split_accept<'a>(payload: &'a [u8], name: &str) -> Result<(String, &'a [u8])> {
    if payload.len() < 2 {
        return Err(PasteError::Protocol(format!(
            "{} command: missing accept length",
            name
        )));
    }

    let accept_len = u16::from_be_bytes([payload[0], payload[1]]) as usize;
    if payload.len() < 2 + accept_len {
        return Err(PasteError::Protocol(format!(
            "{} command: incomplete accept (expected {}, got {})",
            name,
            accept_len,
            payload.len() - 2
        )));
    }

    let accept = std::str::from_utf8(&payload[2..2 + accept_len])
        .map_err(|_| PasteError::Protocol(format!("{} command: accept is not UTF-8", name)))?;

    Ok((accept.to_string(), &payload[2 + accept_len..]))
}

fn decode_id(bytes: &[u8], name: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| PasteError::Protocol(format!("{} command: id is not UTF-8", name)))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_response(response: &Response) -> Bytes {
    let body = response.payload.as_deref().unwrap_or(&[]);
    let content_type = clip(response.content_type.as_deref().unwrap_or(""), u8::MAX as usize);
    let disposition = clip(response.disposition.as_deref().unwrap_or(""), u16::MAX as usize);

    let mut payload = BytesMut::with_capacity(3 + content_type.len() + disposition.len() + body.len());
    payload.put_u8(content_type.len() as u8);
    payload.put_slice(content_type.as_bytes());
    payload.put_u16(disposition.len() as u16);
    payload.put_slice(disposition.as_bytes());
    payload.put_slice(body);

    frame(response.status as u8, &payload)
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (status_byte, payload) = split_frame(bytes, "response")?;

    let status = Status::from_byte(status_byte).ok_or_else(|| {
        PasteError::Protocol(format!("Unknown response status: 0x{:02x}", status_byte))
    })?;

    let (content_type, rest) = split_header(payload, 1)?;
    let (disposition, body) = split_header(rest, 2)?;

    let payload = if body.is_empty() {
        None
    } else {
        Some(Bytes::copy_from_slice(body))
    };

    Ok(Response {
        status,
        content_type,
        disposition,
        payload,
    })
}

/// Split a length-prefixed header value off the front of a response payload
fn split_header(bytes: &[u8], prefix: usize) -> Result<(Option<String>, &[u8])> {
    if bytes.len() < prefix {
        return Err(PasteError::Protocol(
            "Response payload: missing header length".to_string(),
        ));
    }

    let len = bytes[..prefix]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    let rest = &bytes[prefix..];
    if rest.len() < len {
        return Err(PasteError::Protocol(format!(
            "Response payload: incomplete header (expected {}, got {})",
            len,
            rest.len()
        )));
    }

    let value = std::str::from_utf8(&rest[..len])
        .map_err(|_| PasteError::Protocol("Response payload: header is not UTF-8".to_string()))?;
    let value = (!value.is_empty()).then(|| value.to_string());

    Ok((value, &rest[len..]))
}

// =============================================================================
// Framing
// =============================================================================

fn frame(kind: u8, payload: &[u8]) -> Bytes {
    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    message.put_u8(kind);
    message.put_u32(payload.len() as u32);
    message.put_slice(payload);
    message.freeze()
}

fn payload_len(header: &[u8], what: &str) -> Result<usize> {
    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if len > MAX_PAYLOAD_SIZE {
        return Err(PasteError::Protocol(format!(
            "{} payload too large: {} bytes (max {})",
            what, len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(len as usize)
}

/// Split a complete frame into its kind byte and payload
fn split_frame<'a>(bytes: &'a [u8], what: &str) -> Result<(u8, &'a [u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(PasteError::Protocol(format!(
            "Incomplete {} header: expected {} bytes, got {}",
            what,
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let len = payload_len(bytes, what)?;
    let total_len = HEADER_SIZE + len;
    if bytes.len() < total_len {
        return Err(PasteError::Protocol(format!(
            "Incomplete {} payload: expected {} bytes, got {}",
            what,
            total_len,
            bytes.len()
        )));
    }

    Ok((bytes[0], &bytes[HEADER_SIZE..total_len]))
}

/// Read one complete frame (header + payload) from a stream
fn read_frame<R: Read>(reader: &mut R, what: &str) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let len = payload_len(&header, what)?;

    let mut message = vec![0u8; HEADER_SIZE + len];
    message[..HEADER_SIZE].copy_from_slice(&header);
    if len > 0 {
        reader.read_exact(&mut message[HEADER_SIZE..])?;
    }
    Ok(message)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a complete command is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    let message = read_frame(reader, "command")?;
    decode_command(&message)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer.write_all(&encode_command(command))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let message = read_frame(reader, "response")?;
    decode_response(&message)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}
