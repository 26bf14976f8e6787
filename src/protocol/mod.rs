//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: PASTE     - Payload: accept_len (2) + accept + blob
//! - 0x02: VIEW      - Payload: accept_len (2) + accept + id
//! - 0x03: DOWNLOAD  - Payload: id
//! - 0x04: DELETE    - Payload: id
//! - 0x05: PING      - Payload: empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! Response payload: content_type_len (1) + content_type + disposition_len (2)
//! + disposition + body
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: ERROR
//! - 0x03: NOT_ACCEPTABLE
//! - 0x04: BAD_REQUEST

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
