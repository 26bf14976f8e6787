//! Command definitions
//!
//! Represents requests from clients.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Paste = 0x01,
    View = 0x02,
    Download = 0x03,
    Delete = 0x04,
    Ping = 0x05,
}

impl CommandType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(CommandType::Paste),
            0x02 => Some(CommandType::View),
            0x03 => Some(CommandType::Download),
            0x04 => Some(CommandType::Delete),
            0x05 => Some(CommandType::Ping),
            _ => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a blob; `accept` picks how the new id is reported
    Paste { accept: String, blob: Vec<u8> },

    /// Show a blob as text or HTML, per `accept`
    View { accept: String, id: String },

    /// Fetch a blob's raw bytes as an attachment
    Download { id: String },

    /// Remove a blob
    Delete { id: String },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Paste { .. } => CommandType::Paste,
            Command::View { .. } => CommandType::View,
            Command::Download { .. } => CommandType::Download,
            Command::Delete { .. } => CommandType::Delete,
            Command::Ping => CommandType::Ping,
        }
    }
}
