//! Blocking client
//!
//! Speaks the binary protocol over one TCP connection.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{PasteError, Result};
use crate::id::is_valid_id;
use crate::protocol::{read_response, write_command, Command, Response, Status};
use crate::render;

/// A downloaded blob with the headers the server attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// File name from the server's `Content-Disposition`
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Client for a pastebin server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| PasteError::Network(format!("failed to connect: {}", e)))?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a command and wait for its response
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    /// Store a blob, returning its id
    pub fn paste(&mut self, blob: impl Into<Vec<u8>>, accept: &str) -> Result<String> {
        let response = self.send(&Command::Paste {
            accept: accept.to_string(),
            blob: blob.into(),
        })?;
        Ok(expect_ok(response)?.text())
    }

    /// Fetch a rendered view, `None` if the id is unknown or expired
    pub fn view(&mut self, id: &str, accept: &str) -> Result<Option<Bytes>> {
        let response = self.send(&Command::View {
            accept: accept.to_string(),
            id: id.to_string(),
        })?;
        body_or_none(response)
    }

    /// Fetch the raw bytes of a blob along with its attachment headers
    pub fn download(&mut self, id: &str) -> Result<Option<Download>> {
        let response = self.send(&Command::Download { id: id.to_string() })?;
        if response.status == Status::NotFound {
            return Ok(None);
        }

        let response = expect_ok(response)?;
        let filename = response
            .disposition
            .as_deref()
            .and_then(render::attachment_filename)
            .map(str::to_string);

        Ok(Some(Download {
            filename,
            content_type: response.content_type,
            body: response.payload.unwrap_or_default(),
        }))
    }

    /// Download a blob into `dir` under the file name the server suggests
    ///
    /// Falls back to the id when the server sends no name.
    pub fn download_to(&mut self, id: &str, dir: &Path) -> Result<Option<PathBuf>> {
        // Ids double as file names, so refuse anything outside the alphabet
        if !is_valid_id(id) {
            return Err(PasteError::InvalidInput(format!("not a valid id: {:?}", id)));
        }

        let Some(download) = self.download(id)? else {
            return Ok(None);
        };

        let filename = download.filename.as_deref().unwrap_or(id);
        if !is_valid_id(filename) {
            return Err(PasteError::Protocol(format!(
                "server suggested an unsafe file name: {:?}",
                filename
            )));
        }

        let path = dir.join(filename);
        fs::write(&path, &download.body)?;
        Ok(Some(path))
    }

    /// Delete a blob, returning whether it existed
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let response = self.send(&Command::Delete { id: id.to_string() })?;
        match response.status {
            Status::NotFound => Ok(false),
            _ => expect_ok(response).map(|_| true),
        }
    }

    /// Health check
    pub fn ping(&mut self) -> Result<()> {
        expect_ok(self.send(&Command::Ping)?).map(|_| ())
    }
}

fn body_or_none(response: Response) -> Result<Option<Bytes>> {
    match response.status {
        Status::NotFound => Ok(None),
        _ => Ok(Some(expect_ok(response)?.payload.unwrap_or_default())),
    }
}

/// Turn non-OK statuses back into errors
fn expect_ok(response: Response) -> Result<Response> {
    match response.status {
        Status::Ok => Ok(response),
        Status::NotAcceptable => Err(PasteError::NotAcceptable),
        Status::BadRequest => Err(PasteError::InvalidInput(response.text())),
        Status::NotFound => Err(PasteError::Network("not found".to_string())),
        Status::Error => Err(PasteError::Network(format!("server error: {}", response.text()))),
    }
}
