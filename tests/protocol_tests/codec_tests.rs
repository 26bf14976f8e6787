//! Codec Tests
//!
//! Tests for command and response encoding/decoding.

use std::io::Cursor;

use bytes::Bytes;
use pastebin::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, Command, Response, Status, HEADER_SIZE,
    MAX_PAYLOAD_SIZE,
};
use pastebin::render;
use pastebin::PasteError;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_paste() {
    let cmd = Command::Paste {
        accept: "text/plain".to_string(),
        blob: b"hello\x00world".to_vec(),
    };
    let decoded = decode_command(&encode_command(&cmd)).unwrap();

    match decoded {
        Command::Paste { accept, blob } => {
            assert_eq!(accept, "text/plain");
            assert_eq!(blob, b"hello\x00world");
        }
        _ => panic!("Expected PASTE command"),
    }
}

#[test]
fn test_encode_decode_view() {
    let cmd = Command::View {
        accept: "text/html, text/plain;q=0.9".to_string(),
        id: "Ab3dE9kL".to_string(),
    };
    assert_eq!(decode_command(&encode_command(&cmd)).unwrap(), cmd);
}

#[test]
fn test_encode_decode_view_empty_accept() {
    let cmd = Command::View {
        accept: String::new(),
        id: "Ab3dE9kL".to_string(),
    };
    assert_eq!(decode_command(&encode_command(&cmd)).unwrap(), cmd);
}

#[test]
fn test_paste_wire_layout() {
    let cmd = Command::Paste {
        accept: "*/*".to_string(),
        blob: b"hi".to_vec(),
    };
    let encoded = encode_command(&cmd);

    assert_eq!(
        encoded.as_ref(),
        &[0x01, 0, 0, 0, 7, 0, 3, b'*', b'/', b'*', b'h', b'i'][..]
    );
}

#[test]
fn test_ping_wire_layout() {
    let encoded = encode_command(&Command::Ping);
    assert_eq!(encoded.len(), HEADER_SIZE);
    assert_eq!(encoded.as_ref(), &[0x05, 0, 0, 0, 0][..]);
}

#[test]
fn test_decode_unknown_command() {
    let result = decode_command(&[0x7f, 0, 0, 0, 0]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_header() {
    let result = decode_command(&[0x01, 0, 0]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_payload() {
    let result = decode_command(&[0x03, 0, 0, 0, 10, b'a']);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_truncated_accept() {
    // accept_len says 9, only 2 bytes follow
    let result = decode_command(&[0x02, 0, 0, 0, 4, 0, 9, b'a', b'b']);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_long_multibyte_accept_is_cut_on_char_boundary() {
    // 2-byte chars put byte 65535 in the middle of one
    let accept = "é".repeat(40_000);
    let cmd = Command::View {
        accept: accept.clone(),
        id: "Ab3dE9kL".to_string(),
    };

    match decode_command(&encode_command(&cmd)).unwrap() {
        Command::View { accept: decoded, id } => {
            assert_eq!(decoded.len(), 65_534);
            assert!(accept.starts_with(&decoded));
            assert_eq!(id, "Ab3dE9kL");
        }
        other => panic!("Expected VIEW command, got {:?}", other),
    }
}

#[test]
fn test_decode_ping_with_payload() {
    let result = decode_command(&[0x05, 0, 0, 0, 1, 0xff]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_non_utf8_id() {
    let result = decode_command(&[0x04, 0, 0, 0, 2, 0xc3, 0x28]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_oversized_frame() {
    let len = (MAX_PAYLOAD_SIZE + 1).to_be_bytes();
    let result = decode_command(&[0x03, len[0], len[1], len[2], len[3]]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_response_statuses() {
    let responses = [
        Response::ok(Some(Bytes::from_static(b"Ab3dE9kL"))),
        Response::not_found(),
        Response::error("boom"),
        Response::not_acceptable("no"),
        Response::bad_request("empty"),
    ];

    for response in responses {
        assert_eq!(decode_response(&encode_response(&response)).unwrap(), response);
    }
}

#[test]
fn test_empty_ok_payload_decodes_as_none() {
    let decoded = decode_response(&encode_response(&Response::ok(Some(Bytes::new())))).unwrap();
    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_download_response_keeps_headers() {
    let rendered = render::attachment("Ab3dE9kL", &Bytes::from_static(b"\x00raw"));
    let response = Response::rendered(rendered);
    let decoded = decode_response(&encode_response(&response)).unwrap();

    assert_eq!(decoded, response);
    assert_eq!(decoded.content_type.as_deref(), Some(render::OCTET_STREAM));
    assert_eq!(
        decoded.disposition.as_deref(),
        Some("attachment; filename=Ab3dE9kL")
    );
    assert_eq!(decoded.payload, Some(Bytes::from_static(b"\x00raw")));
}

#[test]
fn test_response_wire_layout() {
    let response = Response {
        status: Status::Ok,
        content_type: Some("t/p".to_string()),
        disposition: None,
        payload: Some(Bytes::from_static(b"hi")),
    };

    assert_eq!(
        encode_response(&response).as_ref(),
        &[0x00, 0, 0, 0, 8, 3, b't', b'/', b'p', 0, 0, b'h', b'i'][..]
    );
    assert_eq!(
        encode_response(&Response::not_found()).as_ref(),
        &[0x01, 0, 0, 0, 3, 0, 0, 0][..]
    );
}

#[test]
fn test_decode_truncated_response_headers() {
    // content_type_len says 5, only 1 byte follows
    let result = decode_response(&[0x00, 0, 0, 0, 2, 5, b'a']);
    assert!(matches!(result, Err(PasteError::Protocol(_))));

    // disposition length cut short
    let result = decode_response(&[0x00, 0, 0, 0, 2, 0, 0]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

#[test]
fn test_decode_unknown_status() {
    let result = decode_response(&[0x42, 0, 0, 0, 0]);
    assert!(matches!(result, Err(PasteError::Protocol(_))));
}

// =============================================================================
// Stream Tests
// =============================================================================

#[test]
fn test_stream_multiple_commands() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Ping).unwrap();
    write_command(&mut buffer, &Command::Delete { id: "abc".to_string() }).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Ping);
    assert_eq!(
        read_command(&mut cursor).unwrap(),
        Command::Delete { id: "abc".to_string() }
    );

    // Stream exhausted
    assert!(matches!(read_command(&mut cursor), Err(PasteError::Io(_))));
}

#[test]
fn test_stream_response() {
    let mut buffer = Vec::new();
    let response = Response::ok(Some(Bytes::from_static(b"payload")));
    write_response(&mut buffer, &response).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_response(&mut cursor).unwrap(), response);
}

#[test]
fn test_stream_rejects_oversized_length_before_reading() {
    let len = (MAX_PAYLOAD_SIZE + 1).to_be_bytes();
    let mut cursor = Cursor::new(vec![0x01, len[0], len[1], len[2], len[3]]);
    assert!(matches!(read_command(&mut cursor), Err(PasteError::Protocol(_))));
}
