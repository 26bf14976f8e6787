//! Representations of a stored blob
//!
//! One stored payload, three ways out: raw text, an HTML-escaped embed, or
//! a binary attachment named after the id.

use bytes::Bytes;

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media types the text endpoints can produce, in order of preference
pub const ACCEPTED_TYPES: [&str; 2] = [TEXT_HTML, TEXT_PLAIN];

/// Tabs are shown as this many spaces in views
const TAB_WIDTH: usize = 4;

/// A payload ready to hand to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: &'static str,
    /// `Content-Disposition` value, set for downloads only
    pub disposition: Option<String>,
    pub body: Bytes,
}

/// Raw passthrough with tabs expanded
pub fn plain(payload: &Bytes) -> Rendered {
    Rendered {
        content_type: TEXT_PLAIN,
        disposition: None,
        body: expand_tabs(payload),
    }
}

/// Escaped `<pre>` block embedding the payload
pub fn html(id: &str, payload: &Bytes) -> Rendered {
    let text = String::from_utf8_lossy(&expand_tabs(payload)).into_owned();

    let mut out = String::with_capacity(text.len() + 64);
    out.push_str("<pre id=\"");
    out.push_str(&escape_html(id));
    out.push_str("\">");
    out.push_str(&escape_html(&text));
    out.push_str("</pre>");

    Rendered {
        content_type: TEXT_HTML,
        disposition: None,
        body: Bytes::from(out),
    }
}

/// Untouched bytes served as an attachment named after the id
///
/// The body shares the stored buffer.
pub fn attachment(id: &str, payload: &Bytes) -> Rendered {
    Rendered {
        content_type: OCTET_STREAM,
        disposition: Some(format!("attachment; filename={}", id)),
        body: payload.clone(),
    }
}

/// File name carried by an `attachment; filename=...` disposition
pub fn attachment_filename(disposition: &str) -> Option<&str> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .filter(|name| !name.is_empty())
}

/// Render for a negotiated text media type
pub fn for_media_type(media_type: &str, id: &str, payload: &Bytes) -> Rendered {
    match media_type {
        TEXT_HTML => html(id, payload),
        _ => plain(payload),
    }
}

/// Replace each tab with spaces; returns the same buffer when there are none
pub fn expand_tabs(payload: &Bytes) -> Bytes {
    if !payload.contains(&b'\t') {
        return payload.clone();
    }

    let mut out = Vec::with_capacity(payload.len() + TAB_WIDTH);
    for &b in payload.iter() {
        if b == b'\t' {
            out.extend_from_slice(&[b' '; TAB_WIDTH]);
        } else {
            out.push(b);
        }
    }
    Bytes::from(out)
}

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
