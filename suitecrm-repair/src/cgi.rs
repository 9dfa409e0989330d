//! Minimal CGI responses for web invocations

use std::io::{self, Write};

/// Redirect response sent instead of running the repair.
pub fn redirect(location: &str) -> String {
    format!("Status: 302 Found\r\nLocation: {}\r\n\r\n", location)
}

/// Plain-text error response.
pub fn error(message: &str) -> String {
    format!(
        "Status: 500 Internal Server Error\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}\n",
        message
    )
}

/// Write a full response and flush it; the caller decides what a failure means.
pub fn write_response(out: &mut impl Write, response: &str) -> io::Result<()> {
    out.write_all(response.as_bytes())?;
    out.flush()
}
