use std::io::{self, Write};

use crate::harness::response_capture::ResponseCapture;

pub fn print_headers<W: Write>(capture: &ResponseCapture, out: &mut W) -> io::Result<()> {
    writeln!(out, "Response Headers:")?;

    let mut headers: Vec<_> = capture.headers().iter().collect();
    headers.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in headers {
        writeln!(out, "{}: {}", name, value)?;
    }

    Ok(())
}

/// Pretty-prints a JSON body, falls back to the raw text, and writes nothing
/// for an empty body.
pub fn print_body<W: Write>(capture: &ResponseCapture, out: &mut W) -> io::Result<()> {
    if capture.body().is_empty() {
        return Ok(());
    }

    match capture.json() {
        Ok(json) => writeln!(out, "{}", serde_json::to_string_pretty(json)?),
        Err(_) => writeln!(out, "{}", capture.body_text()),
    }
}

/// Headers, then body, then a flush.
pub fn print_response<W: Write>(capture: &ResponseCapture, out: &mut W) -> io::Result<()> {
    print_headers(capture, out)?;
    print_body(capture, out)?;
    out.flush()
}
