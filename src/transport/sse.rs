//! Server-Sent Events decoding (Bytes -> JSON Value).
//!
//! - frames are separated by a blank line (`\n\n`, CR characters are dropped)
//! - `data:` lines of one frame are joined with `\n`
//! - comment lines (`:`) and frames that are not JSON are skipped
//! - the stream ends at `[DONE]` or at EOF

use crate::{BoxStream, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde_json::Value;
use tracing::debug;

const DONE_SIGNAL: &str = "[DONE]";

enum Frame {
    Data(Value),
    Done,
    Skip,
}

fn parse_frame(raw: &[u8]) -> Frame {
    let text = String::from_utf8_lossy(raw);
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        } else if !line.contains(':') || line.starts_with('{') {
            // Bare JSON line without the `data:` prefix.
            data_lines.push(line);
        }
    }

    if data_lines.is_empty() {
        return Frame::Skip;
    }
    let payload = data_lines.join("\n");
    let payload = payload.trim();
    if payload == DONE_SIGNAL {
        return Frame::Done;
    }
    match serde_json::from_str(payload) {
        Ok(v) => Frame::Data(v),
        Err(e) => {
            debug!(error = %e, "skipping non-JSON SSE frame");
            Frame::Skip
        }
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

/// Decode a byte stream into the JSON payloads of its SSE frames.
///
/// Bytes are buffered before UTF-8 conversion, so multi-byte characters split
/// across network chunks decode correctly.
pub fn decode_sse(input: BoxStream<'static, Bytes>) -> BoxStream<'static, Value> {
    let stream = stream::unfold(
        Some((input, Vec::<u8>::new())),
        |state| async move {
            let (mut input, mut buf) = state?;
            loop {
                if let Some(idx) = find_delimiter(&buf) {
                    let frame: Vec<u8> = buf.drain(..idx + 2).collect();
                    match parse_frame(&frame[..idx]) {
                        Frame::Data(v) => return Some((Ok(v), Some((input, buf)))),
                        Frame::Done => return None,
                        Frame::Skip => continue,
                    }
                }

                match input.next().await {
                    Some(Ok(bytes)) => {
                        buf.extend(bytes.iter().copied().filter(|b| *b != b'\r'));
                    }
                    Some(Err(e)) => return Some((Err(e), None)),
                    None => {
                        // EOF: parse whatever is left once.
                        return match parse_frame(&buf) {
                            Frame::Data(v) => Some((Ok(v), None)),
                            Frame::Done | Frame::Skip => None,
                        };
                    }
                }
            }
        },
    );
    Box::pin(stream)
}

/// Collect a fully-buffered SSE body; mostly useful for tests and benchmarks.
pub async fn decode_sse_bytes(body: Bytes) -> Result<Vec<Value>> {
    let input: BoxStream<'static, Bytes> = Box::pin(stream::iter(vec![Ok(body)]));
    let mut out = Vec::new();
    let mut decoded = decode_sse(input);
    while let Some(v) = decoded.next().await {
        out.push(v?);
    }
    Ok(out)
}
