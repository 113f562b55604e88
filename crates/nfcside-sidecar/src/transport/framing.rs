//! Newline framing over an async byte stream.
//!
//! Lines are returned as raw bytes; UTF-8 validity is the decoder's
//! concern, so a bad line costs one error response instead of the stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use nfcside_core::error::{Result, SidecarError};

/// Yields trimmed, non-blank lines until end of stream.
pub struct LineReader<R> {
    inner: R,
    max_line_bytes: usize,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            max_line_bytes,
        }
    }

    /// Next non-blank line with surrounding whitespace removed.
    ///
    /// Returns `Ok(None)` at end of stream. A read error, or a line that
    /// does not fit in `max_line_bytes` together with its `\n`, is fatal
    /// (`SidecarError::is_fatal`).
    pub async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let Some(raw) = self.read_raw_line().await? else {
                return Ok(None);
            };
            let line = trim_whitespace(&raw);
            if line.is_empty() {
                continue;
            }
            return Ok(Some(line.to_vec()));
        }
    }

    /// Reads up to and excluding the next `\n`. The final line may be
    /// unterminated.
    async fn read_raw_line(&mut self) -> Result<Option<Vec<u8>>> {
        let max = self.max_line_bytes;
        let mut line = Vec::new();

        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Ok(if line.is_empty() { None } else { Some(line) });
            }

            let (chunk, consumed, complete) = match available.iter().position(|b| *b == b'\n') {
                Some(pos) => (&available[..pos], pos + 1, true),
                None => (available, available.len(), false),
            };

            // The limit counts the delimiter, so content must stay below it.
            // Checked before buffering so an oversized line is never held whole.
            if line.len() + chunk.len() >= max {
                return Err(SidecarError::LineTooLong { max });
            }
            line.extend_from_slice(chunk);
            self.inner.consume(consumed);

            if complete {
                return Ok(Some(line));
            }
        }
    }
}

/// Unicode whitespace for valid UTF-8 (so U+0085 and U+00A0 go too),
/// ASCII whitespace otherwise.
fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim().as_bytes(),
        Err(_) => trim_ascii_whitespace(bytes),
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    &bytes[start..end]
}
