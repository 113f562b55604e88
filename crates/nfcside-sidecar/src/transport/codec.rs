//! Line codec for the stdio transport.
//!
//! - Inbound: one trimmed line => `Request` (lazy `RawValue` payload)
//! - Outbound: `Response` => compact JSON + `\n`, flushed per response

use tokio::io::{AsyncWrite, AsyncWriteExt};

use nfcside_core::{
    error::{Result, SidecarError},
    protocol::{Request, Response},
};

pub fn decode(line: &[u8]) -> Result<Request> {
    Request::parse(line)
}

/// Writes one response per call and flushes before returning.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub async fn write(&mut self, resp: &Response) -> Result<()> {
        let line = resp.to_line()?;
        self.writer
            .write_all(&line)
            .await
            .map_err(|e| SidecarError::Internal(format!("stdout write failed: {e}")))?;
        self.writer
            .flush()
            .await
            .map_err(|e| SidecarError::Internal(format!("stdout flush failed: {e}")))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
