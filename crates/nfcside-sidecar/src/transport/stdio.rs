//! Request loop over stdin/stdout.
//!
//! Strictly one request in flight: read a line, resolve exactly one
//! response, write and flush it, then read again. Every per-request failure
//! becomes an `ok: false` response; only the input stream failing ends the
//! loop early.

use tokio::io::{AsyncBufRead, AsyncWrite};

use nfcside_core::error::Result;
use nfcside_core::protocol::Response;

use crate::config::ProtocolSection;
use crate::dispatch::Dispatcher;
use crate::transport::codec::{self, ResponseWriter};
use crate::transport::framing::LineReader;

/// Counters reported when the input closes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeSummary {
    /// Lines answered, including undecodable ones.
    pub requests: u64,
    /// Responses sent with `ok: false`.
    pub failures: u64,
}

/// Run the loop until end of stream (`Ok`) or a read failure (`Err`).
pub async fn serve<R, W>(
    dispatcher: &Dispatcher,
    reader: R,
    writer: W,
    protocol: &ProtocolSection,
) -> Result<ServeSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = LineReader::new(reader, protocol.max_line_bytes);
    let mut out = ResponseWriter::new(writer);
    let mut summary = ServeSummary::default();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(
                    code = e.client_code().as_str(),
                    error = %e,
                    requests = summary.requests,
                    "input stream failed, stopping"
                );
                return Err(e);
            }
        };

        let resp = handle_line(dispatcher, &line);
        summary.requests += 1;
        if !resp.is_ok() {
            summary.failures += 1;
        }

        if let Err(e) = out.write(&resp).await {
            tracing::warn!(id = resp.id(), error = %e, "response not delivered");
        }
    }

    tracing::info!(
        requests = summary.requests,
        failures = summary.failures,
        "input closed"
    );
    Ok(summary)
}

/// Decode and dispatch one line. Never fails: decode errors become a
/// response with an empty id.
pub fn handle_line(dispatcher: &Dispatcher, line: &[u8]) -> Response {
    match codec::decode(line) {
        Ok(req) => {
            let span = tracing::debug_span!("request", id = %req.id, msg_type = %req.msg_type);
            let _enter = span.enter();

            let resp = dispatcher.dispatch(&req);
            if let Some(err) = resp.error() {
                tracing::debug!(error = err, "request failed");
            }
            resp
        }
        Err(e) => {
            tracing::warn!(code = e.client_code().as_str(), error = %e, "undecodable request line");
            Response::failure("", &e)
        }
    }
}
