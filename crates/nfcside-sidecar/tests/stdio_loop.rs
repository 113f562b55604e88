//! End-to-end loop tests over in-memory stdin/stdout.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, ReadBuf};

use nfcside_core::error::{Result, SidecarError};
use nfcside_sidecar::app_state::AppState;
use nfcside_sidecar::config::{ProtocolSection, SidecarConfig};
use nfcside_sidecar::dispatch::Dispatcher;
use nfcside_sidecar::transport::stdio::{serve, ServeSummary};

mod support;
use support::{fixed_dispatcher, FIXED_NANOS};

async fn run(d: &Dispatcher, input: &[u8]) -> (Result<ServeSummary>, String) {
    run_with(d, input, &ProtocolSection::default()).await
}

async fn run_with(
    d: &Dispatcher,
    input: &[u8],
    protocol: &ProtocolSection,
) -> (Result<ServeSummary>, String) {
    let mut out = Vec::new();
    let res = serve(d, input, &mut out, protocol).await;
    (res, String::from_utf8(out).unwrap())
}

fn parse_lines(out: &str) -> Vec<Value> {
    assert!(out.is_empty() || out.ends_with('\n'), "unterminated output: {out:?}");
    out.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
}

#[tokio::test]
async fn literal_scenarios() {
    let d = fixed_dispatcher();
    let input = concat!(
        r#"{"id":"1","type":"SET_PID","payload":{"pid":42}}"#, "\n",
        r#"{"id":"2","type":"SCAN_NFC"}"#, "\n",
        r#"{"id":"3","type":"LOGIN","payload":{"user":"alice","pass":"x"}}"#, "\n",
        "not json\n",
        r#"{"id":"5","type":"FOO"}"#, "\n",
        r#"{"id":"6","type":"LOGIN"}"#, "\n",
    );

    let (res, out) = run(&d, input.as_bytes()).await;
    assert_eq!(res.unwrap(), ServeSummary { requests: 6, failures: 3 });

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], r#"{"id":"1","ok":true,"data":{"message":"Handshake Successful"}}"#);
    assert_eq!(lines[1], r#"{"id":"2","ok":true,"data":{"id":"deadbeef"}}"#);
    assert_eq!(
        lines[2],
        format!(r#"{{"id":"3","ok":true,"data":{{"token":"mock.jwt.alice.{FIXED_NANOS}"}}}}"#)
    );
    assert!(
        lines[3].starts_with(r#"{"id":"","ok":false,"error":"invalid request: "#),
        "got {}",
        lines[3]
    );
    assert_eq!(lines[4], r#"{"id":"5","ok":false,"error":"unknown message type"}"#);
    assert_eq!(lines[5], r#"{"id":"6","ok":false,"error":"invalid LOGIN payload"}"#);
}

#[tokio::test]
async fn malformed_lines_never_stop_the_loop() {
    let d = fixed_dispatcher();
    let input = concat!(
        "{\n",
        "[]\n",
        "42\n",
        r#"{"id":1,"type":"SET_PID"}"#, "\n",
        r#"{"id":"ok","type":"SET_PID"}"#, "\n",
    );

    let (res, out) = run(&d, input.as_bytes()).await;
    assert_eq!(res.unwrap().requests, 5);

    let lines = parse_lines(&out);
    for bad in &lines[..4] {
        assert_eq!(bad["ok"], false);
        assert_eq!(bad["id"], "");
        assert!(bad.get("data").is_none());
        let msg = bad["error"].as_str().unwrap();
        assert!(msg.starts_with("invalid request: ") && msg.len() > 17, "got {msg}");
    }
    assert_eq!(lines[4]["id"], "ok");
    assert_eq!(lines[4]["ok"], true);
}

#[tokio::test]
async fn blank_lines_produce_no_response() {
    let d = fixed_dispatcher();
    let input = b"\n   \n\t\r\n  {\"id\":\"a\",\"type\":\"SET_PID\"}  \r\n\n";

    let (res, out) = run(&d, input).await;
    assert_eq!(res.unwrap().requests, 1);
    let lines = parse_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "a");
}

#[tokio::test]
async fn final_line_without_newline_is_answered() {
    let d = fixed_dispatcher();
    let (res, out) = run(&d, br#"{"id":"last","type":"SCAN_NFC"}"#).await;
    assert_eq!(res.unwrap().requests, 1);
    assert_eq!(parse_lines(&out)[0]["id"], "last");
}

#[tokio::test]
async fn empty_input_is_a_clean_shutdown() {
    let d = fixed_dispatcher();
    let (res, out) = run(&d, b"").await;
    assert_eq!(res.unwrap(), ServeSummary::default());
    assert!(out.is_empty());
}

#[tokio::test]
async fn invalid_utf8_is_a_decode_failure() {
    let d = fixed_dispatcher();
    let mut input = b"{\"id\":\"\xff\",\"type\":\"SET_PID\"}\n".to_vec();
    input.extend_from_slice(b"{\"id\":\"after\",\"type\":\"SET_PID\"}\n");

    let (res, out) = run(&d, &input).await;
    assert_eq!(res.unwrap(), ServeSummary { requests: 2, failures: 1 });
    let lines = parse_lines(&out);
    assert_eq!(lines[0]["id"], "");
    assert_eq!(lines[0]["ok"], false);
    assert_eq!(lines[1]["id"], "after");
}

#[tokio::test]
async fn oversized_line_ends_the_loop() {
    let d = fixed_dispatcher();
    let protocol = ProtocolSection { max_line_bytes: 1024 };
    let mut input = b"{\"id\":\"before\",\"type\":\"SET_PID\"}\n".to_vec();
    input.extend(std::iter::repeat(b'x').take(4096));
    input.extend_from_slice(b"\n{\"id\":\"never\",\"type\":\"SET_PID\"}\n");

    let (res, out) = run_with(&d, &input, &protocol).await;
    let err = res.unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, SidecarError::LineTooLong { max: 1024 }));

    let lines = parse_lines(&out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "before");
}

#[tokio::test]
async fn line_at_the_limit_is_accepted() {
    let d = fixed_dispatcher();
    let protocol = ProtocolSection { max_line_bytes: 1024 };
    let head = br#"{"id":"pad","type":"SET_PID","payload":{"pid":1}}"#;
    let mut input = head.to_vec();
    input.extend(std::iter::repeat(b' ').take(1023 - head.len()));
    input.push(b'\n');

    let (res, out) = run_with(&d, &input, &protocol).await;
    assert_eq!(res.unwrap().requests, 1);
    assert_eq!(parse_lines(&out)[0]["ok"], true);
}

#[tokio::test]
async fn limit_counts_the_newline() {
    let d = fixed_dispatcher();
    let protocol = ProtocolSection { max_line_bytes: 1024 };
    let head = br#"{"id":"pad","type":"SET_PID","payload":{"pid":1}}"#;
    let mut input = head.to_vec();
    input.extend(std::iter::repeat(b' ').take(1024 - head.len()));
    input.push(b'\n');

    let (res, out) = run_with(&d, &input, &protocol).await;
    assert!(matches!(res.unwrap_err(), SidecarError::LineTooLong { max: 1024 }));
    assert!(out.is_empty());
}

#[tokio::test]
async fn unicode_whitespace_around_a_line_is_trimmed() {
    let d = fixed_dispatcher();
    let input = "\u{a0}\u{85}\n\u{a0}{\"id\":\"u\",\"type\":\"SET_PID\"}\u{85}\n";

    let (res, out) = run(&d, input.as_bytes()).await;
    assert_eq!(res.unwrap(), ServeSummary { requests: 1, failures: 0 });
    assert_eq!(parse_lines(&out)[0]["id"], "u");
}

#[tokio::test]
async fn null_or_missing_envelope_members_read_as_empty() {
    let d = fixed_dispatcher();
    let input = concat!(
        r#"{"id":"7"}"#, "\n",
        r#"{"id":"8","type":null}"#, "\n",
        r#"{"id":null,"type":"SET_PID"}"#, "\n",
        r#"{"id":"9","type":"LOGIN","payload":null}"#, "\n",
    );

    let (res, out) = run(&d, input.as_bytes()).await;
    assert_eq!(res.unwrap(), ServeSummary { requests: 4, failures: 2 });

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], r#"{"id":"7","ok":false,"error":"unknown message type"}"#);
    assert_eq!(lines[1], r#"{"id":"8","ok":false,"error":"unknown message type"}"#);
    assert_eq!(lines[2], r#"{"id":"","ok":true,"data":{"message":"Handshake Successful"}}"#);
    assert_eq!(
        lines[3],
        format!(r#"{{"id":"9","ok":true,"data":{{"token":"mock.jwt..{FIXED_NANOS}"}}}}"#)
    );
}

/// Yields one chunk, then fails every read.
struct FailingStdin {
    first: Option<Vec<u8>>,
}

impl AsyncRead for FailingStdin {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if let Some(chunk) = self.first.take() {
            buf.put_slice(&chunk);
            return Poll::Ready(Ok(()));
        }
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin gone")))
    }
}

#[tokio::test]
async fn read_failure_stops_after_answering_prior_lines() {
    let d = fixed_dispatcher();
    let stdin = BufReader::new(FailingStdin {
        first: Some(b"{\"id\":\"1\",\"type\":\"SET_PID\"}\n".to_vec()),
    });
    let mut out = Vec::new();

    let err = serve(&d, stdin, &mut out, &ProtocolSection::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SidecarError::Transport(_)));
    assert_eq!(err.client_code().as_str(), "TRANSPORT");

    let lines = parse_lines(&String::from_utf8(out).unwrap());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "1");
}

struct ClosedStdout;

impl AsyncWrite for ClosedStdout {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout gone")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn write_failure_does_not_end_the_loop() {
    let d = fixed_dispatcher();
    let input = b"{\"id\":\"1\",\"type\":\"SET_PID\"}\n{\"id\":\"2\",\"type\":\"FOO\"}\n";

    let summary = serve(&d, &input[..], ClosedStdout, &ProtocolSection::default())
        .await
        .unwrap();
    assert_eq!(summary, ServeSummary { requests: 2, failures: 1 });
}

#[tokio::test]
async fn system_capabilities_produce_well_formed_values() {
    let state = AppState::new(SidecarConfig::default());
    let input = concat!(
        r#"{"id":"n","type":"SCAN_NFC"}"#, "\n",
        r#"{"id":"l","type":"LOGIN","payload":{"user":"carol"}}"#, "\n",
    );

    let (res, out) = run_with(state.dispatcher(), input.as_bytes(), &state.cfg().protocol).await;
    assert_eq!(res.unwrap().failures, 0);

    let lines = parse_lines(&out);
    let nfc = lines[0]["data"]["id"].as_str().unwrap();
    assert_eq!(nfc.len(), 8);
    assert!(nfc.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')), "id={nfc}");

    let token = lines[1]["data"]["token"].as_str().unwrap();
    let nanos = token.strip_prefix("mock.jwt.carol.").expect("token prefix");
    assert!(!nanos.is_empty() && nanos.chars().all(|c| c.is_ascii_digit()), "token={token}");
    assert!(nanos.parse::<u128>().unwrap() > 0);
}
