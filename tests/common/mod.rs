#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use quickdigit::inference::{RawResponse, Transport, TransportError};

/// A transport that records what it was asked to send and answers with a
/// canned outcome.
pub struct StubTransport {
    outcome: Result<RawResponse, TransportError>,
    calls: RefCell<Vec<(String, String)>>,
}

impl StubTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self::with_outcome(Ok(RawResponse::new(status, body)))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(TransportError::new(message)))
    }

    pub fn with_outcome(outcome: Result<RawResponse, TransportError>) -> Self {
        Self {
            outcome,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `(url, body)` of every call so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl Transport for StubTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse, TransportError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), body.to_string()));
        self.outcome.clone()
    }
}

/// What the one-shot server saw.
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    /// Header names are lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serves exactly one HTTP request on a free local port, answering with
/// `status` and `body`. Returns the URL to hit and a handle yielding the
/// captured request.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let url = format!("http://{}/", listener.local_addr().expect("local addr"));
    let response_body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(name, _)| name == "content-length")
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).expect("read body");

        let reason = if (200..300).contains(&status) {
            "OK"
        } else {
            "Error"
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            response_body.len(),
            response_body
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        stream.flush().expect("flush response");

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(body).expect("utf-8 body"),
        }
    });

    (url, handle)
}
