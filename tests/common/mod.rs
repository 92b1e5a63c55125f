//! Shared utilities for integration testing.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// One parsed request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Start a mock backend that returns a fixed response.
#[allow(dead_code)]
pub fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_backend(move |_req| (status, body.to_string()))
}

/// Start a programmable mock backend; the handler runs per connection.
pub fn start_programmable_backend<F>(handler: F) -> SocketAddr
where
    F: Fn(RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    // Safe to repeat per test; only the first call installs the subscriber.
    wasapi::observability::init_logging("wasapi=debug");

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    thread::spawn(move || loop {
        match listener.accept() {
            Ok((socket, _)) => {
                let handler = handler.clone();
                thread::spawn(move || serve_connection(socket, handler));
            }
            Err(_) => break,
        }
    });
    addr
}

fn serve_connection<F>(socket: TcpStream, handler: Arc<F>)
where
    F: Fn(RecordedRequest) -> (u16, String),
{
    let Some(request) = read_request(&socket) else {
        return;
    };
    let (status, body) = handler(request);
    let status_text = match status {
        200 => "200 OK",
        201 => "201 Created",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response_str = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let mut socket = socket;
    let _ = socket.write_all(response_str.as_bytes());
    let _ = socket.shutdown(std::net::Shutdown::Write);
}

fn read_request(socket: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let content_length: usize = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0);
    let mut body_bytes = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body_bytes).ok()?;
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body_bytes).into_owned(),
    })
}
