//! Minimal HTTP/1.1 stand-in for the download/transcode backend.
//!
//! Serves `POST /download` (JSON ack with a fresh id), `GET /downloads`
//! (a scriptable JSON array), and `GET /download-file` (a fixed body with a
//! Content-Disposition name). A `fail` switch turns every endpoint into a
//! 500 with a plain-text body, for error-path tests.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Body served by `GET /download-file`.
pub const FILE_BODY: &[u8] = b"not really an mp4, but close enough for tests";
/// Plain-text body of every response while `fail` is set.
pub const FAIL_BODY: &str = "backend exploded";

pub struct ApiServerState {
    /// JSON array returned by `GET /downloads`.
    pub listing: Mutex<String>,
    /// When true, every endpoint answers 500 with `FAIL_BODY`.
    pub fail: AtomicBool,
    next_id: AtomicI64,
}

pub struct ApiServer {
    /// Base URL without a trailing slash, e.g. "http://127.0.0.1:34567".
    pub base_url: String,
    pub state: Arc<ApiServerState>,
}

/// Starts a server in a background thread. The first submission gets id 42.
/// The server runs until the process exits.
pub fn start() -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(ApiServerState {
        listing: Mutex::new("[]".to_string()),
        fail: AtomicBool::new(false),
        next_id: AtomicI64::new(42),
    });
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &state));
        }
    });
    ApiServer {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    }
}

fn handle(mut stream: TcpStream, state: &ApiServerState) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];
    // Read until end of headers.
    let header_end = loop {
        match stream.read(&mut tmp) {
            Ok(0) => return,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
            Err(_) => return,
        }
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        if buf.len() > 64 * 1024 {
            return;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    // Drain the body so the client doesn't see a reset mid-write.
    while buf.len() < header_end + content_length {
        match stream.read(&mut tmp) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
            Err(_) => return,
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    let path = target.split('?').next().unwrap_or("");

    if state.fail.load(Ordering::SeqCst) {
        respond(
            &mut stream,
            "500 Internal Server Error",
            "text/plain",
            "",
            FAIL_BODY.as_bytes(),
        );
        return;
    }

    match (method, path) {
        ("POST", "/download") => {
            let id = state.next_id.fetch_add(1, Ordering::SeqCst);
            let body = format!(
                "{{\"message\":\"Download iniciado com sucesso\",\"id\":{}}}",
                id
            );
            respond(&mut stream, "200 OK", "application/json", "", body.as_bytes());
        }
        ("GET", "/downloads") => {
            let listing = state.listing.lock().unwrap().clone();
            respond(
                &mut stream,
                "200 OK",
                "application/json",
                "",
                listing.as_bytes(),
            );
        }
        ("GET", "/download-file") => {
            respond(
                &mut stream,
                "200 OK",
                "application/octet-stream",
                "Content-Disposition: attachment; filename=\"clip.mp4\"\r\n",
                FILE_BODY,
            );
        }
        _ => respond(
            &mut stream,
            "404 Not Found",
            "text/plain",
            "",
            b"no such endpoint",
        ),
    }
}

fn respond(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    extra_headers: &str,
    body: &[u8],
) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        content_type,
        body.len(),
        extra_headers
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
