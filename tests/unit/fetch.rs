use super::*;
use std::io::{Read, Write};
use std::net::TcpListener;

fn request(url: String) -> FetchRequest {
    FetchRequest {
        url,
        referer: Some("https://example.test/".to_string()),
        user_agent: "schedule-generator/1.0".to_string(),
        timeout: Duration::from_secs(5),
    }
}

/// Serve one canned HTTP response and hand back the raw request text.
fn serve_once(response: &'static str) -> (String, std::thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let mut raw = Vec::new();
        while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    });
    (url, handle)
}

#[test]
fn http_fetch_sends_referer_and_user_agent() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
    );
    let body = HttpFetcher.fetch(&request(url)).unwrap();
    assert_eq!(body, b"hello");

    let raw = server.join().unwrap().to_ascii_lowercase();
    assert!(raw.contains("referer: https://example.test/"));
    assert!(raw.contains("user-agent: schedule-generator/1.0"));
}

#[test]
fn non_success_status_is_a_fetch_error() {
    let (url, server) = serve_once(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );
    let err = HttpFetcher.fetch(&request(url)).unwrap_err();
    assert_eq!(err.stage(), "fetch");
    server.join().unwrap();
}

#[test]
fn connection_failure_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    let err = HttpFetcher.fetch(&request(url)).unwrap_err();
    assert!(matches!(err, ReelError::Fetch(_)));
}

#[test]
fn file_fetcher_accepts_file_urls_and_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.html");
    std::fs::write(&path, "<html></html>").unwrap();

    let bare = FileFetcher.fetch(&request(path.display().to_string())).unwrap();
    let url = FileFetcher
        .fetch(&request(format!("file://{}", path.display())))
        .unwrap();
    assert_eq!(bare, b"<html></html>");
    assert_eq!(bare, url);

    let missing = FileFetcher.fetch(&request(dir.path().join("nope").display().to_string()));
    assert_eq!(missing.unwrap_err().stage(), "fetch");
}

#[test]
fn scheme_selects_fetcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "{}").unwrap();
    let body = fetcher_for(&path.display().to_string())
        .fetch(&request(path.display().to_string()))
        .unwrap();
    assert_eq!(body, b"{}");
}
