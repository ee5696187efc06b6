use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use livelog::config::SourceConfig;
use livelog::source::{HttpLogSource, LogSource};

/// 单次请求的桩服务器，返回捕获到的请求头文本
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base_url, handle)
}

fn source_for(base_url: String) -> HttpLogSource {
    HttpLogSource::new(&SourceConfig {
        base_url,
        cookie: Some("sid=abc".into()),
        bearer_token: Some("t0ken".into()),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_parses_entries_and_sends_credentials() {
    let body = r#"[
        {"target":"https://example.com","slug":"promo","ip":"1.2.3.4","click":3,
         "city":"Paris","country":"FR","updatedAt":"2024-05-01T12:00:00Z","createdAt":"2024-05-01T11:00:00Z"},
        {"target":null,"slug":"b","ip":"5.6.7.8","click":null,"city":null,"country":null,
         "updatedAt":"2024-05-01T12:00:01Z","createdAt":null}
    ]"#;
    let (base_url, server) = serve_once("200 OK", body);
    let source = source_for(base_url);

    let entries = source.fetch(true).await.unwrap();
    let request = server.join().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].slug, "promo");
    assert_eq!(entries[0].click, 3);
    assert_eq!(entries[0].city.as_deref(), Some("Paris"));
    assert_eq!(entries[1].target, "");
    assert_eq!(entries[1].click, 0);
    assert!(entries.iter().all(|e| !e.is_new));

    let request_line = request.lines().next().unwrap();
    assert!(
        request_line.starts_with("GET /api/url/admin/live-log?admin=true "),
        "got: {}",
        request_line
    );
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("cookie: sid=abc"));
    assert!(lower.contains("authorization: bearer t0ken"));
}

#[tokio::test]
async fn test_non_admin_query() {
    let (base_url, server) = serve_once("200 OK", "[]");
    let source = source_for(base_url);

    let entries = source.fetch(false).await.unwrap();
    let request = server.join().unwrap();

    assert!(entries.is_empty());
    assert!(request.contains("admin=false"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (base_url, server) = serve_once("401 Unauthorized", r#"{"error":"login required"}"#);
    let source = source_for(base_url);

    let err = source.fetch(true).await.unwrap_err();
    server.join().unwrap();

    assert_eq!(err.code(), "E004");
    assert!(err.message().contains("401"));
    assert!(err.message().contains("login required"));
}

#[tokio::test]
async fn test_non_array_body_is_serialization_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"data":[]}"#);
    let source = source_for(base_url);

    let err = source.fetch(false).await.unwrap_err();
    server.join().unwrap();

    assert_eq!(err.code(), "E005");
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let source = source_for(format!("http://127.0.0.1:{}", port));

    let err = source.fetch(false).await.unwrap_err();
    assert_eq!(err.code(), "E003");
}
