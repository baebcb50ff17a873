//! `HttpSearchService` against a one-shot local HTTP responder.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use docsearch::sources::{HttpSearchService, SearchService};
use docsearch::state::QueryInput;

/// Serve exactly one request with `status` and `body`; yields the request body.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let request_body = loop {
            let n = sock.read(&mut chunk).await.expect("read");
            if n == 0 {
                break String::new();
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(split) = text.find("\r\n\r\n") else {
                continue;
            };
            let length = text[..split]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= split + 4 + length {
                break text[split + 4..split + 4 + length].to_string();
            }
        };
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.expect("write");
        sock.shutdown().await.ok();
        request_body
    });
    (format!("http://{addr}/search"), handle)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client")
}

fn query(text: &str) -> QueryInput {
    QueryInput {
        id: 7,
        text: text.to_string(),
        limit: 5,
        filters: vec!["library:motion".to_string()],
    }
}

#[tokio::test]
/// What: The service posts the query JSON, decodes `{results}` and caches the answer.
///
/// Inputs:
/// - One-shot server returning a wrapped result list; the same query searched twice
///
/// Output:
/// - Posted body carries query, limit and filters; both calls return the hit
async fn http_posts_query_and_caches() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"results":[{"kind":"function","group":"motion","category":"Hooks","title":"useDragControls","target":"/docs/hooks#use-drag-controls"}]}"#,
    )
    .await;
    let svc = HttpSearchService::with_client(&url, client());

    let first = svc.search(&query("drag")).await.expect("first search");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "useDragControls");

    let posted: serde_json::Value =
        serde_json::from_str(&server.await.expect("server")).expect("json body");
    assert_eq!(posted["query"], "drag");
    assert_eq!(posted["limit"], 5);
    assert_eq!(posted["filters"][0], "library:motion");

    // The listener is gone, so only the cache can answer this.
    let second = svc.search(&query(" drag ")).await.expect("cached search");
    assert_eq!(second, first);
}

#[tokio::test]
/// What: Non-2xx statuses are errors.
///
/// Inputs:
/// - One-shot server answering 500
///
/// Output:
/// - `Err` from `search`
async fn http_error_status_is_failure() {
    let (url, server) = serve_once("500 Internal Server Error", "{}").await;
    let svc = HttpSearchService::with_client(&url, client());
    assert!(svc.search(&query("spring")).await.is_err());
    let _ = server.await;
}
