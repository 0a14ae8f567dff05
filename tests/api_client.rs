use cityfill::api::{ApiError, City, CityLookup, GeoDbClient, LookupOutcome};
use cityfill::config::ApiConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answer exactly one HTTP request with the given status and body,
/// returning the raw request head that was received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{addr}"), handle)
}

fn client(base_url: String) -> GeoDbClient {
    let config = ApiConfig {
        key: "secret".to_string(),
        host: "wft-geo-db.p.rapidapi.com".to_string(),
        ..ApiConfig::default()
    };
    GeoDbClient::new(&config).with_base_url(base_url)
}

#[tokio::test]
async fn sends_prefix_limit_and_credentials() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"data":[{"id":1,"name":"Moscow","country":"Russia","region":"Moscow"}]}"#,
    )
    .await;

    let cities = client(base).fetch_cities("Mo").await;
    assert_eq!(cities, vec![City::new("1", "Moscow", "Russia")]);

    let head = server.await.unwrap().to_lowercase();
    assert!(
        head.starts_with("get /v1/geo/cities?nameprefix=mo&limit=10 http/1.1"),
        "unexpected request line: {head}"
    );
    assert!(head.contains("x-rapidapi-key: secret"));
    assert!(head.contains("x-rapidapi-host: wft-geo-db.p.rapidapi.com"));
}

#[tokio::test]
async fn error_status_yields_empty_list() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;

    let outcome = client(base).lookup_cities("Mo").await;
    assert_eq!(outcome, LookupOutcome::Failed(ApiError::Status(500)));
    assert!(outcome.into_cities().is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_yields_empty_list() {
    let (base, server) = serve_once("200 OK", r#"{"data":"nope"}"#).await;

    let outcome = client(base).lookup_cities("Mo").await;
    assert!(matches!(outcome, LookupOutcome::Failed(ApiError::Decode(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_host_yields_empty_list() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{addr}"));
    let outcome = client.lookup_cities("Mo").await;
    assert!(matches!(outcome, LookupOutcome::Failed(ApiError::Transport(_))));
    assert!(client.fetch_cities("Mo").await.is_empty());
}

#[tokio::test]
async fn trait_lookup_goes_through_the_same_path() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"data":[{"id":"7","name":"Dubai","country":"United Arab Emirates"}]}"#,
    )
    .await;

    let lookup: Box<dyn CityLookup> = Box::new(client(base));
    let outcome = lookup.lookup("Du".to_string()).await;
    assert_eq!(
        outcome,
        LookupOutcome::Found(vec![City::new("7", "Dubai", "United Arab Emirates")])
    );
    server.await.unwrap();
}
