//! Tests for quote providers.

use cryptoquote::{
    GameConfig, HttpQuoteProvider, ProviderError, QuoteProvider, StaticQuoteProvider,
};
use cryptoquote_core::Category;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const QUOTES_JSON: &str = r#"[{"author":"Yoda","category":"movies","quote":"Do or do not."}]"#;

/// Serves canned HTTP responses in order, repeating the last one.
/// Returns the base URL and a counter of requests served.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let (status, body) = responses[n.min(responses.len() - 1)];

            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}/api/quotes", addr), hits)
}

fn config_for(url: &str, attempts: u32) -> GameConfig {
    let toml = format!(
        "quote_api_url = \"{}\"\nfetch_attempts = {}\nretry_backoff_ms = 1\nrequest_timeout_ms = 2000",
        url, attempts
    );
    GameConfig::from_toml(&toml).expect("Invalid test config")
}

#[tokio::test]
async fn test_http_provider_returns_first_quote() {
    let (url, hits) = serve(vec![(200, QUOTES_JSON)]).await;
    let provider = HttpQuoteProvider::new(config_for(&url, 3)).expect("client");

    let quote = provider.fetch().await.expect("fetch failed");
    assert_eq!(quote.author, "Yoda");
    assert_eq!(quote.category, Category::Movies);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_http_provider_retries_server_errors() {
    let (url, hits) = serve(vec![(503, "busy"), (500, "oops"), (200, QUOTES_JSON)]).await;
    let provider = HttpQuoteProvider::new(config_for(&url, 3)).expect("client");

    let quote = provider.fetch().await.expect("fetch failed");
    assert_eq!(quote.quote, "Do or do not.");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_http_provider_gives_up_after_attempts() {
    let (url, hits) = serve(vec![(503, "busy")]).await;
    let provider = HttpQuoteProvider::new(config_for(&url, 2)).expect("client");

    assert_eq!(provider.fetch().await, Err(ProviderError::Status(503)));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_http_provider_does_not_retry_empty_list() {
    let (url, hits) = serve(vec![(200, "[]")]).await;
    let provider = HttpQuoteProvider::new(config_for(&url, 3)).expect("client");

    assert_eq!(provider.fetch().await, Err(ProviderError::Empty));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_static_provider_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("quotes.toml");
    std::fs::write(
        &path,
        r#"
[[quotes]]
author = "Yoda"
category = "movies"
quote = "Do or do not."

[[quotes]]
author = "Mae West"
category = "famous"
quote = "Too much of a good thing can be wonderful."
"#,
    )
    .expect("Failed to write quotes");

    let provider = StaticQuoteProvider::from_file(&path).expect("Failed to load quotes");
    assert_eq!(provider.quotes().len(), 2);

    let quote = provider.fetch().await.expect("fetch failed");
    assert!(provider.quotes().contains(&quote));
}

#[tokio::test]
async fn test_static_provider_rejects_empty_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("quotes.toml");
    std::fs::write(&path, "").expect("Failed to write quotes");

    assert!(matches!(
        StaticQuoteProvider::from_file(&path),
        Err(ProviderError::Empty)
    ));
}

#[test]
fn test_static_provider_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(matches!(
        StaticQuoteProvider::from_file(dir.path().join("nope.toml")),
        Err(ProviderError::Io(_))
    ));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_quote_api() {
    dotenvy::dotenv().ok();
    let config = GameConfig::default().with_env_overrides();
    let provider = HttpQuoteProvider::new(config).expect("client");

    let quote = provider.fetch().await.expect("Failed to fetch");
    assert!(!quote.is_blank());
    eprintln!("Quote: {} - {}", quote.quote, quote.author);
}
