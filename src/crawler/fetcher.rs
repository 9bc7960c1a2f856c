//! HTTP page fetcher
//!
//! One network round trip per call, with error classification. Retry
//! policy, if any, belongs to the coordinator; this crawler deliberately
//! has none.

use crate::config::UserAgentConfig;
use crate::url::CrawlUrl;
use reqwest::Client;
use std::time::Duration;

/// Result of a single fetch attempt
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response with its body read to completion
    Success {
        /// HTTP status code
        status: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Decoded body text
        body: String,
    },

    /// Non-2xx response
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// Connection failure, timeout, or DNS failure
    TransportError {
        /// Error description
        cause: String,
    },
}

/// Builds the HTTP client shared by the whole crawl run
///
/// Every request carries the identifying user-agent header, and both the
/// connect and overall request timeouts are bounded so no fetch blocks
/// indefinitely; an elapsed timeout surfaces as a `TransportError`.
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.user_agent_string())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single attempt and classifies the outcome
pub async fn fetch_page(client: &Client, url: &CrawlUrl) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(r) => r,
        Err(e) => return FetchResult::TransportError { cause: classify(&e) },
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => FetchResult::TransportError { cause: classify(&e) },
    }
}

/// Returns true if a Content-Type header value indicates an HTML document
pub fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}

/// Maps a reqwest error to a short human-readable cause
fn classify(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: String::new(),
        }
    }

    fn client() -> Client {
        build_http_client(&test_agent(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_agent(), Duration::from_secs(30)).is_ok());
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
        assert!(!is_html(""));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let url = CrawlUrl::parse(&format!("{}/page", server.uri())).unwrap();
        match fetch_page(&client(), &url).await {
            FetchResult::Success {
                status,
                content_type,
                body,
            } => {
                assert_eq!(status, 200);
                assert_eq!(content_type, "text/html");
                assert_eq!(body, "<html></html>");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_identifying_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestBot/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = CrawlUrl::parse(&format!("{}/page", server.uri())).unwrap();
        fetch_page(&client(), &url).await;
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = CrawlUrl::parse(&format!("{}/missing", server.uri())).unwrap();
        match fetch_page(&client(), &url).await {
            FetchResult::HttpError { status } => assert_eq!(status, 404),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let url = CrawlUrl::parse("http://127.0.0.1:1/unreachable").unwrap();
        match fetch_page(&client(), &url).await {
            FetchResult::TransportError { .. } => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
