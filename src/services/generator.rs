use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::{Result, SubmitError};
use crate::models::{ErrorBody, GenerateRequest, GenerationResult};

pub struct GenerationClient {
    client: Client,
    endpoint: Url,
}

impl GenerationClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("postsmith/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one generation request for `video_url`.
    ///
    /// Any non-2xx status is an application failure whatever the body looks
    /// like; the body only contributes its `error` message when it has one.
    pub async fn generate(&self, video_url: &str) -> std::result::Result<GenerationResult, SubmitError> {
        let request = GenerateRequest {
            video_url: video_url.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            tracing::debug!("Generation endpoint returned {}", status);
            // The status alone decides; an unreadable body just means no message
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Application(ErrorBody::parse(&body).message()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Unreadable generation response: {}", e);
            SubmitError::Transport(format!("malformed response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERATION_FAILED_MESSAGE;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LINK: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn client_for(server: &MockServer) -> GenerationClient {
        let endpoint = Url::parse(&server.uri()).unwrap().join("/generate").unwrap();
        GenerationClient::new(endpoint, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn posts_link_and_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "video_url": LINK })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "blog_post": { "title": "Title", "content": "Body", "tags": ["a", "b"] },
                "instagram_post": { "caption": "Caption", "hashtags": ["#x"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = assert_ok!(client_for(&server).generate(LINK).await);

        assert_eq!(result.blog_post.title, "Title");
        assert_eq!(result.blog_post.tags, vec!["a", "b"]);
        assert_eq!(result.instagram_post.hashtags, vec!["#x"]);
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "quota exceeded" })))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert_eq!(err, SubmitError::Application(Some("quota exceeded".to_string())));
    }

    #[tokio::test]
    async fn blank_server_message_falls_back_to_generic_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "" })))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert_eq!(err, SubmitError::Application(None));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn numeric_server_message_is_shown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": 123 })))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert_eq!(err.user_message(), "123");
    }

    #[tokio::test]
    async fn error_status_with_unreadable_body_has_no_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert_eq!(err, SubmitError::Application(None));
    }

    #[tokio::test]
    async fn error_status_with_truncated_body_is_still_an_application_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            // Promise more body than is sent, then hang up
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"err")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let endpoint = Url::parse(&format!("http://127.0.0.1:{port}/generate")).unwrap();
        let client = GenerationClient::new(endpoint, Some(Duration::from_secs(5))).unwrap();

        let err = assert_err!(client.generate(LINK).await);
        assert_eq!(err, SubmitError::Application(None));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn error_status_wins_over_result_shaped_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "blog_post": { "title": "T", "content": "C", "tags": [] },
                "instagram_post": { "caption": "C", "hashtags": [] }
            })))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert_eq!(err, SubmitError::Application(None));
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "blog_post": {} })))
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).generate(LINK).await);
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let endpoint = Url::parse(&format!("http://127.0.0.1:{port}/generate")).unwrap();
        let client = GenerationClient::new(endpoint, Some(Duration::from_secs(5))).unwrap();

        let err = assert_err!(client.generate(LINK).await);
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
