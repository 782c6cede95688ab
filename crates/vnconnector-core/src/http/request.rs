use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::debug;

use crate::{http::Configuration, http::ResponseEnvelope, ApiError};

/// Header carrying the caller's SSO token.
pub const AUTHORIZATION_HEADER: &str = "X-Authorization";

/// POST `body` as JSON to `path` and parse the response envelope.
///
/// The `status` flag of the envelope is not checked, callers apply the failure policy of their
/// call family.
pub async fn post_json<B: Serialize + ?Sized>(
    config: &Configuration,
    path: &str,
    token: Option<&str>,
    body: &B,
) -> Result<ResponseEnvelope, ApiError> {
    let url = config.url(path);
    debug!(%url, "Sending request");

    let mut request = config
        .client
        .post(url)
        .header(CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        request = request.header(AUTHORIZATION_HEADER, token);
    }

    let response = request.body(serde_json::to_string(body)?).send().await?;

    let text = read_success_body(response).await?;
    Ok(serde_json::from_str(&text)?)
}

/// GET `path` and return the raw response body.
pub async fn get_text(
    config: &Configuration,
    path: &str,
    token: Option<&str>,
) -> Result<String, ApiError> {
    let url = config.url(path);
    debug!(%url, "Sending request");

    let mut request = config.client.get(url);

    if let Some(token) = token {
        request = request.header(AUTHORIZATION_HEADER, token);
    }

    let response = request.send().await?;

    read_success_body(response).await
}

async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::ResponseContent {
            status,
            message: text,
        });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn start(mock: Mock) -> (MockServer, Configuration) {
        let server = MockServer::start().await;
        server.register(mock).await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let config = Configuration {
            base_path: server.uri(),
            client: client.into(),
        };

        (server, config)
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/database/query"))
            .and(matchers::header("X-Authorization", "token-1"))
            .and(matchers::header("Content-Type", "application/json"))
            .and(matchers::body_json(json!({ "table": "User" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": true, "payload": 1 })),
            )
            .expect(1);

        let (_server, config) = start(mock).await;

        let envelope = post_json(
            &config,
            "/database/query",
            Some("token-1"),
            &json!({ "table": "User" }),
        )
        .await
        .unwrap();

        assert!(envelope.status);
        assert_eq!(envelope.payload, json!(1));
    }

    #[tokio::test]
    async fn test_post_json_http_error_is_transport_failure() {
        let mock = Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"));

        let (_server, config) = start(mock).await;

        let result = post_json(&config, "/database/update", None, &json!({})).await;

        match result {
            Err(ApiError::ResponseContent { status, message }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected ResponseContent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_json_timeout() {
        let mock = Mock::given(matchers::method("POST")).respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": true }))
                .set_delay(Duration::from_secs(2)),
        );

        let (_server, config) = start(mock).await;

        let error = post_json(&config, "/database/delete", None, &json!({}))
            .await
            .unwrap_err();

        assert!(error.is_timeout());
    }

    #[tokio::test]
    async fn test_get_text_returns_raw_body() {
        let mock = Mock::given(matchers::method("GET"))
            .and(matchers::path("/session/current"))
            .and(matchers::header("X-Authorization", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("opaque-blob"));

        let (_server, config) = start(mock).await;

        let body = get_text(&config, "/session/current", Some("abc"))
            .await
            .unwrap();

        assert_eq!(body, "opaque-blob");
    }
}
