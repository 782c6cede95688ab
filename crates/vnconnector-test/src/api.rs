use vnconnector_core::{Client, ClientSettings};

/// Helper for testing the remote services using wiremock.
///
/// Both the SSO and the tracker service of the returned [Client] point at the mock server.
///
/// Warning: when using `Mock::expected` ensure `server` is not dropped before the test completes,
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, Client) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let client = Client::new(Some(ClientSettings {
        sso_url: server.uri(),
        tracker_url: server.uri(),
        request_timeout_ms: 500,
        user_agent: "VnConnector Rust-SDK [TEST]".to_string(),
    }));

    (server, client)
}

/// A client whose services cannot be reached, every request fails at the transport level.
pub fn unreachable_client() -> Client {
    Client::new(Some(ClientSettings {
        sso_url: "http://127.0.0.1:9".to_string(),
        tracker_url: "http://127.0.0.1:9".to_string(),
        request_timeout_ms: 200,
        user_agent: "VnConnector Rust-SDK [TEST]".to_string(),
    }))
}

/// A `200 OK` response carrying a status envelope.
pub fn status_response(body: serde_json::Value) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200).set_body_json(body)
}
