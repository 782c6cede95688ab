use std::sync::{Arc, RwLock};

use reqwest::header::{self, HeaderValue};

use super::internal::InternalClient;
use crate::{
    client::{client_settings::ClientSettings, internal::ApiConfigurations},
    http::Configuration,
    session::SessionState,
};

/// The main struct to interact with the VnConnector SDK.
///
/// A [Client] is the context object of the SDK: it owns the HTTP stack and the current SSO
/// session. Create one at startup and hand clones of it to request handlers.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance. Any mutable state needs to be behind an Arc, ideally as
    // part of the existing [`InternalClient`] struct.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new VnConnector client.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .default_headers(build_default_headers(&settings))
            .timeout(settings.request_timeout())
            .build()
            .expect("HTTP Client build should not fail");

        let http_client = reqwest_middleware::ClientBuilder::new(http_client).build();

        let sso = Configuration {
            base_path: settings.sso_url.clone(),
            client: http_client.clone(),
        };

        let tracker = Configuration {
            base_path: settings.tracker_url.clone(),
            client: http_client,
        };

        Self {
            internal: Arc::new(InternalClient {
                api_configurations: ApiConfigurations { sso, tracker },
                session: RwLock::new(SessionState::Unauthenticated),
                settings,
            }),
        }
    }
}

/// Build default headers for the HTTP client
fn build_default_headers(settings: &ClientSettings) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    headers.append(header::ACCEPT, HeaderValue::from_static("application/json"));

    headers.append(
        header::USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .expect("User agent should be a valid header value"),
    );

    headers
}
