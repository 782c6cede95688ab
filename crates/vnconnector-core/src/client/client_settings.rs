//! Settings for the [Client](crate::Client).

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the services the client talks to and
/// how requests are sent. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use vnconnector_core::ClientSettings;
/// let settings = ClientSettings {
///     sso_url: "https://sso.vnlin.com".to_string(),
///     tracker_url: "https://tracker.vnlin.com".to_string(),
///     request_timeout_ms: 2000,
///     user_agent: "VnConnector Rust-SDK".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The SSO service hosting the session and remote database endpoints. The URL also acts as
    /// the secret shared with the SSO service for session payload encryption. Defaults to
    /// `https://sso.vnlin.com`
    pub sso_url: String,
    /// The shipment tracker service. Defaults to `https://tracker.vnlin.com`
    pub tracker_url: String,
    /// Timeout applied to every request, in milliseconds. Defaults to `2000`
    pub request_timeout_ms: u64,
    /// The user_agent to sent to the services. Defaults to `VnConnector Rust-SDK`
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            sso_url: "https://sso.vnlin.com".into(),
            tracker_url: "https://tracker.vnlin.com".into(),
            request_timeout_ms: 2000,
            user_agent: "VnConnector Rust-SDK".into(),
        }
    }
}

impl ClientSettings {
    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
