use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use vnconnector_crypto::SessionCipher;

use crate::{
    http::{get_text, post_json},
    session::{
        redirect::render_redirect_page, DecryptSessionError, Session, SessionError, SessionState,
        SessionStatus, UserInfo,
    },
    Client,
};

/// Access to the SSO session of a [Client].
pub struct SessionClient {
    client: Client,
}

impl SessionClient {
    fn new(client: Client) -> Self {
        Self { client }
    }

    /// The state of the session right now.
    pub fn status(&self) -> SessionStatus {
        self.read_state().status_at(Utc::now())
    }

    /// Succeeds only when a session is established and has not expired.
    pub fn check_login(&self) -> Result<(), SessionError> {
        self.with_session(|_| ())
    }

    /// The token of the current session.
    pub fn token(&self) -> Result<String, SessionError> {
        self.with_session(|session| session.token.clone())
    }

    /// The user of the current session, with its rules and departments.
    pub fn user_info(&self) -> Result<UserInfo, SessionError> {
        self.with_session(|session| UserInfo::from(session))
    }

    /// Establish a session from the encrypted payload handed back by the SSO service.
    ///
    /// On failure the current session is left untouched.
    pub fn decrypt(&self, payload: &str) -> Result<(), DecryptSessionError> {
        let settings = self.client.internal.get_settings();
        let plaintext = SessionCipher::from_secret(&settings.sso_url).decrypt(payload)?;
        let session = Session::from_payload(&plaintext, Utc::now())?;

        info!(expires_at = %session.expires_at, "SSO session established");

        *self
            .client
            .internal
            .session
            .write()
            .expect("RwLock is not poisoned") = SessionState::Authenticated(session);

        Ok(())
    }

    /// Fetch the session identified by `token` from the SSO service and establish it.
    ///
    /// Failures are logged and otherwise ignored, the current session is then left untouched.
    #[instrument(skip_all)]
    pub async fn refresh(&self, token: &str) {
        let config = &self.client.internal.get_api_configurations().sso;

        match get_text(config, "/session/current", Some(token)).await {
            Ok(payload) => {
                if let Err(e) = self.decrypt(&payload) {
                    warn!("Failed to decrypt refreshed session: {e}");
                }
            }
            Err(e) => warn!("Failed to fetch the current session: {e}"),
        }
    }

    /// Ask the SSO service to invalidate `token`.
    ///
    /// This is fire-and-forget, and the local session is not cleared: callers that log out the
    /// current user should drop their [Client] or stop using its session.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) {
        let config = &self.client.internal.get_api_configurations().sso;

        if let Err(e) = post_json(config, "/session/token", None, &json!({ "token": token })).await
        {
            debug!("Logout request failed: {e}");
        }
    }

    /// Render the HTML page sending the browser to the SSO login form.
    ///
    /// After login the SSO service posts the session to
    /// `https://{host}{callback_url}/session/login`.
    pub fn redirect(&self, host: &str, callback_url: &str, role: &str) -> String {
        let settings = self.client.internal.get_settings();
        let callback = format!("https://{host}{callback_url}");

        render_redirect_page(&settings.sso_url, &callback, role)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.client
            .internal
            .session
            .read()
            .expect("RwLock is not poisoned")
    }

    fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> Result<T, SessionError> {
        let state = self.read_state();
        state.session_at(Utc::now()).map(f)
    }
}

impl Client {
    /// Access the SSO session.
    pub fn session(&self) -> SessionClient {
        SessionClient::new(self.clone())
    }
}
