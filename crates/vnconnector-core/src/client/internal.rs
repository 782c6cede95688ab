use std::sync::RwLock;

use crate::{client::ClientSettings, http::Configuration, session::SessionState};

pub struct ApiConfigurations {
    /// SSO service: session, remote database and data sync endpoints.
    pub sso: Configuration,
    /// Shipment tracker service.
    pub tracker: Configuration,
}

impl std::fmt::Debug for ApiConfigurations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfigurations")
            .field("sso", &self.sso.base_path)
            .field("tracker", &self.tracker.base_path)
            .finish()
    }
}

pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) api_configurations: ApiConfigurations,

    /// Last writer wins, there is a single session per client.
    pub(crate) session: RwLock<SessionState>,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("settings", &self.settings)
            .field("api_configurations", &self.api_configurations)
            .finish_non_exhaustive()
    }
}

impl InternalClient {
    pub fn get_api_configurations(&self) -> &ApiConfigurations {
        &self.api_configurations
    }

    pub fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }
}
