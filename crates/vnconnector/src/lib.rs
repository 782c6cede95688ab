#![doc = include_str!("../README.md")]

use std::sync::Arc;

use serde_json::Value;
use vnconnector_database::DatabaseClientExt as _;
use vnconnector_sync::{DataSyncError, DataSyncEvent, DataSyncEventRegistry, DataSyncHandler};
use vnconnector_tracker::TrackerClientExt as _;

pub use vnconnector_core::{
    session, validation, ApiError, Client, ClientSettings, MissingFieldError, ServerRejectedError,
};
pub use vnconnector_error::{ErrorCode, FlatError};

/// Re-export subclients for easier access
pub mod clients {
    pub use vnconnector_core::session::SessionClient;
    pub use vnconnector_database::DatabaseClient;
    pub use vnconnector_sync::DatabaseSyncClient;
    pub use vnconnector_tracker::TrackerClient;
}

/// Remote models and their errors.
pub mod database {
    pub use vnconnector_database::*;
}

/// Data change notifications.
pub mod sync {
    pub use vnconnector_sync::*;
}

/// Shipment tracking.
pub mod tracker {
    pub use vnconnector_tracker::*;
}

/// The session cipher.
pub mod crypto {
    pub use vnconnector_crypto::*;
}

/// The main entry point for the VnConnector SDK
///
/// Clones share the HTTP client, the session and the data sync handlers.
#[derive(Debug, Clone)]
pub struct VnConnectorClient {
    client: Client,
    data_sync_handlers: Arc<DataSyncEventRegistry>,
}

impl VnConnectorClient {
    /// Initialize a new instance of the SDK client
    pub fn new(settings: Option<ClientSettings>) -> Self {
        Self::from(Client::new(settings))
    }

    /// The underlying client context.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// SSO session operations
    pub fn session(&self) -> clients::SessionClient {
        self.client.session()
    }

    /// Remote database operations
    pub fn database(&self) -> clients::DatabaseClient {
        self.client.database()
    }

    /// Data change notifications, published with `token`.
    ///
    /// Every returned client dispatches to the handlers registered on this client.
    pub fn database_sync(&self, token: &str) -> clients::DatabaseSyncClient {
        clients::DatabaseSyncClient::with_registry(
            self.client.clone(),
            token,
            self.data_sync_handlers.clone(),
        )
    }

    /// Register the handler of `event`, replacing the previous one.
    pub fn register_data_sync_handler(
        &self,
        event: DataSyncEvent,
        handler: Arc<dyn DataSyncHandler>,
    ) {
        self.data_sync_handlers.register(event, handler);
    }

    /// Dispatch an inbound notification. No publish token is needed.
    pub async fn handle_data_sync_event(
        &self,
        event_type: &str,
        model: &str,
        params: &Value,
    ) -> Result<(), DataSyncError> {
        self.data_sync_handlers
            .dispatch(event_type, model, params)
            .await
    }

    /// Shipment tracker operations
    pub fn tracker(&self) -> clients::TrackerClient {
        self.client.tracker()
    }
}

impl From<Client> for VnConnectorClient {
    fn from(client: Client) -> Self {
        Self {
            client,
            data_sync_handlers: Arc::new(DataSyncEventRegistry::new()),
        }
    }
}
