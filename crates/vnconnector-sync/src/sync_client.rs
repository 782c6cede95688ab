use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use vnconnector_core::{http::post_json, ApiError, Client, ServerRejectedError};
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::{DataSyncEvent, DataSyncEventRegistry, DataSyncHandler, DataSyncHandlerError};

/// A notification that cannot be dispatched.
#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid trigger event: {0}")]
    InvalidTriggerEvent(String),
    #[error("Invalid trigger event: no handler registered for {0}")]
    MissingHandler(DataSyncEvent),
}

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum DataSyncError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Data sync handler failed: {0}")]
    HandlerFailed(#[source] DataSyncHandlerError),
}

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
}

impl PublishError {
    /// Code reported when the request could not be completed.
    pub const TRANSPORT_CODE: i64 = 9006;
}

impl ErrorCode for PublishError {
    fn code(&self) -> i64 {
        match self {
            PublishError::Api(_) => Self::TRANSPORT_CODE,
            PublishError::ServerRejected(e) => e.code,
        }
    }
}

#[derive(Serialize)]
struct PublishRequest<'a, T: Serialize + ?Sized> {
    r#type: String,
    model: &'a str,
    params: &'a T,
}

/// Client publishing and receiving data change notifications.
///
/// Handlers live in a [DataSyncEventRegistry] shared by the clones of this client. Use
/// [DatabaseSyncClient::with_registry] to share one registry between clients publishing with
/// different tokens.
#[derive(Clone)]
pub struct DatabaseSyncClient {
    client: Client,
    token: String,
    event_registry: Arc<DataSyncEventRegistry>,
}

impl DatabaseSyncClient {
    /// Create a client publishing on behalf of the user owning `token`.
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self::with_registry(client, token, Arc::new(DataSyncEventRegistry::new()))
    }

    /// Create a client publishing with `token` and dispatching to the handlers of `registry`.
    pub fn with_registry(
        client: Client,
        token: impl Into<String>,
        event_registry: Arc<DataSyncEventRegistry>,
    ) -> Self {
        Self {
            client,
            token: token.into(),
            event_registry,
        }
    }

    /// Notify the other services that `model` changed.
    ///
    /// The event type is sent upper-cased. `endpoint` replaces the configured SSO URL for this
    /// call.
    #[instrument(skip_all, fields(event_type = %event_type, model = %model))]
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        event_type: &str,
        model: &str,
        params: &T,
        endpoint: Option<&str>,
    ) -> Result<(), PublishError> {
        let request = PublishRequest {
            r#type: event_type.to_uppercase(),
            model,
            params,
        };

        let sso = &self.client.internal.get_api_configurations().sso;
        let config = match endpoint.filter(|endpoint| !endpoint.is_empty()) {
            Some(endpoint) => sso.with_base_path(endpoint),
            None => sso.clone(),
        };

        post_json(&config, "/database/sync", Some(&self.token), &request)
            .await?
            .into_status()?;

        Ok(())
    }

    /// Register the handler of `event`, replacing the previous one.
    pub fn register_handler(&self, event: DataSyncEvent, handler: Arc<dyn DataSyncHandler>) {
        self.event_registry.register(event, handler);
    }

    /// Dispatch an inbound notification to the handler registered for its type.
    ///
    /// The type is case insensitive. Unknown types and types without a handler are rejected with
    /// a [ProtocolError].
    pub async fn handle_data_sync_event(
        &self,
        event_type: &str,
        model: &str,
        params: &Value,
    ) -> Result<(), DataSyncError> {
        self.event_registry.dispatch(event_type, model, params).await
    }
}

/// Extension trait to add `database_sync()` to [Client]
pub trait DatabaseSyncClientExt {
    /// Create a new [DatabaseSyncClient] publishing with `token`
    fn database_sync(&self, token: &str) -> DatabaseSyncClient;
}

impl DatabaseSyncClientExt for Client {
    fn database_sync(&self, token: &str) -> DatabaseSyncClient {
        DatabaseSyncClient::new(self.clone(), token)
    }
}
