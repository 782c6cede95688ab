//! Handlers for inbound data change notifications.

use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::{Arc, RwLock},
};

use serde_json::Value;
use tracing::debug;

use crate::{DataSyncError, ProtocolError};

/// Type alias for data sync handler error results
pub type DataSyncHandlerError = Box<dyn std::error::Error + Send + Sync>;

/// The kind of change a notification reports.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSyncEvent {
    Create,
    Update,
    Delete,
}

impl DataSyncEvent {
    /// Lowercase name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSyncEvent::Create => "create",
            DataSyncEvent::Update => "update",
            DataSyncEvent::Delete => "delete",
        }
    }
}

impl fmt::Display for DataSyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSyncEvent {
    type Err = ProtocolError;

    /// Event names are case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(DataSyncEvent::Create),
            "update" => Ok(DataSyncEvent::Update),
            "delete" => Ok(DataSyncEvent::Delete),
            _ => Err(ProtocolError::InvalidTriggerEvent(s.to_owned())),
        }
    }
}

/// Trait for handling data change notifications
///
/// A handler is registered for one [DataSyncEvent] and receives the name of the changed model
/// together with the changed data.
#[async_trait::async_trait]
pub trait DataSyncHandler: Send + Sync {
    #[allow(missing_docs)]
    async fn on_data_sync(&self, model: &str, params: &Value) -> Result<(), DataSyncHandlerError>;
}

/// Registry holding at most one handler per event.
pub struct DataSyncEventRegistry {
    handlers: RwLock<HashMap<DataSyncEvent, Arc<dyn DataSyncHandler>>>,
}

impl DataSyncEventRegistry {
    /// Create a new empty event registry
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register the handler of `event`, replacing the previous one.
    pub fn register(&self, event: DataSyncEvent, handler: Arc<dyn DataSyncHandler>) {
        self.handlers
            .write()
            .expect("Handler registry lock poisoned")
            .insert(event, handler);
    }

    /// Parse an inbound notification type and call its handler.
    ///
    /// The type is case insensitive. Unknown types and types without a handler are rejected with
    /// a [ProtocolError].
    pub async fn dispatch(
        &self,
        event_type: &str,
        model: &str,
        params: &Value,
    ) -> Result<(), DataSyncError> {
        let event: DataSyncEvent = event_type.parse()?;
        debug!(%event, model, "Dispatching data sync event");

        self.trigger(event, model, params).await
    }

    /// Call the handler of `event`.
    pub async fn trigger(
        &self,
        event: DataSyncEvent,
        model: &str,
        params: &Value,
    ) -> Result<(), DataSyncError> {
        let handler = self
            .handlers
            .read()
            .expect("Handler registry lock poisoned")
            .get(&event)
            .cloned()
            .ok_or(ProtocolError::MissingHandler(event))?;

        handler
            .on_data_sync(model, params)
            .await
            .map_err(DataSyncError::HandlerFailed)
    }
}

impl fmt::Debug for DataSyncEventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self
            .handlers
            .read()
            .expect("Handler registry lock poisoned");
        f.debug_struct("DataSyncEventRegistry")
            .field("events", &handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for DataSyncEventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
