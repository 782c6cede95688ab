#![doc = include_str!("../README.md")]

mod events;
mod sync_client;

pub use events::{DataSyncEvent, DataSyncEventRegistry, DataSyncHandler, DataSyncHandlerError};
pub use sync_client::{
    DataSyncError, DatabaseSyncClient, DatabaseSyncClientExt, ProtocolError, PublishError,
};
