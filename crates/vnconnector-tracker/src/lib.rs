#![doc = include_str!("../README.md")]

mod event;
pub use event::{TrackerEvent, TrackerValidationError};
mod tracker_client;
pub use tracker_client::{TrackerClient, TrackerClientExt, TrackerError};
