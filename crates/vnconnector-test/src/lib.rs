#![doc = include_str!("../README.md")]

mod api;
pub use api::{start_api_mock, status_response, unreachable_client};
