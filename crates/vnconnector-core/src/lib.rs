#![doc = include_str!("../README.md")]

pub mod client;
mod error;
pub use error::{ApiError, MissingFieldError, ServerRejectedError};
pub mod http;
pub mod session;
pub mod validation;

pub use client::{Client, ClientSettings};
