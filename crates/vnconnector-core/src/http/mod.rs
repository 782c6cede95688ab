//! The JSON request protocol shared by every remote call.
//!
//! Every endpoint accepts a JSON body and answers with a [ResponseEnvelope]. Whether the call
//! succeeded is decided by the envelope's `status` flag, not by the HTTP status code: a non-success
//! HTTP status is treated as a transport failure.

mod configuration;
pub use configuration::Configuration;
mod envelope;
pub use envelope::{is_truthy, ResponseEnvelope};
mod request;
pub use request::{get_text, post_json, AUTHORIZATION_HEADER};
mod util;
pub use util::encode_path_segment;
