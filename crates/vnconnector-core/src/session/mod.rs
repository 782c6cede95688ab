//! SSO session state.
//!
//! A session moves through three states: unauthenticated, authenticated and expired. It becomes
//! authenticated when a payload handed back by the SSO service is decrypted, and expires lazily:
//! expiry is only evaluated when the session is read.

mod error;
pub use error::{DecryptSessionError, SessionError};
mod redirect;
mod session;
pub use session::{Session, SessionState, SessionStatus, UserInfo};
mod session_client;
pub use session_client::SessionClient;
