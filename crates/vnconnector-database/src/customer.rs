use md5::{Digest, Md5};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::DatabaseClient;

/// Reasons for refusing a customer application.
#[vnconnector_error(flat)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerVerificationError {
    /// No customer is registered under the application id.
    #[error("Unknown application: {0}")]
    NotFound(String),
    /// The signature does not match the application secret.
    #[error("Invalid application signature")]
    SignatureMismatch,
    /// The request does not come from an address allowed for the application.
    #[error("Address not allowed: {0}")]
    IpNotAllowed(String),
}

impl ErrorCode for CustomerVerificationError {
    fn code(&self) -> i64 {
        match self {
            CustomerVerificationError::SignatureMismatch => -1,
            CustomerVerificationError::NotFound(_) => -2,
            CustomerVerificationError::IpNotAllowed(_) => -3,
        }
    }
}

impl DatabaseClient {
    /// Check a request signed by a customer application, returning the customer row.
    ///
    /// `app_sign` must be the lowercase hex MD5 of the application id followed by its secret.
    /// When the customer has an `ip_list`, `remote_ip` must be part of it.
    #[instrument(skip_all, fields(app_id = %app_id))]
    pub async fn verify_customer(
        &self,
        app_id: &str,
        app_sign: &str,
        remote_ip: &str,
    ) -> Result<Value, CustomerVerificationError> {
        let customer = self
            .model("sso_customer", "")
            .and_where("app_id", "=", app_id)
            .find()
            .await
            .ok_or_else(|| CustomerVerificationError::NotFound(app_id.to_owned()))?;

        let secret = customer.get("app_secret").map(text).unwrap_or_default();
        let expected = hex::encode(Md5::digest(format!("{app_id}{secret}")));
        if expected != app_sign {
            return Err(CustomerVerificationError::SignatureMismatch);
        }

        if let Some(allowed) = customer.get("ip_list").and_then(allowed_addresses) {
            if !allowed.iter().any(|ip| ip == remote_ip) {
                debug!(remote_ip, "Address is not in the customer's ip list");
                return Err(CustomerVerificationError::IpNotAllowed(remote_ip.to_owned()));
            }
        }

        Ok(customer)
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The addresses of an `ip_list` column, stored as a JSON encoded list. Anything else places no
/// restriction.
fn allowed_addresses(ip_list: &Value) -> Option<Vec<String>> {
    let decoded = match ip_list {
        Value::String(s) => serde_json::from_str(s).ok()?,
        other => other.clone(),
    };

    match decoded {
        Value::Array(items) => Some(items.iter().map(text).collect()),
        Value::Object(items) => Some(items.values().map(text).collect()),
        _ => None,
    }
}
