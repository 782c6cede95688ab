use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ServerRejectedError;

/// The response body returned by every endpoint.
///
/// `status` follows loose truthiness (see [is_truthy]), the services are not consistent about
/// sending a real boolean. The message is read from `msg`, or from `message` for the tracker
/// service. Some endpoints send both, `msg` is preferred.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ResponseEnvelope {
    /// Whether the server accepted the request.
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub status: bool,
    /// Operation result, `null` when absent.
    #[serde(default)]
    pub payload: Value,
    /// Server message, `null` when absent.
    #[serde(default)]
    pub msg: Value,
    /// Server message as sent by the tracker service, `null` when absent.
    #[serde(default)]
    pub message: Value,
    /// Server error code, `null` when absent.
    #[serde(default)]
    pub code: Value,
}

impl ResponseEnvelope {
    /// The server message as text.
    pub fn message(&self) -> String {
        let message = match &self.msg {
            Value::Null => &self.message,
            msg => msg,
        };
        match message {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The server code, `0` when absent or not numeric.
    pub fn code(&self) -> i64 {
        match &self.code {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    /// The rejection described by this envelope.
    pub fn rejection(&self) -> ServerRejectedError {
        ServerRejectedError {
            message: self.message(),
            code: self.code(),
        }
    }

    /// Check the status flag, returning the payload on success.
    pub fn into_payload(self) -> Result<Value, ServerRejectedError> {
        if self.status {
            Ok(self.payload)
        } else {
            Err(self.rejection())
        }
    }

    /// Check the status flag, discarding the payload.
    pub fn into_status(self) -> Result<(), ServerRejectedError> {
        self.into_payload().map(|_| ())
    }
}

/// Loose truthiness of a JSON value: `false`, `0`, `""`, `"0"`, `null`, `[]` and `{}` are falsy,
/// everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| is_truthy(&v))
}
