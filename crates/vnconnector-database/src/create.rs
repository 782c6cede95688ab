use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use vnconnector_core::{
    http::post_json, require, ApiError, MissingFieldError, ServerRejectedError,
};
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::{RemoteModel, WhereFragment};

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

impl CreateError {
    /// Code reported when the request could not be completed.
    pub const TRANSPORT_CODE: i64 = 9006;
}

impl ErrorCode for CreateError {
    fn code(&self) -> i64 {
        match self {
            CreateError::ServerRejected(e) => e.code,
            CreateError::Api(_) | CreateError::MissingField(_) => Self::TRANSPORT_CODE,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a, T: Serialize + ?Sized> {
    table: &'a str,
    insert: &'a T,
    return_model: bool,
    #[serde(flatten)]
    where_fragment: WhereFragment,
}

impl RemoteModel {
    /// Insert a row.
    pub async fn create<T: Serialize + ?Sized>(&self, row: &T) -> Result<(), CreateError> {
        self.insert(row, false).await.map(|_| ())
    }

    /// Insert a row, returning it as stored by the server.
    pub async fn create_returning<T: Serialize + ?Sized>(
        &self,
        row: &T,
    ) -> Result<Value, CreateError> {
        let created = self.insert(row, true).await?;
        let created = (!created.is_null()).then_some(created);
        Ok(require!(created))
    }

    #[instrument(skip_all, fields(table = %self.table))]
    async fn insert<T: Serialize + ?Sized>(
        &self,
        row: &T,
        return_model: bool,
    ) -> Result<Value, CreateError> {
        let request = CreateRequest {
            table: &self.table,
            insert: row,
            return_model,
            where_fragment: self.build_where(),
        };

        let config = &self.client.internal.get_api_configurations().sso;
        let payload = post_json(config, "/database/create", Some(&self.token), &request)
            .await?
            .into_payload()?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vnconnector_error::{ErrorCode, FlatError};
    use vnconnector_test::{start_api_mock, status_response, unreachable_client};
    use wiremock::{matchers, Mock};

    use super::*;
    use crate::DatabaseClientExt;

    fn create_mock() -> wiremock::MockBuilder {
        Mock::given(matchers::method("POST")).and(matchers::path("/database/create"))
    }

    #[tokio::test]
    async fn test_create() {
        let (_server, client) = start_api_mock(vec![create_mock()
            .and(matchers::header("X-Authorization", "token-1"))
            .and(matchers::body_json(json!({
                "table": "ShipmentOrder",
                "insert": { "number": "VN001", "weight": 2.5 },
                "returnModel": false,
                "condition": {},
            })))
            .respond_with(status_response(json!({ "status": true, "payload": true })))
            .expect(1)])
        .await;

        client
            .database()
            .model("shipment_order", "token-1")
            .create(&json!({ "number": "VN001", "weight": 2.5 }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_returning() {
        #[derive(Serialize)]
        struct NewOrder {
            number: &'static str,
        }

        let (_server, client) = start_api_mock(vec![create_mock()
            .and(matchers::body_json(json!({
                "table": "ShipmentOrder",
                "insert": { "number": "VN001" },
                "returnModel": true,
                "condition": {},
            })))
            .respond_with(status_response(json!({
                "status": true,
                "payload": { "id": 12, "number": "VN001" },
            })))
            .expect(1)])
        .await;

        let created = client
            .database()
            .model("shipment_order", "token-1")
            .create_returning(&NewOrder { number: "VN001" })
            .await
            .unwrap();

        assert_eq!(created, json!({ "id": 12, "number": "VN001" }));
    }

    #[tokio::test]
    async fn test_create_returning_without_payload() {
        let (_server, client) = start_api_mock(vec![
            create_mock().respond_with(status_response(json!({ "status": true })))
        ])
        .await;

        let error = client
            .database()
            .model("order", "token-1")
            .create_returning(&json!({}))
            .await
            .unwrap_err();

        assert!(matches!(error, CreateError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_create_rejected() {
        let (_server, client) = start_api_mock(vec![create_mock().respond_with(
            status_response(json!({ "status": false, "msg": "Duplicate number", "code": 2001 })),
        )])
        .await;

        let error = client
            .database()
            .model("order", "token-1")
            .create(&json!({ "number": "VN001" }))
            .await
            .unwrap_err();

        assert_eq!(error.error_variant(), "ServerRejected");
        assert_eq!(error.code(), 2001);
        assert_eq!(
            error.to_string(),
            "The server rejected the request: [2001] Duplicate number"
        );
    }

    #[tokio::test]
    async fn test_create_transport_failure() {
        let error = unreachable_client()
            .database()
            .model("order", "token-1")
            .create(&json!({ "number": "VN001" }))
            .await
            .unwrap_err();

        assert_eq!(error.error_variant(), "Api");
        assert_eq!(error.code(), CreateError::TRANSPORT_CODE);
        assert_eq!(error.code(), 9006);
    }
}
