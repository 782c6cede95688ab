use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{instrument, warn};
use vnconnector_core::{http::post_json, ApiError, ServerRejectedError};

use crate::{QueryResult, RelationLink, RemoteModel, WhereFragment};

#[derive(Debug, Error)]
enum SelectError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
    #[error("Invalid query result: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    table: &'a str,
    columns: &'a str,
    link: Option<&'a [RelationLink]>,
    #[serde(flatten)]
    where_fragment: WhereFragment,
}

impl RemoteModel {
    /// Fetch the matching rows, selecting `columns` (`*` for every column).
    ///
    /// Never fails: when the request cannot be completed or the server rejects it, the result is
    /// empty.
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn select(&self, columns: &str) -> QueryResult {
        match self.query(columns).await {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, "Query failed, returning an empty result");
                QueryResult::default()
            }
        }
    }

    /// The first matching row, if any.
    pub async fn find(&self) -> Option<Value> {
        self.clone()
            .limit(1)
            .select("*")
            .await
            .rows
            .into_iter()
            .next()
    }

    async fn query(&self, columns: &str) -> Result<QueryResult, SelectError> {
        let request = QueryRequest {
            table: &self.table,
            columns,
            link: (!self.links.is_empty()).then_some(self.links.as_slice()),
            where_fragment: self.build_where(),
        };

        let config = &self.client.internal.get_api_configurations().sso;
        let payload = post_json(config, "/database/query", Some(&self.token), &request)
            .await?
            .into_payload()?;

        Ok(serde_json::from_value(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vnconnector_test::{start_api_mock, status_response, unreachable_client};
    use wiremock::{matchers, Mock, ResponseTemplate};

    use crate::{DatabaseClientExt, QueryResult, ScopeParams};

    fn query_mock() -> wiremock::MockBuilder {
        Mock::given(matchers::method("POST")).and(matchers::path("/database/query"))
    }

    #[tokio::test]
    async fn test_select() {
        let (_server, client) = start_api_mock(vec![query_mock()
            .and(matchers::header("X-Authorization", "token-1"))
            .and(matchers::header("Content-Type", "application/json"))
            .and(matchers::body_json(json!({
                "table": "ShipmentOrder",
                "columns": "id,status",
                "link": null,
                "condition": {
                    "status": { "operator": "=", "values": "delivered" },
                },
                "paginate": { "page": 2, "pageSize": 20 },
                "orderBy": "id desc",
            })))
            .respond_with(status_response(json!({
                "status": true,
                "payload": { "rows": [{ "id": 1 }, { "id": 2 }], "total": 22 },
            })))
            .expect(1)])
        .await;

        let result = client
            .database()
            .model("shipment_order", "token-1")
            .and_where("status", "=", "delivered")
            .order_by("id desc")
            .page(2, 20)
            .select("id,status")
            .await;

        assert_eq!(
            result,
            QueryResult {
                rows: vec![json!({ "id": 1 }), json!({ "id": 2 })],
                total: 22,
            }
        );
    }

    #[tokio::test]
    async fn test_select_sends_links_and_scope() {
        let (_server, client) = start_api_mock(vec![query_mock()
            .and(matchers::body_json(json!({
                "table": "Order",
                "columns": "*",
                "link": [{
                    "field": "owner",
                    "model": "User",
                    "condition": { "id": "owner_id" },
                    "fields": "*",
                    "binding": false,
                }],
                "raw": { "template": "id > ? AND zone in (?, ?)", "binding": [10, 1, 2] },
            })))
            .respond_with(status_response(json!({
                "status": 1,
                "payload": { "rows": [], "total": 0 },
            })))
            .expect(1)])
        .await;

        let scope = ScopeParams::new().with("zone", "in", vec![1, 2]);
        client
            .database()
            .scoped_model("order", "token-1", scope)
            .where_raw("id > ?", [10])
            .with("owner", "User", json!({ "id": "owner_id" }))
            .select("*")
            .await;
    }

    #[tokio::test]
    async fn test_select_rejected_returns_empty() {
        let (_server, client) = start_api_mock(vec![query_mock()
            .respond_with(status_response(json!({
                "status": false,
                "msg": "Permission denied",
                "code": 403,
            })))
            .expect(1)])
        .await;

        let result = client.database().model("order", "token-1").select("*").await;

        assert_eq!(result, QueryResult::default());
    }

    #[tokio::test]
    async fn test_select_http_error_returns_empty() {
        let (_server, client) = start_api_mock(vec![
            query_mock().respond_with(ResponseTemplate::new(500))
        ])
        .await;

        let result = client.database().model("order", "token-1").select("*").await;

        assert_eq!(result, QueryResult::default());
    }

    #[tokio::test]
    async fn test_select_transport_failure_returns_empty() {
        let result = unreachable_client()
            .database()
            .model("order", "token-1")
            .select("*")
            .await;

        assert_eq!(result.rows.len(), 0);
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn test_find() {
        let (_server, client) = start_api_mock(vec![query_mock()
            .and(matchers::body_json(json!({
                "table": "User",
                "columns": "*",
                "link": null,
                "condition": { "id": { "operator": "=", "values": 7 } },
                "paginate": { "page": 1, "pageSize": 1 },
            })))
            .respond_with(status_response(json!({
                "status": true,
                "payload": { "rows": [{ "id": 7, "name": "alice" }], "total": 1 },
            })))
            .expect(1)])
        .await;

        let model = client.database().model("user", "token-1").and_where("id", "=", 7);

        assert_eq!(
            model.find().await,
            Some(json!({ "id": 7, "name": "alice" }))
        );
        // The model itself is left without pagination.
        assert_eq!(model.build_where().paginate, None);
    }

    #[tokio::test]
    async fn test_find_nothing() {
        let (_server, client) = start_api_mock(vec![query_mock().respond_with(status_response(
            json!({ "status": true, "payload": { "rows": [], "total": 0 } }),
        ))])
        .await;

        let found = client
            .database()
            .model("user", "token-1")
            .and_where("id", "=", 7)
            .find()
            .await;

        assert_eq!(found, None);
    }
}
