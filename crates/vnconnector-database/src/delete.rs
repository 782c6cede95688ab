use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use vnconnector_core::{http::post_json, ApiError, ServerRejectedError};
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::{RemoteModel, WhereFragment};

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
}

impl DeleteError {
    /// Code reported when the request could not be completed.
    pub const TRANSPORT_CODE: i64 = 9007;
}

impl ErrorCode for DeleteError {
    fn code(&self) -> i64 {
        match self {
            DeleteError::Api(_) => Self::TRANSPORT_CODE,
            DeleteError::ServerRejected(e) => e.code,
        }
    }
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    table: &'a str,
    #[serde(flatten)]
    where_fragment: WhereFragment,
}

impl RemoteModel {
    /// Delete every matching row.
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn delete(&self) -> Result<(), DeleteError> {
        let request = DeleteRequest {
            table: &self.table,
            where_fragment: self.build_where(),
        };

        let config = &self.client.internal.get_api_configurations().sso;
        post_json(config, "/database/delete", Some(&self.token), &request)
            .await?
            .into_status()?;

        Ok(())
    }
}
