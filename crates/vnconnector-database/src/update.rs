use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use vnconnector_core::{http::post_json, ApiError, ServerRejectedError};
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::{RemoteModel, WhereFragment};

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
}

impl UpdateError {
    /// Code reported when the request could not be completed.
    pub const TRANSPORT_CODE: i64 = 9005;
}

impl ErrorCode for UpdateError {
    fn code(&self) -> i64 {
        match self {
            UpdateError::Api(_) => Self::TRANSPORT_CODE,
            UpdateError::ServerRejected(e) => e.code,
        }
    }
}

#[derive(Serialize)]
struct UpdateRequest<'a, T: Serialize + ?Sized> {
    table: &'a str,
    update: &'a T,
    #[serde(flatten)]
    where_fragment: WhereFragment,
}

impl RemoteModel {
    /// Set the given columns on every matching row.
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn update<T: Serialize + ?Sized>(&self, changes: &T) -> Result<(), UpdateError> {
        let request = UpdateRequest {
            table: &self.table,
            update: changes,
            where_fragment: self.build_where(),
        };

        let config = &self.client.internal.get_api_configurations().sso;
        post_json(config, "/database/update", Some(&self.token), &request)
            .await?
            .into_status()?;

        Ok(())
    }
}
