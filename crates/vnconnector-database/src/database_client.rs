use vnconnector_core::Client;

use crate::{RemoteModel, ScopeParams};

/// Access to the remote database of the SSO service.
pub struct DatabaseClient {
    pub(crate) client: Client,
}

impl DatabaseClient {
    fn new(client: Client) -> Self {
        Self { client }
    }

    /// A model of the remote table `name`, queried on behalf of the user owning `token`.
    ///
    /// `name` may be given in `snake_case`, see [normalize_model_name](crate::normalize_model_name).
    pub fn model(&self, name: &str, token: impl Into<String>) -> RemoteModel {
        self.scoped_model(name, token, ScopeParams::default())
    }

    /// Like [Self::model], with ambient parameters merged into every request.
    pub fn scoped_model(
        &self,
        name: &str,
        token: impl Into<String>,
        scope: ScopeParams,
    ) -> RemoteModel {
        RemoteModel::new(self.client.clone(), name, token.into(), scope)
    }
}

#[allow(missing_docs)]
pub trait DatabaseClientExt {
    fn database(&self) -> DatabaseClient;
}

impl DatabaseClientExt for Client {
    fn database(&self) -> DatabaseClient {
        DatabaseClient::new(self.clone())
    }
}
