use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use vnconnector_core::{
    http::{encode_path_segment, post_json, Configuration},
    ApiError, Client, ServerRejectedError,
};
use vnconnector_error::vnconnector_error;

use crate::{event::TrackerRecord, TrackerEvent, TrackerValidationError};

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] TrackerValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ServerRejected(#[from] ServerRejectedError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkTrackerRequest<'a> {
    shipment_number: &'a [String],
    trace: TrackerRecord<'a>,
}

/// Client of the shipment tracker service.
pub struct TrackerClient {
    client: Client,
    endpoint: Option<String>,
}

impl TrackerClient {
    fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: None,
        }
    }

    /// Send the requests of this client to `endpoint` instead of the configured tracker URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add `event` to the history of one shipment.
    #[instrument(skip_all, fields(shipment_number = %shipment_number))]
    pub async fn create_tracker(
        &self,
        shipment_number: &str,
        event: &TrackerEvent,
    ) -> Result<(), TrackerError> {
        let record = event.record(Some(shipment_number))?;

        post_json(
            &self.config(),
            &format!(
                "/tracker/{}/upgrade",
                encode_path_segment(shipment_number)
            ),
            None,
            &record,
        )
        .await?
        .into_status()?;

        Ok(())
    }

    /// Add `event` to the history of several shipments at once.
    #[instrument(skip_all, fields(shipments = shipment_numbers.len()))]
    pub async fn create_all_trackers(
        &self,
        shipment_numbers: &[String],
        event: &TrackerEvent,
    ) -> Result<(), TrackerError> {
        let request = BulkTrackerRequest {
            shipment_number: shipment_numbers,
            trace: event.record(None)?,
        };

        post_json(&self.config(), "/trackers/upgrade", None, &request)
            .await?
            .into_status()?;

        Ok(())
    }

    fn config(&self) -> Configuration {
        let tracker = &self.client.internal.get_api_configurations().tracker;
        match &self.endpoint {
            Some(endpoint) => tracker.with_base_path(endpoint),
            None => tracker.clone(),
        }
    }
}

/// Extension trait to add `tracker()` to [Client]
pub trait TrackerClientExt {
    #[allow(missing_docs)]
    fn tracker(&self) -> TrackerClient;
}

impl TrackerClientExt for Client {
    fn tracker(&self) -> TrackerClient {
        TrackerClient::new(self.clone())
    }
}
