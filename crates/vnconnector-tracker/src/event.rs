use chrono_tz::Tz;
use serde::{ser::Error as _, Serialize, Serializer};
use thiserror::Error;
use vnconnector_error::vnconnector_error;

/// A shipment tracking event.
///
/// Text fields are required when they are not optional, an empty string counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerEvent {
    /// Transfer number.
    pub refer_code: Option<String>,
    /// Destination city.
    pub destination: String,
    /// Destination country.
    pub delivered_to: String,
    /// Transfer number of the agent.
    pub agent_refer_code: Option<String>,
    /// Phone number of the agent.
    pub telephone: Option<String>,
    /// City where the event happened.
    pub location: String,
    /// Status code.
    pub status: String,
    /// Status description.
    pub remarks: String,
    /// Local time of the event.
    pub create_time: Option<String>,
    /// IANA name of the timezone of `create_time`, e.g. `Asia/Ho_Chi_Minh`.
    pub timezone: String,
    /// Customer owning the shipment, `0` counts as unset.
    pub client_id: u64,
    /// Channel the event was recorded from.
    pub flag: String,
    /// Operator id, the service uses `9999` for system events.
    pub operator: Option<u64>,
}

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerValidationError {
    #[error("Tracker field `{0}` must not be empty")]
    MissingField(&'static str),
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl TrackerEvent {
    /// Check the required fields, in wire order, then the timezone.
    pub fn validate(&self) -> Result<(), TrackerValidationError> {
        let required = [
            ("destination", self.destination.is_empty()),
            ("deliveredTo", self.delivered_to.is_empty()),
            ("location", self.location.is_empty()),
            ("status", self.status.is_empty()),
            ("remarks", self.remarks.is_empty()),
            ("clientId", self.client_id == 0),
            ("flag", self.flag.is_empty()),
            ("timezone", self.timezone.is_empty()),
        ];

        if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(TrackerValidationError::MissingField(*field));
        }

        if self.timezone.parse::<Tz>().is_err() {
            return Err(TrackerValidationError::InvalidTimezone(
                self.timezone.clone(),
            ));
        }

        Ok(())
    }

    /// The wire form of the event for `shipment_number`.
    pub(crate) fn record<'a>(
        &'a self,
        shipment_number: Option<&'a str>,
    ) -> Result<TrackerRecord<'a>, TrackerValidationError> {
        self.validate()?;

        Ok(TrackerRecord {
            refer_code: self.refer_code.as_deref(),
            destination: &self.destination,
            delivered_to: &self.delivered_to,
            agent_refer_code: self.agent_refer_code.as_deref(),
            telephone: self.telephone.as_deref(),
            location: &self.location,
            status: &self.status,
            remarks: &self.remarks,
            create_time: self.create_time.as_deref(),
            timezone: &self.timezone,
            client_id: self.client_id,
            flag: &self.flag,
            operator: self.operator,
            shipment_number,
        })
    }
}

/// Serialization fails when the event does not pass [TrackerEvent::validate].
impl Serialize for TrackerEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record(None)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Every field is sent, unset ones as `null`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackerRecord<'a> {
    refer_code: Option<&'a str>,
    destination: &'a str,
    delivered_to: &'a str,
    agent_refer_code: Option<&'a str>,
    telephone: Option<&'a str>,
    location: &'a str,
    status: &'a str,
    remarks: &'a str,
    create_time: Option<&'a str>,
    timezone: &'a str,
    client_id: u64,
    flag: &'a str,
    operator: Option<u64>,
    shipment_number: Option<&'a str>,
}
