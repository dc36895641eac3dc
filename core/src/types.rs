//! Domain types for the trip API.
//!
//! # Design
//! `Trip` is both the in-memory entity and, through its serde attributes, the
//! body of a `<TripJSON>` object: `_id` on the wire becomes `id` here and the
//! camelCase keys map onto snake_case fields. Envelope handling lives in
//! `codec`. The mock-server crate defines its own copies of these shapes;
//! integration tests catch schema drift between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status written when the caller does not pick one.
pub const DEFAULT_STATUS: &str = "planned";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// A single itinerary record.
///
/// A trip with `id == None` is a draft that the remote service has not
/// accepted yet. The id, `created_at` and `updated_at` are only ever assigned
/// by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travelers: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Trip {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// The status as a known lifecycle value, if the label is one we recognise.
    pub fn known_status(&self) -> Option<TripStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Write-side projection, used to resubmit an edited trip.
    pub fn to_request(&self) -> CreateTripRequest {
        CreateTripRequest {
            destination: self.destination.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            budget: self.budget,
            travelers: self.travelers,
            description: self.description.clone(),
            status: self.status.clone().unwrap_or_else(default_status),
        }
    }
}

/// Request payload for creating or replacing a trip.
///
/// Carries exactly the writable fields. `status` falls back to `"planned"`
/// both in `new` and when the field is omitted from deserialized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travelers: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl CreateTripRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        budget: f64,
        travelers: i64,
    ) -> Self {
        Self {
            destination: destination.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            budget,
            travelers,
            description: None,
            status: default_status(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Lifecycle labels the client knows about.
///
/// The entity keeps `status` as a raw string so labels outside this set
/// survive a round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trip status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TripStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planned" => Ok(TripStatus::Planned),
            "active" => Ok(TripStatus::Active),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
