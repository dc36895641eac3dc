//! Async gateway to the remote trip service.
//!
//! # Design
//! `TripService` composes the sans-IO `TripClient` with a `Transport`. It
//! holds no mutable state: the base address lives in the client, the
//! transport is shared behind an `Arc`, and every call is an independent
//! round trip. Clone it freely and share it across tasks without locking.
//! Nothing is retried; every failure is returned to the caller as-is.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::TripClient;
use crate::error::TripError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateTripRequest, Trip};

pub struct TripService<T = UreqTransport> {
    client: TripClient,
    transport: Arc<T>,
}

impl<T> Clone for TripService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl TripService<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> TripService<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TripClient::new(base_url),
            transport: Arc::new(transport),
        }
    }

    pub fn client(&self) -> &TripClient {
        &self.client
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, TripError> {
        let request = self.client.build_list_trips()?;
        let response = self.send(request).await?;
        self.client.parse_list_trips(response)
    }

    pub async fn get_trip(&self, id: &str) -> Result<Trip, TripError> {
        let request = self.client.build_get_trip(id)?;
        let response = self.send(request).await?;
        self.client.parse_get_trip(response)
    }

    /// Persist a draft. The returned trip carries the server-assigned id and
    /// timestamps.
    pub async fn create_trip(&self, input: &CreateTripRequest) -> Result<Trip, TripError> {
        let request = self.client.build_create_trip(input)?;
        let response = self.send(request).await?;
        self.client.parse_create_trip(response)
    }

    pub async fn update_trip(
        &self,
        id: &str,
        input: &CreateTripRequest,
    ) -> Result<Trip, TripError> {
        let request = self.client.build_update_trip(id, input)?;
        let response = self.send(request).await?;
        self.client.parse_update_trip(response)
    }

    pub async fn delete_trip(&self, id: &str) -> Result<bool, TripError> {
        let request = self.client.build_delete_trip(id)?;
        let response = self.send(request).await?;
        self.client.parse_delete_trip(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TripError> {
        debug!(method = %request.method, url = %request.url, "sending trip request");
        match self.transport.execute(request).await {
            Ok(response) => {
                if !response.is_success() {
                    warn!(status = response.status, "trip service returned an error status");
                }
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "trip request failed before a response arrived");
                Err(err.into())
            }
        }
    }
}
