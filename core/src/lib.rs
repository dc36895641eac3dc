//! Client core for the trip planner API.
//!
//! # Overview
//! Talks to a remote trip-storage service over five JSON endpoints
//! (`/trips`, `/trips/{id}`). The crate is layered so each piece can be used
//! on its own:
//!
//! - `types`, `display`: the `Trip` entity, its write-side projection and
//!   the derived strings front-ends show (budget, travelers, date range).
//! - `codec`: the `{ "data": ... }` envelope and `_id` aliasing.
//! - `client`: sans-IO `TripClient` that builds `HttpRequest` values and
//!   classifies `HttpResponse` values (host-does-IO pattern).
//! - `transport`, `service`: the async `TripService`, which runs a
//!   `TripClient` over a `Transport` (`UreqTransport` by default).
//! - `dispatch`: one-shot completion delivery that a consumer can release.
//! - `form`, `cities`: input validation and destination suggestions for
//!   front-ends.

pub mod cities;
pub mod client;
pub mod codec;
pub mod dispatch;
mod display;
pub mod error;
pub mod form;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::TripClient;
pub use codec::TripPage;
pub use dispatch::{dispatch, dispatch_to, CallScope};
pub use error::{ErrorKind, TransportError, TripError};
pub use form::{FormErrors, FormField, TripForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TripService;
pub use transport::{Transport, UreqTransport};
pub use types::{CreateTripRequest, Trip, TripStatus, DEFAULT_STATUS};
