//! Wire codec for the trip service.
//!
//! Responses wrap their payload in a `data` envelope: `{ "data": {...} }` for
//! a single trip, `{ "data": [...], "total": n }` for a list. Requests are the
//! bare `CreateTripRequest` object.

use serde::Deserialize;

use crate::error::TripError;
use crate::types::{CreateTripRequest, Trip};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<Trip>,
    #[serde(default)]
    total: Option<u64>,
}

/// One page of a list response. `total` is whatever the server reported.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPage {
    pub trips: Vec<Trip>,
    pub total: Option<u64>,
}

/// Bodies are raw bytes; anything that is not UTF-8 JSON is a decoding error.
pub fn decode_trip(body: impl AsRef<[u8]>) -> Result<Trip, TripError> {
    let envelope: Envelope<Trip> = serde_json::from_slice(body.as_ref())?;
    Ok(envelope.data)
}

pub fn decode_trip_page(body: impl AsRef<[u8]>) -> Result<TripPage, TripError> {
    let envelope: ListEnvelope = serde_json::from_slice(body.as_ref())?;
    Ok(TripPage {
        trips: envelope.data,
        total: envelope.total,
    })
}

pub fn decode_trip_list(body: impl AsRef<[u8]>) -> Result<Vec<Trip>, TripError> {
    decode_trip_page(body).map(|page| page.trips)
}

/// Serialize the write-side fields of a trip.
///
/// Encoding failures surface as `InvalidUrl`: like a bad URL, they stop the
/// call before any request is sent. JSON has no NaN or infinity, and
/// serde_json would write them as `null`, so a non-finite budget fails here.
pub fn encode_request(request: &CreateTripRequest) -> Result<String, TripError> {
    if !request.budget.is_finite() {
        return Err(TripError::InvalidUrl);
    }
    serde_json::to_string(request).map_err(|_| TripError::InvalidUrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const LAGOS: &str = r#"{"_id":"abc123","destination":"Lagos","startDate":"2026-01-05","endDate":"2026-02-10","budget":500.5,"travelers":2}"#;

    #[test]
    fn id_is_read_from_underscore_id() {
        let trip = decode_trip(&format!(r#"{{"data":{LAGOS}}}"#)).unwrap();
        assert_eq!(trip.id.as_deref(), Some("abc123"));
        assert_eq!(trip.destination, "Lagos");
        assert_eq!(trip.budget, 500.5);
        assert_eq!(trip.travelers, 2);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let trip = decode_trip(&format!(r#"{{"data":{LAGOS}}}"#)).unwrap();
        assert!(trip.description.is_none());
        assert!(trip.status.is_none());
        assert!(trip.created_at.is_none());
        assert!(trip.updated_at.is_none());
    }

    #[test]
    fn explicit_nulls_are_absent() {
        let body = r#"{"data":{"destination":"Rome","startDate":"2026-05-01","endDate":"2026-05-03","budget":1,"travelers":1,"description":null,"status":null}}"#;
        let trip = decode_trip(body).unwrap();
        assert!(trip.id.is_none());
        assert!(trip.description.is_none());
        assert!(trip.status.is_none());
    }

    #[test]
    fn list_keeps_array_order_and_total() {
        let body = r#"{"data":[
            {"_id":"t1","destination":"Paris","startDate":"2026-01-01","endDate":"2026-01-02","budget":10,"travelers":1},
            {"_id":"t2","destination":"Tokyo","startDate":"2026-02-01","endDate":"2026-02-02","budget":20,"travelers":3}
        ],"total":2}"#;
        let page = decode_trip_page(body).unwrap();
        assert_eq!(page.total, Some(2));
        let ids: Vec<_> = page.trips.iter().map(|t| t.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["t1", "t2"]);
    }

    #[test]
    fn list_without_total() {
        let trips = decode_trip_list(r#"{"data":[]}"#).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn missing_destination_is_decoding_error() {
        let body = r#"{"data":{"_id":"x","startDate":"2026-01-05","endDate":"2026-02-10","budget":1,"travelers":1}}"#;
        let err = decode_trip(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn wrong_type_is_decoding_error() {
        let body = r#"{"data":{"destination":"Lagos","startDate":"2026-01-05","endDate":"2026-02-10","budget":"lots","travelers":1}}"#;
        assert_eq!(decode_trip(body).unwrap_err().kind(), ErrorKind::Decoding);
    }

    #[test]
    fn bare_array_without_envelope_is_decoding_error() {
        let err = decode_trip_list(&format!("[{LAGOS}]")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn encode_writes_only_writable_fields() {
        let req = CreateTripRequest::new("Lagos", "2026-01-05", "2026-02-10", 500.5, 2);
        let body: serde_json::Value = serde_json::from_str(&encode_request(&req).unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "destination": "Lagos",
                "startDate": "2026-01-05",
                "endDate": "2026-02-10",
                "budget": 500.5,
                "travelers": 2,
                "status": "planned"
            })
        );
    }

    #[test]
    fn non_finite_budget_is_not_encoded() {
        for budget in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let req = CreateTripRequest::new("Lagos", "2026-01-05", "2026-02-10", budget, 2);
            let err = encode_request(&req).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "budget {budget}");
        }
    }

    #[test]
    fn non_utf8_body_is_decoding_error() {
        let err = decode_trip([0xff, 0xfe, 0xfd, 0xfc]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        let err = decode_trip_list(b"{\"data\":[\xff]}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn encode_then_decode_echo_preserves_writable_fields() {
        let req = CreateTripRequest::new("Dubai", "2026-07-01", "2026-07-09", 1999.5, 4)
            .with_description("Family trip")
            .with_status("active");

        let mut echo: serde_json::Value =
            serde_json::from_str(&encode_request(&req).unwrap()).unwrap();
        echo["_id"] = "srv-1".into();
        echo["createdAt"] = "2026-06-01T10:00:00Z".into();
        echo["updatedAt"] = "2026-06-01T10:00:00Z".into();
        let body = serde_json::json!({ "data": echo }).to_string();

        let trip = decode_trip(&body).unwrap();
        assert_eq!(trip.id.as_deref(), Some("srv-1"));
        assert_eq!(trip.to_request(), req);
    }
}
