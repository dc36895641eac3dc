//! Stateless HTTP request builder and response classifier for the trip API.
//!
//! # Design
//! `TripClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the round trip in between, so this half of the client is
//! deterministic and free of I/O.
//!
//! Classification order in `parse_*`: status outside 2xx, then a missing
//! body, then decoding. Transport-level failures never reach this module;
//! they are classified by the `Transport`.

use url::Url;

use crate::codec;
use crate::error::TripError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTripRequest, Trip};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the trip API.
#[derive(Debug, Clone)]
pub struct TripClient {
    base_url: String,
}

impl TripClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_trips(&self) -> Result<HttpRequest, TripError> {
        self.request(HttpMethod::Get, "/trips", None)
    }

    pub fn build_get_trip(&self, id: &str) -> Result<HttpRequest, TripError> {
        self.request(HttpMethod::Get, &trip_path(id)?, None)
    }

    pub fn build_create_trip(&self, input: &CreateTripRequest) -> Result<HttpRequest, TripError> {
        let body = codec::encode_request(input)?;
        self.request(HttpMethod::Post, "/trips", Some(body))
    }

    pub fn build_update_trip(
        &self,
        id: &str,
        input: &CreateTripRequest,
    ) -> Result<HttpRequest, TripError> {
        let path = trip_path(id)?;
        let body = codec::encode_request(input)?;
        self.request(HttpMethod::Put, &path, Some(body))
    }

    pub fn build_delete_trip(&self, id: &str) -> Result<HttpRequest, TripError> {
        self.request(HttpMethod::Delete, &trip_path(id)?, None)
    }

    pub fn parse_list_trips(&self, response: HttpResponse) -> Result<Vec<Trip>, TripError> {
        let body = expect_body(&response)?;
        codec::decode_trip_list(body)
    }

    pub fn parse_get_trip(&self, response: HttpResponse) -> Result<Trip, TripError> {
        parse_single(&response)
    }

    pub fn parse_create_trip(&self, response: HttpResponse) -> Result<Trip, TripError> {
        parse_single(&response)
    }

    pub fn parse_update_trip(&self, response: HttpResponse) -> Result<Trip, TripError> {
        parse_single(&response)
    }

    /// Any 2xx counts as deleted; the body, if any, is ignored.
    pub fn parse_delete_trip(&self, response: HttpResponse) -> Result<bool, TripError> {
        check_status(&response)?;
        Ok(true)
    }

    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpRequest, TripError> {
        let url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|_| TripError::InvalidUrl)?;
        if url.cannot_be_a_base() {
            return Err(TripError::InvalidUrl);
        }
        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), JSON.to_string()),
                ("Accept".to_string(), JSON.to_string()),
            ],
            body,
        })
    }
}

/// `/trips/{id}`, rejecting ids that cannot stand as a single path segment.
fn trip_path(id: &str) -> Result<String, TripError> {
    let malformed = id.is_empty()
        || id
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());
    // `url` resolves dot segments, which would retarget the request.
    if malformed || id == "." || id == ".." {
        return Err(TripError::InvalidUrl);
    }
    Ok(format!("/trips/{id}"))
}

fn check_status(response: &HttpResponse) -> Result<(), TripError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(TripError::server(response.status))
    }
}

fn expect_body(response: &HttpResponse) -> Result<&[u8], TripError> {
    check_status(response)?;
    match response.body.as_deref() {
        Some(body) if !body.is_empty() => Ok(body),
        _ => Err(TripError::NoData),
    }
}

fn parse_single(response: &HttpResponse) -> Result<Trip, TripError> {
    let body = expect_body(response)?;
    codec::decode_trip(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TRIP_JSON: &str = r#"{"_id":"abc123","destination":"Lagos","startDate":"2026-01-05","endDate":"2026-02-10","budget":500.5,"travelers":2,"status":"planned","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}"#;

    fn single() -> String {
        format!(r#"{{"data":{TRIP_JSON}}}"#)
    }

    fn client() -> TripClient {
        TripClient::new("http://localhost:3000")
    }

    fn input() -> CreateTripRequest {
        CreateTripRequest::new("Lagos", "2026-01-05", "2026-02-10", 500.5, 2)
    }

    #[test]
    fn build_list_trips_produces_correct_request() {
        let req = client().build_list_trips().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/trips");
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/json"));
    }

    #[test]
    fn build_get_trip_produces_correct_request() {
        let req = client().build_get_trip("abc123").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/trips/abc123");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_trip_produces_correct_request() {
        let req = client().build_create_trip(&input()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/trips");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["destination"], "Lagos");
        assert_eq!(body["status"], "planned");
        assert!(body.get("_id").is_none());
        assert!(body.get("createdAt").is_none());
    }

    #[test]
    fn build_update_trip_produces_correct_request() {
        let req = client()
            .build_update_trip("abc123", &input().with_status("completed"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/trips/abc123");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "completed");
    }

    #[test]
    fn build_delete_trip_produces_correct_request() {
        let req = client().build_delete_trip("abc123").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/trips/abc123");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TripClient::new("http://localhost:3000/");
        let req = client.build_list_trips().unwrap();
        assert_eq!(req.url, "http://localhost:3000/trips");
    }

    #[test]
    fn malformed_base_is_invalid_url() {
        let err = TripClient::new("not a url").build_list_trips().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
        let err = TripClient::new("mailto:someone").build_list_trips().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }

    #[test]
    fn malformed_ids_are_invalid_url() {
        for id in ["", "a/b", "a b", "a?b", "a#b", "a\nb", ".", ".."] {
            let err = client().build_get_trip(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "id {id:?}");
            let err = client().build_update_trip(id, &input()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "id {id:?}");
            let err = client().build_delete_trip(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "id {id:?}");
        }
    }

    #[test]
    fn dotted_ids_stay_inside_the_trip_path() {
        let client = TripClient::new("http://api.test");
        for id in [".", ".."] {
            let err = client.build_delete_trip(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "id {id:?}");
        }
        let req = client.build_delete_trip("...").unwrap();
        assert_eq!(req.url, "http://api.test/trips/...");
        let req = client.build_get_trip("v1.2").unwrap();
        assert_eq!(req.url, "http://api.test/trips/v1.2");
    }

    #[test]
    fn parse_list_trips_success() {
        let body = format!(r#"{{"data":[{TRIP_JSON}],"total":1}}"#);
        let trips = client().parse_list_trips(HttpResponse::new(200, body)).unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].destination, "Lagos");
    }

    #[test]
    fn parse_get_trip_success() {
        let trip = client().parse_get_trip(HttpResponse::new(200, single())).unwrap();
        assert_eq!(trip.id.as_deref(), Some("abc123"));
        assert_eq!(trip.status.as_deref(), Some("planned"));
    }

    #[test]
    fn parse_create_trip_accepts_201() {
        let trip = client().parse_create_trip(HttpResponse::new(201, single())).unwrap();
        assert!(trip.is_persisted());
        assert!(trip.created_at.is_some());
    }

    #[test]
    fn parse_get_trip_not_found_is_server_error() {
        let err = client()
            .parse_get_trip(HttpResponse::new(404, r#"{"message":"not found"}"#))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn status_is_checked_before_body() {
        let err = client().parse_update_trip(HttpResponse::new(500, single())).unwrap_err();
        assert_eq!(err.status(), Some(500));
        let err = client().parse_list_trips(HttpResponse::empty(503)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn no_content_where_trip_expected_is_no_data() {
        let err = client().parse_get_trip(HttpResponse::empty(204)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoData);
        let err = client().parse_create_trip(HttpResponse::new(200, "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoData);
    }

    #[test]
    fn bad_json_is_decoding_error() {
        let err = client().parse_list_trips(HttpResponse::new(200, "not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        let err = client()
            .parse_get_trip(HttpResponse::new(
                200,
                r#"{"data":{"startDate":"2026-01-05","endDate":"2026-02-10","budget":1,"travelers":1}}"#,
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn non_utf8_body_is_classified_after_status() {
        let garbage = vec![0xff, 0xfe, 0xfd, 0xfc];
        let err = client()
            .parse_get_trip(HttpResponse::new(200, garbage.clone()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        let err = client()
            .parse_list_trips(HttpResponse::new(404, garbage))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn parse_delete_trip_success_with_or_without_body() {
        assert!(client().parse_delete_trip(HttpResponse::empty(204)).unwrap());
        assert!(client()
            .parse_delete_trip(HttpResponse::new(200, r#"{"message":"deleted"}"#))
            .unwrap());
    }

    #[test]
    fn parse_delete_trip_not_found() {
        let err = client().parse_delete_trip(HttpResponse::empty(404)).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
