//! C-ABI wrapper around `trip-core`.
//!
//! # Overview
//! Exposes the trip CRUD API through `extern "C"` functions so a native
//! front-end can build requests and classify responses without linking to
//! Rust's async runtime or serde. The host performs the HTTP round trip.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `trip_build_*` / `trip_parse_*` mirrors the core client 1:1.
//! - A single `FfiTripResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `trip_free_*` function to release them.

pub mod types;

use std::cell::Cell;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use trip_core::{HttpRequest, TripClient, TripError};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `TripClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8. An unusable URL is
/// accepted here and reported by every `trip_build_*` call.
/// The caller must free the returned pointer with `trip_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn trip_client_new(base_url: *const c_char) -> *mut FfiTripClient {
    catch_unwind(|| match unsafe { from_c(base_url) } {
        Some(url) => Box::into_raw(Box::new(FfiTripClient {
            inner: TripClient::new(url),
        })),
        None => ptr::null_mut(),
    })
    .unwrap_or(ptr::null_mut())
}

/// Free a client created by `trip_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn trip_client_free(client: *mut FfiTripClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

thread_local! {
    static LAST_BUILD_ERROR: Cell<FfiErrorCode> = const { Cell::new(FfiErrorCode::Ok) };
}

/// Shared body of the `trip_build_*` functions: null checks, panic guard,
/// and conversion. A builder error yields null and records its code for
/// `trip_last_build_error`.
fn build(
    client: *const FfiTripClient,
    f: impl FnOnce(&TripClient) -> Option<Result<HttpRequest, TripError>>,
) -> *mut FfiHttpRequest {
    let (request, code) = catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return (ptr::null_mut(), FfiErrorCode::NullArg);
        }
        let client = unsafe { &*client };
        match f(&client.inner) {
            Some(Ok(req)) => (FfiHttpRequest::from_core(req), FfiErrorCode::Ok),
            Some(Err(err)) => (ptr::null_mut(), FfiErrorCode::from(err.kind())),
            None => (ptr::null_mut(), FfiErrorCode::NullArg),
        }
    }))
    .unwrap_or((ptr::null_mut(), FfiErrorCode::Panic));
    LAST_BUILD_ERROR.with(|last| last.set(code));
    request
}

/// Why the most recent `trip_build_*` call on this thread returned null:
/// `NullArg` for a null or non-UTF-8 argument, `InvalidUrl` for an unusable
/// base URL, id or input. `Ok` after a successful build.
#[unsafe(no_mangle)]
pub extern "C" fn trip_last_build_error() -> FfiErrorCode {
    LAST_BUILD_ERROR.with(Cell::get)
}

/// Build the request for listing all trips.
///
/// Returns null if `client` is null or its base URL is unusable.
/// The caller must free the returned pointer with `trip_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn trip_build_list_trips(client: *const FfiTripClient) -> *mut FfiHttpRequest {
    build(client, |c| Some(c.build_list_trips()))
}

/// Build the request for fetching one trip.
///
/// Returns null if an argument is null, or `id` cannot form a URL path
/// segment (empty, `.` or `..`, or containing `/`, `?`, `#`, `%`,
/// whitespace). `trip_last_build_error` tells the two apart.
#[unsafe(no_mangle)]
pub extern "C" fn trip_build_get_trip(
    client: *const FfiTripClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let id = unsafe { from_c(id) }?;
        Some(c.build_get_trip(id))
    })
}

/// Build the request for creating a trip from `input`.
///
/// Returns null if an argument or a required input string is null, or the
/// budget is not finite.
#[unsafe(no_mangle)]
pub extern "C" fn trip_build_create_trip(
    client: *const FfiTripClient,
    input: *const FfiTripInput,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        if input.is_null() {
            return None;
        }
        let req = unsafe { (*input).to_core() }?;
        Some(c.build_create_trip(&req))
    })
}

/// Build the request that replaces the trip `id` with `input`.
#[unsafe(no_mangle)]
pub extern "C" fn trip_build_update_trip(
    client: *const FfiTripClient,
    id: *const c_char,
    input: *const FfiTripInput,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        if input.is_null() {
            return None;
        }
        let id = unsafe { from_c(id) }?;
        let req = unsafe { (*input).to_core() }?;
        Some(c.build_update_trip(id, &req))
    })
}

/// Build the request for deleting one trip.
#[unsafe(no_mangle)]
pub extern "C" fn trip_build_delete_trip(
    client: *const FfiTripClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(client, |c| {
        let id = unsafe { from_c(id) }?;
        Some(c.build_delete_trip(id))
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Shared body of the `trip_parse_*` functions. Never returns null.
fn parse(
    name: &str,
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
    f: impl FnOnce(&TripClient, trip_core::HttpResponse) -> *mut FfiTripResult,
) -> *mut FfiTripResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiTripResult::null_arg("client");
        }
        if response.is_null() {
            return FfiTripResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let response = unsafe { &*response }.to_core();
        f(&client.inner, response)
    }))
    .unwrap_or_else(|_| FfiTripResult::panic(&format!("panic in {name}")))
}

/// Parse the response to a list request.
///
/// Returns a result with `data_tag = TripList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn trip_parse_list_trips(
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTripResult {
    parse("trip_parse_list_trips", client, response, |c, resp| {
        match c.parse_list_trips(resp) {
            Ok(trips) => FfiTripResult::ok_trip_list(trips),
            Err(e) => FfiTripResult::from_error(e),
        }
    })
}

/// Parse the response to a get request (`data_tag = Trip`).
#[unsafe(no_mangle)]
pub extern "C" fn trip_parse_get_trip(
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTripResult {
    parse("trip_parse_get_trip", client, response, |c, resp| {
        match c.parse_get_trip(resp) {
            Ok(trip) => FfiTripResult::ok_trip(trip),
            Err(e) => FfiTripResult::from_error(e),
        }
    })
}

/// Parse the response to a create request (`data_tag = Trip`).
#[unsafe(no_mangle)]
pub extern "C" fn trip_parse_create_trip(
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTripResult {
    parse("trip_parse_create_trip", client, response, |c, resp| {
        match c.parse_create_trip(resp) {
            Ok(trip) => FfiTripResult::ok_trip(trip),
            Err(e) => FfiTripResult::from_error(e),
        }
    })
}

/// Parse the response to an update request (`data_tag = Trip`).
#[unsafe(no_mangle)]
pub extern "C" fn trip_parse_update_trip(
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTripResult {
    parse("trip_parse_update_trip", client, response, |c, resp| {
        match c.parse_update_trip(resp) {
            Ok(trip) => FfiTripResult::ok_trip(trip),
            Err(e) => FfiTripResult::from_error(e),
        }
    })
}

/// Parse the response to a delete request.
///
/// On success `data_tag = Bool` and `data` points to `true`.
#[unsafe(no_mangle)]
pub extern "C" fn trip_parse_delete_trip(
    client: *const FfiTripClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTripResult {
    parse("trip_parse_delete_trip", client, response, |c, resp| {
        match c.parse_delete_trip(resp) {
            Ok(deleted) => FfiTripResult::ok_bool(deleted),
            Err(e) => FfiTripResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `trip_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn trip_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by any `trip_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn trip_free_result(result: *mut FfiTripResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiTripResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn trip_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
