//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` for strings (null where the core has `None`), raw pointer
//! plus length for vectors, and enums with explicit discriminants. Conversion
//! functions live here so `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use trip_core::{ErrorKind, HttpMethod, HttpRequest, Trip, TripClient, TripError};

/// Opaque handle to a `TripClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiTripClient {
    pub(crate) inner: TripClient,
}

// ---------------------------------------------------------------------------
// String helpers
// ---------------------------------------------------------------------------

/// Move a Rust string onto the C heap. Interior NULs are dropped.
pub(crate) fn into_c(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

pub(crate) fn into_c_opt(s: Option<String>) -> *mut c_char {
    s.map_or(ptr::null_mut(), into_c)
}

/// Borrow a C string as UTF-8. Null and invalid UTF-8 both yield `None`.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn from_c<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Reclaim a string produced by `into_c`. Null is ignored.
pub(crate) fn free_c(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a vector to C as pointer + length. Empty vectors become null.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

/// Reclaim a vector handed out by `into_raw_parts`.
pub(crate) fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = unsafe { std::slice::from_raw_parts_mut(ptr, len as usize) };
    unsafe { Box::from_raw(slice as *mut [T]) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `trip_build_*` functions. The C caller executes the request
/// and passes the response back through `trip_parse_*`. `url` is absolute;
/// `body` is null for GET and DELETE.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c(k),
                value: into_c(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: into_c(req.url),
            headers,
            headers_len,
            body: into_c_opt(req.body),
        }))
    }

    /// Release everything `from_core` allocated.
    ///
    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c(req.url);
        free_c(req.body);
        for h in from_raw_parts(req.headers, req.headers_len) {
            free_c(h.key);
            free_c(h.value);
        }
    }
}

/// Writable trip fields supplied by the C caller.
///
/// `description` and `status` may be null; a null status means `"planned"`.
/// The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiTripInput {
    pub destination: *const c_char,
    pub start_date: *const c_char,
    pub end_date: *const c_char,
    pub budget: f64,
    pub travelers: i64,
    pub description: *const c_char,
    pub status: *const c_char,
}

impl FfiTripInput {
    /// `None` when a required string is null or not UTF-8.
    ///
    /// # Safety
    /// Every non-null pointer must reference a NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> Option<trip_core::CreateTripRequest> {
        let mut req = trip_core::CreateTripRequest::new(
            unsafe { from_c(self.destination) }?,
            unsafe { from_c(self.start_date) }?,
            unsafe { from_c(self.end_date) }?,
            self.budget,
            self.travelers,
        );
        if let Some(description) = unsafe { from_c(self.description) } {
            req = req.with_description(description);
        }
        if let Some(status) = unsafe { from_c(self.status) } {
            req = req.with_status(status);
        }
        Some(req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to a `trip_parse_*` function. A null or empty `body`
/// means the response carried no payload. The FFI layer reads but does not
/// free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    /// Bytes are passed through unchecked; text that is not UTF-8 fails
    /// later as a decoding error, not as a missing body.
    pub(crate) fn to_core(&self) -> trip_core::HttpResponse {
        if self.body.is_null() {
            return trip_core::HttpResponse::empty(self.status);
        }
        let body = unsafe { CStr::from_ptr(self.body) }.to_bytes();
        trip_core::HttpResponse::new(self.status, body)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiTripResult`. One per client error kind, plus
/// the two failures only the boundary can produce.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    Network = 2,
    InvalidResponse = 3,
    Server = 4,
    NoData = 5,
    Decoding = 6,
    Panic = 7,
    NullArg = 8,
}

impl From<ErrorKind> for FfiErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidUrl => FfiErrorCode::InvalidUrl,
            ErrorKind::Network => FfiErrorCode::Network,
            ErrorKind::InvalidResponse => FfiErrorCode::InvalidResponse,
            ErrorKind::Server => FfiErrorCode::Server,
            ErrorKind::NoData => FfiErrorCode::NoData,
            ErrorKind::Decoding => FfiErrorCode::Decoding,
        }
    }
}

/// Tag that tells `trip_free_result` what `FfiTripResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Trip = 1,
    TripList = 2,
    Bool = 3,
}

/// A single trip exposed to C, with its display strings precomputed.
///
/// Nullable fields: `id`, `description`, `status`, `created_at`,
/// `updated_at`.
#[repr(C)]
pub struct FfiTrip {
    pub id: *mut c_char,
    pub destination: *mut c_char,
    pub start_date: *mut c_char,
    pub end_date: *mut c_char,
    pub budget: f64,
    pub travelers: i64,
    pub description: *mut c_char,
    pub status: *mut c_char,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
    pub formatted_budget: *mut c_char,
    pub travelers_text: *mut c_char,
    pub date_range: *mut c_char,
    pub status_label: *mut c_char,
}

impl FfiTrip {
    fn from_core(trip: Trip) -> Self {
        let formatted_budget = into_c(trip.formatted_budget());
        let travelers_text = into_c(trip.travelers_text());
        let date_range = into_c(trip.date_range());
        let status_label = into_c(trip.status_label());
        FfiTrip {
            id: into_c_opt(trip.id),
            destination: into_c(trip.destination),
            start_date: into_c(trip.start_date),
            end_date: into_c(trip.end_date),
            budget: trip.budget,
            travelers: trip.travelers,
            description: into_c_opt(trip.description),
            status: into_c_opt(trip.status),
            created_at: into_c_opt(trip.created_at),
            updated_at: into_c_opt(trip.updated_at),
            formatted_budget,
            travelers_text,
            date_range,
            status_label,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    fn free_fields(&self) {
        for s in [
            self.id,
            self.destination,
            self.start_date,
            self.end_date,
            self.description,
            self.status,
            self.created_at,
            self.updated_at,
            self.formatted_budget,
            self.travelers_text,
            self.date_range,
            self.status_label,
        ] {
            free_c(s);
        }
    }
}

/// A list of trips exposed to C, in server order.
#[repr(C)]
pub struct FfiTripList {
    pub items: *mut FfiTrip,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` names the error kind, `error_message` is a
/// human-readable C string, `http_status` is set for `Server`, and `data`
/// is null.
#[repr(C)]
pub struct FfiTripResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiTripResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiTripResult {
            error_code: FfiErrorCode::Ok,
            error_message: ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn failure(error_code: FfiErrorCode, message: String, http_status: u16) -> *mut Self {
        Box::into_raw(Box::new(FfiTripResult {
            error_code,
            error_message: into_c(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiTrip`.
    pub(crate) fn ok_trip(trip: Trip) -> *mut Self {
        let trip = Box::new(FfiTrip::from_core(trip));
        Self::ok(FfiDataTag::Trip, Box::into_raw(trip) as *mut c_void)
    }

    /// Build a success result carrying a `FfiTripList`.
    pub(crate) fn ok_trip_list(trips: Vec<Trip>) -> *mut Self {
        let items: Vec<FfiTrip> = trips.into_iter().map(FfiTrip::from_core).collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::new(FfiTripList { items, len });
        Self::ok(FfiDataTag::TripList, Box::into_raw(list) as *mut c_void)
    }

    /// Build a success result carrying a `bool` (delete).
    pub(crate) fn ok_bool(value: bool) -> *mut Self {
        Self::ok(FfiDataTag::Bool, Box::into_raw(Box::new(value)) as *mut c_void)
    }

    pub(crate) fn from_error(err: TripError) -> *mut Self {
        let status = err.status().unwrap_or(0);
        Self::failure(err.kind().into(), err.to_string(), status)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"), 0)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string(), 0)
    }

    /// Release the envelope and whatever `data_tag` says `data` holds.
    ///
    /// # Safety
    /// `result` must come from one of the constructors above and not have
    /// been freed.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        free_c(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Trip => {
                let trip = unsafe { Box::from_raw(result.data as *mut FfiTrip) };
                trip.free_fields();
            }
            FfiDataTag::TripList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTripList) };
                for item in from_raw_parts(list.items, list.len) {
                    item.free_fields();
                }
            }
            FfiDataTag::Bool => drop(unsafe { Box::from_raw(result.data as *mut bool) }),
            FfiDataTag::None => {}
        }
    }
}
