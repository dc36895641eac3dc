//! The I/O seam: executes one `HttpRequest` and reports what came back.
//!
//! # Design
//! `Transport` is the only place network I/O happens. `UreqTransport` drives
//! a blocking `ureq` agent on tokio's blocking pool so async callers are never
//! parked on a socket. Status codes are returned as data
//! (`http_status_as_error(false)`); classifying them is `TripClient`'s job.

use async_trait::async_trait;
use tracing::trace;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[cfg(test)]
use mockall::automock;

/// Executes a single HTTP round trip.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent (timeouts, proxies, TLS).
    ///
    /// The agent must be built with `http_status_as_error(false)`, otherwise
    /// non-2xx responses surface as network errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|err| TransportError::Connection(Box::new(err)))?
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;
    trace!(%method, %url, "executing request");

    let result = match method {
        HttpMethod::Get => with_headers(agent.get(&url), &headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&url), &headers).call(),
        HttpMethod::Post => {
            let builder = with_headers(agent.post(&url), &headers);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        HttpMethod::Put => {
            let builder = with_headers(agent.put(&url), &headers);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(classify)?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    // Bytes, not text: decoding is classified after the status. An error
    // status is reported even when its body cannot be read.
    let body = response.body_mut().with_config().limit(u64::MAX).read_to_vec();
    let body = match body {
        Ok(body) => body,
        Err(err) if (200..=299).contains(&status) => return Err(classify(err)),
        Err(err) => {
            trace!(status, error = %err, "dropping unreadable error body");
            Vec::new()
        }
    };

    Ok(HttpResponse {
        status,
        headers,
        body: (!body.is_empty()).then_some(body),
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Sort a `ureq` failure into the transport taxonomy.
fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::BadUri(uri) => TransportError::InvalidUrl(uri),
        ureq::Error::Http(err) => TransportError::InvalidUrl(err.to_string()),
        ureq::Error::Protocol(err) => TransportError::MalformedResponse(err.to_string()),
        other => TransportError::Connection(Box::new(other)),
    }
}
