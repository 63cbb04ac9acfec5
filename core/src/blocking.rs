//! Blocking host for the screen, built on `ureq`.
//!
//! Executes each `Outbound` on the calling thread and feeds the outcome back
//! into the screen, following up with any resync request until the screen
//! has nothing left in flight for that action.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::screen::{Outbound, TodoScreen};

/// Executes plain-data requests. Errors mean no HTTP response was received.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` over a `ureq` agent.
///
/// 4xx/5xx responses are returned as data rather than `Err`, leaving status
/// interpretation to the core client.
#[derive(Clone)]
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
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = req.path.as_str();
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(path), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(path), &req.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(path), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(path), &req.headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Execute `outbound` and every follow-up it produces. Stops at the first
/// failure, which the screen has already logged.
pub fn drive<T: Transport + ?Sized>(
    screen: &mut TodoScreen,
    transport: &T,
    outbound: Outbound,
) -> Result<(), ApiError> {
    let mut next = Some(outbound);
    while let Some(Outbound { ticket, request }) = next.take() {
        next = match transport.execute(&request) {
            Ok(response) => screen.complete(ticket, response)?,
            Err(err) => screen.fail_with(ticket, err)?,
        };
    }
    Ok(())
}
