//! The I/O seam between `StudentClient` and the network.
//!
//! A `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. Non-2xx statuses are data, not errors: status
//! interpretation belongs to the `parse_*` methods. Only failures that yield
//! no response at all surface as `ApiError::Transport`.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use super::Transport;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a shared `ureq::Agent`.
    ///
    /// The agent is built with `http_status_as_error(false)` so 4xx/5xx
    /// responses come back as `HttpResponse` values.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new(None)
        }
    }

    impl UreqTransport {
        pub fn new(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            Self::new(config.timeout())
        }
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

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let result = match (method, body) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
                (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Post, None) => {
                    with_headers(self.agent.post(&url), &headers).send_empty()
                }
                (HttpMethod::Put, Some(body)) => {
                    with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
            };

            let mut response = result.map_err(|e| {
                tracing::warn!(%method, %url, error = %e, "request failed");
                ApiError::Transport(e.to_string())
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            // No size cap: listings grow with the collection.
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
