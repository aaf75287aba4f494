use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, Response, multipart};

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::{FileUpload, HttpReply, Query, Transport};
use crate::error::Error;

/// Configuration knobs for [`HttpTransport`].
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub user_agent: String,
    pub timeout_ms: u64,
    pub danger_accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30_000,
            danger_accept_invalid_certs: false,
        }
    }
}

impl HttpOptions {
    /// Return the timeout as a [`Duration`]. A zero timeout disables the
    /// request deadline.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// Redirects are followed. Bodies are returned whatever the HTTP status, the
/// service reports most failures as plain-text tokens.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("http", &"<reqwest::blocking::Client>")
            .finish()
    }
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        Self::with_options(&HttpOptions::default())
    }

    pub fn with_options(options: &HttpOptions) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout())
            .danger_accept_invalid_certs(options.danger_accept_invalid_certs)
            .build()
            .map_err(|source| Error::HttpClient { source })?;
        Ok(Self { http })
    }

    #[cfg_attr(not(feature = "with-tracing"), allow(unused_variables))]
    fn finish(url: &str, result: reqwest::Result<Response>) -> HttpReply {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                crate::trace_event!(warn, url, error = %err, "request failed");
                return HttpReply::new(None, err.status().map(|s| s.as_u16()));
            }
        };

        let status = response.status().as_u16();
        match response.text() {
            Ok(body) => {
                crate::trace_event!(debug, url, status, bytes = body.len(), "response received");
                HttpReply::new(Some(body), Some(status))
            }
            Err(err) => {
                crate::trace_event!(warn, url, status, error = %err, "could not read response body");
                HttpReply::new(None, Some(status))
            }
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &Query<'_>) -> HttpReply {
        log_request("GET", url, query);
        Self::finish(url, self.http.get(url).query(query).send())
    }

    #[cfg_attr(not(feature = "with-tracing"), allow(unused_variables))]
    fn post(&self, url: &str, query: &Query<'_>, upload: &FileUpload) -> HttpReply {
        log_request("POST", url, query);
        let part = match multipart::Part::file(&upload.path) {
            Ok(part) => part.file_name(upload.file_name.clone()),
            Err(err) => {
                crate::trace_event!(
                    warn,
                    path = %upload.path.display(),
                    error = %err,
                    "could not read upload source"
                );
                return HttpReply::failed();
            }
        };
        let form = multipart::Form::new().part(upload.field, part);
        Self::finish(url, self.http.post(url).query(query).multipart(form).send())
    }
}

// parameter values may carry the api key; only names are logged
#[cfg_attr(not(feature = "with-tracing"), allow(unused_variables))]
fn log_request(method: &str, url: &str, query: &Query<'_>) {
    let names: Vec<&str> = query.iter().map(|(name, _)| *name).collect();
    crate::trace_event!(debug, method, url, params = ?names, "sending request");
}
