//! HTTP collaborator used by [`VerificationClient`](crate::VerificationClient).
//!
//! The client never talks to the network itself: it hands a URL and its query
//! parameters to a [`Transport`] and gets back whatever body and status code
//! were observed. A missing or empty body is a failed request, whatever the
//! status code says.

#[cfg(feature = "with-http")]
mod http;

#[cfg(feature = "with-http")]
pub use http::{HttpOptions, HttpTransport};

use std::path::{Path, PathBuf};

/// Query parameters, in the order they must appear on the wire.
pub type Query<'a> = [(&'a str, &'a str)];

/// Outcome of a single round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpReply {
    pub body: Option<String>,
    pub status: Option<u16>,
}

impl HttpReply {
    pub fn new(body: Option<String>, status: Option<u16>) -> Self {
        Self { body, status }
    }

    /// A reply with no body and no status code (connection-level failure).
    pub fn failed() -> Self {
        Self::default()
    }

    /// The body exactly as received, `None` when absent or empty.
    pub fn raw(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// [`raw`](Self::raw) without its trailing line ending (`\n` or `\r\n`).
    /// Any other whitespace is kept.
    pub fn text(&self) -> Option<&str> {
        self.raw().map(strip_line_ending)
    }
}

fn strip_line_ending(body: &str) -> &str {
    body.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(body)
}

/// A local file sent as one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub field: &'static str,
    pub file_name: String,
    pub path: PathBuf,
}

impl FileUpload {
    pub(crate) const FIELD: &'static str = "file_contents";

    pub fn new(file_name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            field: Self::FIELD,
            file_name: file_name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Blocking "send GET/POST, return body and status code" capability.
pub trait Transport {
    fn get(&self, url: &str, query: &Query<'_>) -> HttpReply;

    fn post(&self, url: &str, query: &Query<'_>, upload: &FileUpload) -> HttpReply;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &Query<'_>) -> HttpReply {
        (**self).get(url, query)
    }

    fn post(&self, url: &str, query: &Query<'_>, upload: &FileUpload) -> HttpReply {
        (**self).post(url, query, upload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, query: &Query<'_>) -> HttpReply {
        (**self).get(url, query)
    }

    fn post(&self, url: &str, query: &Query<'_>, upload: &FileUpload) -> HttpReply {
        (**self).post(url, query, upload)
    }
}
