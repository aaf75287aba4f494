//! EmailListVerify API client.
//!
//! Typical flow:
//! 1) Build a client with [`VerificationClient::new`] (or `VerificationClient::http`)
//! 2) Verify single addresses via [`VerificationClient::verify_email`]
//! 3) Upload a list via [`VerificationClient::verify_file`]
//! 4) Poll its progress via [`VerificationClient::last_file_info`]

mod options;

pub use options::{ClientOptions, DEFAULT_BASE_URL};

use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::error::Error;
use crate::record::FileRecord;
use crate::status::{StatusInterpreter, Verdict, VerdictOptions};
use crate::transport::{FileUpload, HttpReply, Transport};

#[cfg(feature = "with-http")]
use crate::transport::{HttpOptions, HttpTransport};

use options::join_endpoint;

const VERIFY_EMAIL: &str = "verifyEmail";
const VERIFY_FILE: &str = "verifyApiFile";
const FILE_INFO: &str = "getApiFileInfo";

/// Client bound to one API key.
///
/// The client is meant to be long-lived: it keeps a request counter, the last
/// status received and the id of the last uploaded file. Every operation takes
/// `&mut self`; sharing a client between threads needs external locking
/// (e.g. a `Mutex`).
pub struct VerificationClient<T> {
    api_key: String,
    base_url: String,
    transport: T,
    interpreter: StatusInterpreter,
    last_status: Option<String>,
    last_file_id: Option<String>,
}

impl<T: fmt::Debug> fmt::Debug for VerificationClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("interpreter", &self.interpreter)
            .field("last_status", &self.last_status)
            .field("last_file_id", &self.last_file_id)
            .finish()
    }
}

#[cfg(feature = "with-http")]
impl VerificationClient<HttpTransport> {
    /// Client talking to the public endpoint with default settings.
    pub fn http(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::http_with_options(api_key, ClientOptions::default(), &HttpOptions::default())
    }

    pub fn http_with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
        http: &HttpOptions,
    ) -> Result<Self, Error> {
        let transport = HttpTransport::with_options(http)?;
        Ok(Self::with_options(api_key, transport, options))
    }
}

impl<T: Transport> VerificationClient<T> {
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        Self::with_options(api_key, transport, ClientOptions::default())
    }

    pub fn with_options(api_key: impl Into<String>, transport: T, options: ClientOptions) -> Self {
        let ClientOptions { base_url, verdicts } = options;
        Self {
            api_key: api_key.into(),
            base_url,
            transport,
            interpreter: StatusInterpreter::new(verdicts),
            last_status: None,
            last_file_id: None,
        }
    }

    /// Verifies a single address.
    ///
    /// No syntax check happens locally, the service does it. The body received
    /// is kept verbatim as [`last_status`](Self::last_status); only its trailing
    /// line ending is dropped before the exact match against the vocabulary.
    pub fn verify_email(&mut self, email: &str) -> Result<Verdict, Error> {
        let url = join_endpoint(&self.base_url, VERIFY_EMAIL);
        let reply = self
            .transport
            .get(&url, &[("email", email), ("secret", self.api_key.as_str())]);
        let status = expect_body(&reply)?;

        self.last_status = reply.body.clone();
        self.interpreter.interpret(status)
    }

    /// Uploads a file containing a list of addresses and returns its id.
    ///
    /// Fails with [`Error::FileNotFound`] before any network call when
    /// `file_path` is not an existing, readable file.
    pub fn verify_file(
        &mut self,
        file_name: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<String, Error> {
        let path = file_path.as_ref();
        if !path.is_file() || File::open(path).is_err() {
            return Err(Error::FileNotFound {
                file_name: file_name.to_string(),
                file_path: path.to_path_buf(),
            });
        }

        let url = join_endpoint(&self.base_url, VERIFY_FILE);
        let upload = FileUpload::new(file_name, path);
        let reply = self.transport.post(
            &url,
            &[("secret", self.api_key.as_str()), ("filename", file_name)],
            &upload,
        );
        let file_id = expect_body(&reply)?.to_string();

        self.interpreter.record_request();
        crate::trace_event!(debug, file_name, file_id = %file_id, "file uploaded");
        self.last_file_id = Some(file_id.clone());
        Ok(file_id)
    }

    /// Fetches the processing state of an uploaded file.
    pub fn file_info(&mut self, id: &str) -> Result<FileRecord, Error> {
        let url = join_endpoint(&self.base_url, FILE_INFO);
        let reply = self
            .transport
            .get(&url, &[("id", id), ("secret", self.api_key.as_str())]);
        let body = expect_body(&reply)?;

        self.interpreter.record_request();
        FileRecord::parse(body)
    }

    /// [`file_info`](Self::file_info) for the last file uploaded through this client.
    pub fn last_file_info(&mut self) -> Result<FileRecord, Error> {
        let id = self.last_file_id.clone().ok_or(Error::NoUpload)?;
        self.file_info(&id)
    }

    pub fn request_count(&self) -> u64 {
        self.interpreter.request_count()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    pub fn last_file_id(&self) -> Option<&str> {
        self.last_file_id.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn verdicts(&self) -> &VerdictOptions {
        self.interpreter.options()
    }

    pub fn verdicts_mut(&mut self) -> &mut VerdictOptions {
        self.interpreter.options_mut()
    }

    /// Verdict returned when the service answers `unknown`.
    pub fn set_unknown_verdict(&mut self, verdict: impl Into<Verdict>) {
        self.verdicts_mut().unknown = verdict.into();
    }

    pub fn set_disposable_verdict(&mut self, verdict: impl Into<Verdict>) {
        self.verdicts_mut().disposable = verdict.into();
    }

    pub fn set_not_exists_verdict(&mut self, verdict: impl Into<Verdict>) {
        self.verdicts_mut().not_exists = verdict.into();
    }

    pub fn set_disabled_verdict(&mut self, verdict: impl Into<Verdict>) {
        self.verdicts_mut().disabled = verdict.into();
    }

    pub fn set_spam_trap_verdict(&mut self, verdict: impl Into<Verdict>) {
        self.verdicts_mut().spam_trap = verdict.into();
    }
}

fn expect_body(reply: &HttpReply) -> Result<&str, Error> {
    reply.text().ok_or_else(|| {
        crate::trace_event!(warn, status = ?reply.status, "no response body");
        Error::transport(reply.status)
    })
}
