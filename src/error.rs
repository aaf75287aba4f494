use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the EmailListVerify client.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport did not return a response body.
    #[error("request failed with HTTP code: {}", display_code(.status))]
    Transport { status: Option<u16> },
    #[error("unrecognized status returned by the service: {status:?}")]
    UnknownStatus { status: String },
    #[error("malformed file record ({reason}): {raw:?}")]
    MalformedRecord { raw: String, reason: String },
    #[error("can't upload {file_name}, file doesn't exist: {}", .file_path.display())]
    FileNotFound {
        file_name: String,
        file_path: PathBuf,
    },
    #[error("no file has been uploaded yet")]
    NoUpload,
    #[error("verification blocked by the remote anti-spam system")]
    AntiSpamBlocked,
    #[error("relay error reported by the remote mail server")]
    RelayError,
    /// Covers both `syntax_error` and `incorrect`.
    #[error("email syntax error or no email provided ({status})")]
    SyntaxError { status: String },
    #[error("no api key provided in request or invalid")]
    InvalidApiKey,
    #[error("there are no validations remaining to complete this attempt")]
    NoValidationsRemaining,
    #[cfg(feature = "with-http")]
    #[error("HTTP client initialization failed: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    pub(crate) fn transport(status: Option<u16>) -> Self {
        Self::Transport { status }
    }

    pub(crate) fn unknown_status(status: impl Into<String>) -> Self {
        Self::UnknownStatus {
            status: status.into(),
        }
    }

    pub(crate) fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// `true` when the service itself reported the failure (as opposed to a
    /// local or transport problem).
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::AntiSpamBlocked
                | Self::RelayError
                | Self::SyntaxError { .. }
                | Self::InvalidApiKey
                | Self::NoValidationsRemaining
        )
    }
}

fn display_code(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no code".to_string(),
    }
}
