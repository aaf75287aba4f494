//! Interpretation of the plain-text status codes returned by `verifyEmail`.
//!
//! The entry point is [`StatusInterpreter::interpret`], which classifies a
//! status token, advances the request counter for completed verifications and
//! returns a [`Verdict`] (or the error matching a hard-failure code).

mod codes;
mod options;
mod types;

pub use codes::{StatusCategory, StatusCode};
pub use options::VerdictOptions;
pub use types::Verdict;

use crate::error::Error;

/// Maps status tokens to verdicts and counts completed requests.
#[derive(Debug, Clone, Default)]
pub struct StatusInterpreter {
    options: VerdictOptions,
    request_count: u64,
}

impl StatusInterpreter {
    pub fn new(options: VerdictOptions) -> Self {
        Self {
            options,
            request_count: 0,
        }
    }

    pub fn options(&self) -> &VerdictOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut VerdictOptions {
        &mut self.options
    }

    /// Number of completed requests seen so far.
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Counts one completed request that did not go through [`interpret`](Self::interpret).
    pub fn record_request(&mut self) {
        self.request_count += 1;
    }

    /// Interprets a raw status token.
    ///
    /// The match is exact and case-sensitive. Tokens outside the vocabulary fail
    /// with [`Error::UnknownStatus`]; hard-failure codes fail with their own error
    /// and leave the counter untouched.
    pub fn interpret(&mut self, status: &str) -> Result<Verdict, Error> {
        let Some(code) = StatusCode::parse(status) else {
            crate::trace_event!(warn, status, "unrecognized verification status");
            return Err(Error::unknown_status(status));
        };
        let verdict = self.resolve(code)?;
        self.record_request();
        crate::trace_event!(
            debug,
            status = code.as_str(),
            %verdict,
            request_count = self.request_count,
            "status interpreted"
        );
        Ok(verdict)
    }

    /// Pure classification of `code` under the current options (no counting).
    pub fn resolve(&self, code: StatusCode) -> Result<Verdict, Error> {
        let verdict = match code.category() {
            StatusCategory::Valid => Verdict::Valid,
            StatusCategory::Invalid => Verdict::Invalid,
            StatusCategory::NotExists => self.options.not_exists,
            StatusCategory::Unknown => self.options.unknown,
            StatusCategory::Disposable => self.options.disposable,
            StatusCategory::Disabled => self.options.disabled,
            StatusCategory::SpamTrap => self.options.spam_trap,
            StatusCategory::HardFailure => {
                return Err(code
                    .failure()
                    .unwrap_or_else(|| Error::unknown_status(code.as_str())));
            }
        };
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests;
