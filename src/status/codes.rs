use std::fmt;
use std::str::FromStr;

use phf::phf_map;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Every status token the verification endpoint is known to return.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    OkForAll,
    AcceptAll,
    Ok,
    Fail,
    UnknownEmail,
    SmtpError,
    SmtpProtocol,
    AttemptRejected,
    DomainError,
    DeadServer,
    Error,
    Unknown,
    Disposable,
    EmailDisabled,
    SpamTraps,
    AntispamSystem,
    RelayError,
    SyntaxError,
    Incorrect,
    KeyNotValid,
    // the service really spells it this way
    #[cfg_attr(feature = "with-serde", serde(rename = "missing_paramteres"))]
    MissingParameters,
}

/// Coarse grouping of [`StatusCode`]s, one per interpretation rule.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Valid,
    Invalid,
    NotExists,
    Unknown,
    Disposable,
    Disabled,
    SpamTrap,
    /// The request was rejected; no verification took place.
    HardFailure,
}

static STATUS_CODES: phf::Map<&'static str, StatusCode> = phf_map! {
    "ok_for_all" => StatusCode::OkForAll,
    "accept_all" => StatusCode::AcceptAll,
    "ok" => StatusCode::Ok,
    "fail" => StatusCode::Fail,
    "unknown_email" => StatusCode::UnknownEmail,
    "smtp_error" => StatusCode::SmtpError,
    "smtp_protocol" => StatusCode::SmtpProtocol,
    "attempt_rejected" => StatusCode::AttemptRejected,
    "domain_error" => StatusCode::DomainError,
    "dead_server" => StatusCode::DeadServer,
    "error" => StatusCode::Error,
    "unknown" => StatusCode::Unknown,
    "disposable" => StatusCode::Disposable,
    "email_disabled" => StatusCode::EmailDisabled,
    "spam_traps" => StatusCode::SpamTraps,
    "antispam_system" => StatusCode::AntispamSystem,
    "relay_error" => StatusCode::RelayError,
    "syntax_error" => StatusCode::SyntaxError,
    "incorrect" => StatusCode::Incorrect,
    "key_not_valid" => StatusCode::KeyNotValid,
    "missing_paramteres" => StatusCode::MissingParameters,
};

impl StatusCode {
    /// Exact, case-sensitive lookup of a status token.
    pub fn parse(token: &str) -> Option<Self> {
        STATUS_CODES.get(token).copied()
    }

    /// Iterates over the whole vocabulary (order unspecified).
    pub fn all() -> impl Iterator<Item = StatusCode> {
        STATUS_CODES.values().copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OkForAll => "ok_for_all",
            Self::AcceptAll => "accept_all",
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::UnknownEmail => "unknown_email",
            Self::SmtpError => "smtp_error",
            Self::SmtpProtocol => "smtp_protocol",
            Self::AttemptRejected => "attempt_rejected",
            Self::DomainError => "domain_error",
            Self::DeadServer => "dead_server",
            Self::Error => "error",
            Self::Unknown => "unknown",
            Self::Disposable => "disposable",
            Self::EmailDisabled => "email_disabled",
            Self::SpamTraps => "spam_traps",
            Self::AntispamSystem => "antispam_system",
            Self::RelayError => "relay_error",
            Self::SyntaxError => "syntax_error",
            Self::Incorrect => "incorrect",
            Self::KeyNotValid => "key_not_valid",
            Self::MissingParameters => "missing_paramteres",
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            Self::OkForAll | Self::AcceptAll | Self::Ok => StatusCategory::Valid,
            Self::Fail
            | Self::SmtpError
            | Self::SmtpProtocol
            | Self::AttemptRejected
            | Self::DomainError
            | Self::DeadServer
            | Self::Error => StatusCategory::Invalid,
            Self::UnknownEmail => StatusCategory::NotExists,
            Self::Unknown => StatusCategory::Unknown,
            Self::Disposable => StatusCategory::Disposable,
            Self::EmailDisabled => StatusCategory::Disabled,
            Self::SpamTraps => StatusCategory::SpamTrap,
            Self::AntispamSystem
            | Self::RelayError
            | Self::SyntaxError
            | Self::Incorrect
            | Self::KeyNotValid
            | Self::MissingParameters => StatusCategory::HardFailure,
        }
    }

    /// Whether receiving this code counts as a completed verification request.
    pub fn counts(&self) -> bool {
        self.category() != StatusCategory::HardFailure
    }

    /// The error reported for a hard-failure code, `None` for every other code.
    pub fn failure(&self) -> Option<Error> {
        match self {
            Self::AntispamSystem => Some(Error::AntiSpamBlocked),
            Self::RelayError => Some(Error::RelayError),
            Self::SyntaxError | Self::Incorrect => Some(Error::SyntaxError {
                status: self.as_str().to_string(),
            }),
            Self::KeyNotValid => Some(Error::InvalidApiKey),
            Self::MissingParameters => Some(Error::NoValidationsRemaining),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::unknown_status(s))
    }
}
