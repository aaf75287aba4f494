#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::Verdict;

/// Verdicts substituted for the ambiguous status categories.
///
/// Definite codes (`ok`, `fail`, ...) always map to [`Verdict::Valid`] or
/// [`Verdict::Invalid`]; only the slots below are caller-configurable.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictOptions {
    /// Returned for `unknown`. Defaults to [`Verdict::Undetermined`].
    pub unknown: Verdict,
    /// Returned for `disposable`. Defaults to [`Verdict::Valid`].
    pub disposable: Verdict,
    /// Returned for `unknown_email`. Defaults to [`Verdict::Invalid`].
    pub not_exists: Verdict,
    /// Returned for `email_disabled`. Defaults to [`Verdict::Invalid`].
    pub disabled: Verdict,
    /// Returned for `spam_traps`. Defaults to [`Verdict::Invalid`].
    pub spam_trap: Verdict,
}

impl Default for VerdictOptions {
    fn default() -> Self {
        Self {
            unknown: Verdict::Undetermined,
            disposable: Verdict::Valid,
            not_exists: Verdict::Invalid,
            disabled: Verdict::Invalid,
            spam_trap: Verdict::Invalid,
        }
    }
}

impl VerdictOptions {
    /// Treats every ambiguous category as invalid.
    pub fn strict() -> Self {
        Self {
            unknown: Verdict::Invalid,
            disposable: Verdict::Invalid,
            ..Self::default()
        }
    }

    pub fn with_unknown(mut self, verdict: Verdict) -> Self {
        self.unknown = verdict;
        self
    }

    pub fn with_disposable(mut self, verdict: Verdict) -> Self {
        self.disposable = verdict;
        self
    }

    pub fn with_not_exists(mut self, verdict: Verdict) -> Self {
        self.not_exists = verdict;
        self
    }

    pub fn with_disabled(mut self, verdict: Verdict) -> Self {
        self.disabled = verdict;
        self
    }

    pub fn with_spam_trap(mut self, verdict: Verdict) -> Self {
        self.spam_trap = verdict;
        self
    }
}
