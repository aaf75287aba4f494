#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::status::VerdictOptions;

pub const DEFAULT_BASE_URL: &str = "https://apps.emaillistverify.com/api/";

/// Configuration for [`VerificationClient`](crate::VerificationClient).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: String,
    pub verdicts: VerdictOptions,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            verdicts: VerdictOptions::default(),
        }
    }
}

impl ClientOptions {
    /// Full URL of `endpoint` under the configured base.
    pub fn endpoint(&self, endpoint: &str) -> String {
        join_endpoint(&self.base_url, endpoint)
    }
}

pub(crate) fn join_endpoint(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let options = ClientOptions::default();
        assert_eq!(
            options.endpoint("verifyEmail"),
            "https://apps.emaillistverify.com/api/verifyEmail"
        );

        let bare = ClientOptions {
            base_url: "http://localhost:8080/api".into(),
            ..ClientOptions::default()
        };
        assert_eq!(bare.endpoint("getApiFileInfo"), "http://localhost:8080/api/getApiFileInfo");
    }
}
