#![forbid(unsafe_code)]
//! elv_client — client for the EmailListVerify API.
//!
//! ```no_run
//! use elv_client::{Verdict, VerificationClient};
//!
//! # fn main() -> Result<(), elv_client::Error> {
//! let mut client = VerificationClient::http("my-api-key")?;
//! client.set_unknown_verdict(Verdict::Invalid);
//!
//! match client.verify_email("alice@example.com")? {
//!     Verdict::Valid => println!("deliverable"),
//!     other => println!("{other} ({:?})", client.last_status()),
//! }
//! # Ok(())
//! # }
//! ```

/// Emits a `tracing` event when the `with-tracing` feature is on, nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "with-tracing")]
        tracing::$level!($($arg)+);
    };
}
pub(crate) use trace_event;

pub mod client;
pub mod error;
pub mod record;
pub mod status;
pub mod transport;

pub use client::{ClientOptions, DEFAULT_BASE_URL, VerificationClient};
pub use error::Error;
pub use record::FileRecord;
pub use status::{StatusCategory, StatusCode, StatusInterpreter, Verdict, VerdictOptions};
pub use transport::{FileUpload, HttpReply, Transport};

#[cfg(feature = "with-http")]
pub use transport::{HttpOptions, HttpTransport};

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
