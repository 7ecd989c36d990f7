//! Remote API client
//!
//! Request/response envelopes, the error type and the transports.

pub mod envelope;
pub mod error;
pub mod transport;

pub use envelope::{unwrap_envelope, Action, ApiRequest};
pub use error::{ApiError, ApiResult};
pub use transport::{retry_with_backoff, HttpTransport, Transport};
