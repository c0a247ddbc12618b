//! Signed webhook delivery
//!
//! - Envelope - canonical `{action, data}` body
//! - Signing - HMAC-SHA1 `X-Hub-Signature` header
//! - Transport - blocking HTTP POST
//! - Dispatch - ties the three together, absorbing failures

pub mod dispatch;
pub mod envelope;
pub mod signing;
pub mod transport;

pub use dispatch::Dispatcher;
pub use envelope::{Fields, Scalar, parse_fields};
