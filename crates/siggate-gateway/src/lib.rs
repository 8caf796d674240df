//! The request gateway: structural validation, the verification pipeline
//! and order persistence.
//!
//! [`Dispatcher::handle`] is the single entry point. An HTTP layer only
//! needs to deserialize a `SignedRequest`, call it, and map errors via
//! `SiggateError::http_status()`.

pub mod dispatch;
pub mod store;
pub mod validate;

pub use dispatch::Dispatcher;
pub use store::{MemoryOrderStore, OrderStore};
pub use validate::validate_request;
