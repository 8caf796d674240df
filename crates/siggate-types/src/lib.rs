//! # siggate-types
//!
//! Shared types, errors, and configuration for the **SigGate**
//! signed-order authorization gateway.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`RequestId`]
//! - **Wire model**: [`SignedRequest`], [`TonProof`], [`ApiResponse`], [`ErrorBody`]
//! - **Action model**: [`Action`], [`ChainKind`]
//! - **Order model**: [`LimitOrder`], [`DcaOrder`], [`BridgeIntent`],
//!   [`OrderPayload`], [`OrderRecord`], [`OrderStatus`]
//! - **Replay model**: [`ConsumedNonce`]
//! - **Configuration**: [`GuardConfig`]
//! - **Errors**: [`SiggateError`] with `SG_ERR_` prefix codes and the
//!   HTTP status taxonomy
//! - **Constants**: system-wide limits and defaults

pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod nonce;
pub mod order;
pub mod request;

// Re-export all primary types at crate root for ergonomic imports:
//   use siggate_types::{SignedRequest, Action, ChainKind, OrderRecord, ...};

pub use chain::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use nonce::*;
pub use order::*;
pub use request::*;

// Constants are accessed via `siggate_types::constants::FOO`
// (not re-exported to avoid name collisions).
