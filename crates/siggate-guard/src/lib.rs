//! Replay protection for signed order requests.
//!
//! Two mechanisms, both required:
//!
//! - a **freshness window**: request timestamps must sit within a
//!   configurable skew of server time, bounding how long a captured
//!   request stays replayable at all, and
//! - a **single-use nonce**: each nonce is consumed atomically on first
//!   successful use, by whichever wallet gets there first, and rejected
//!   forever after, closing the window entirely.
//!
//! [`store::NonceStore`] abstracts persistence; [`guard::ReplayGuard`]
//! carries the policy.

pub mod guard;
pub mod store;

pub use guard::ReplayGuard;
pub use store::{MemoryNonceStore, NonceStore};
