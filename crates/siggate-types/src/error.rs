//! Error taxonomy for the gateway.
//!
//! Every rejection carries a stable `SG_ERR_` code so operators can grep
//! logs and clients can branch without parsing prose. Codes are grouped by
//! hundred: 1xx structural, 2xx order validation, 3xx signature, 4xx
//! replay, 5xx ownership, 9xx internal.

use thiserror::Error;

use crate::order::OrderStatus;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SiggateError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiggateError {
    /// A required request field is absent or empty.
    #[error("SG_ERR_100: missing required field `{field}`")]
    MissingField { field: String },

    /// A request field is present but does not parse.
    #[error("SG_ERR_101: malformed field `{field}`: {reason}")]
    MalformedField { field: String, reason: String },

    /// The order payload fails a semantic validation rule.
    #[error("SG_ERR_200: invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// An amount field is zero or negative.
    #[error("SG_ERR_201: field `{field}` must be positive")]
    NonPositiveAmount { field: String },

    /// The requested status change is not allowed.
    #[error("SG_ERR_202: cannot transition order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The nonce is shorter than the configured minimum.
    #[error("SG_ERR_203: nonce must be at least {min} characters")]
    NonceTooShort { min: usize },

    /// The signature does not verify, or the recovered signer does not
    /// match the claimed wallet address.
    #[error("SG_ERR_300: signature verification failed")]
    SignatureInvalid,

    /// The request timestamp falls outside the freshness window.
    #[error("SG_ERR_301: request timestamp outside ±{skew_ms}ms window")]
    SignatureExpired { skew_ms: i64 },

    /// The nonce has already been consumed, by any wallet.
    #[error("SG_ERR_400: nonce already used: {nonce}")]
    NonceReused { nonce: String },

    /// The target order does not exist or is owned by a different wallet.
    /// Deliberately indistinguishable from not-found.
    #[error("SG_ERR_500: order not found")]
    OrderNotOwned,

    #[error("SG_ERR_900: internal error: {0}")]
    Internal(String),

    #[error("SG_ERR_901: storage error: {reason}")]
    Storage { reason: String },
}

impl SiggateError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "SG_ERR_100",
            Self::MalformedField { .. } => "SG_ERR_101",
            Self::InvalidOrder { .. } => "SG_ERR_200",
            Self::NonPositiveAmount { .. } => "SG_ERR_201",
            Self::InvalidTransition { .. } => "SG_ERR_202",
            Self::NonceTooShort { .. } => "SG_ERR_203",
            Self::SignatureInvalid => "SG_ERR_300",
            Self::SignatureExpired { .. } => "SG_ERR_301",
            Self::NonceReused { .. } => "SG_ERR_400",
            Self::OrderNotOwned => "SG_ERR_500",
            Self::Internal(_) => "SG_ERR_900",
            Self::Storage { .. } => "SG_ERR_901",
        }
    }

    /// HTTP status an API layer should map this error to.
    ///
    /// - 400: structural / validation problems the client can fix
    /// - 401: authentication failures (bad signature, replayed nonce)
    /// - 404: missing or not-owned order (indistinguishable on purpose)
    /// - 500: server-side faults
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingField { .. }
            | Self::MalformedField { .. }
            | Self::InvalidOrder { .. }
            | Self::NonPositiveAmount { .. }
            | Self::InvalidTransition { .. }
            | Self::NonceTooShort { .. }
            | Self::SignatureExpired { .. } => 400,
            Self::SignatureInvalid | Self::NonceReused { .. } => 401,
            Self::OrderNotOwned => 404,
            Self::Internal(_) | Self::Storage { .. } => 500,
        }
    }
}
