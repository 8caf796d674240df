//! Chain and action enums: the two axes every signed request is routed on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which signature scheme family the wallet belongs to.
///
/// Each variant has exactly one verification strategy in `siggate-verify`;
/// the strategies share no state and are dispatched by a `match` on this
/// enum (tagged-union dispatch, no inheritance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// EVM wallets: EIP-191 personal-sign, ECDSA public-key recovery.
    Evm,
    /// Solana wallets: Ed25519 over the raw message bytes, base58 keys.
    Solana,
    /// Tron wallets: EVM personal-sign (TronLink quirk), base58-check address.
    Tron,
    /// Sui wallets: scheme-flagged Ed25519 over the intent-wrapped digest.
    Sui,
    /// TON wallets: ton-proof-item-v2 double-SHA-256 envelope.
    Ton,
}

impl ChainKind {
    /// All chain kinds, in wire order.
    pub const ALL: [Self; 5] = [Self::Evm, Self::Solana, Self::Tron, Self::Sui, Self::Ton];
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evm => write!(f, "evm"),
            Self::Solana => write!(f, "solana"),
            Self::Tron => write!(f, "tron"),
            Self::Sui => write!(f, "sui"),
            Self::Ton => write!(f, "ton"),
        }
    }
}

/// The order action a signed request authorizes.
///
/// The wire form is kebab-case (`create-order`, `pause-dca`, ...). Each
/// action has exactly one canonical message template and one payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    CreateOrder,
    CancelOrder,
    CreateDca,
    PauseDca,
    ResumeDca,
    CancelDca,
    CreateBridgeIntent,
    UpdateBridgeIntent,
}

impl Action {
    /// Whether this action creates a new record (as opposed to mutating one).
    #[must_use]
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateOrder | Self::CreateDca | Self::CreateBridgeIntent
        )
    }

    /// The capitalized verb used in canonical message templates for the
    /// DCA mutation actions (`Pause`, `Resume`, `Cancel`).
    #[must_use]
    pub fn dca_verb(&self) -> Option<&'static str> {
        match self {
            Self::PauseDca => Some("Pause"),
            Self::ResumeDca => Some("Resume"),
            Self::CancelDca => Some("Cancel"),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CreateOrder => "create-order",
            Self::CancelOrder => "cancel-order",
            Self::CreateDca => "create-dca",
            Self::PauseDca => "pause-dca",
            Self::ResumeDca => "resume-dca",
            Self::CancelDca => "cancel-dca",
            Self::CreateBridgeIntent => "create-bridge-intent",
            Self::UpdateBridgeIntent => "update-bridge-intent",
        };
        write!(f, "{s}")
    }
}
