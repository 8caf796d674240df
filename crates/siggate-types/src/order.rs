//! Order payloads and the persisted order record.
//!
//! Payloads are what the client signs over (after server-side canonical
//! re-derivation); the [`OrderRecord`] is what the gateway persists once a
//! signature has verified. The record's `owner` is **always** the
//! cryptographically recovered address, never the client-asserted one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Action, ChainKind, OrderId, Result, SiggateError};

/// Trigger condition for a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Above,
    Below,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}

/// Execution frequency for a DCA order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hourly => write!(f, "hourly"),
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Payload for `create-order`: a trigger-price limit swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    /// Amount of the source token to swap.
    pub amount: Decimal,
    /// Source token symbol (e.g. "USDC").
    pub from_symbol: String,
    /// Destination token symbol (e.g. "ETH").
    pub to_symbol: String,
    /// Trigger direction relative to `target_price`.
    pub condition: Condition,
    /// Trigger price in USD.
    pub target_price: Decimal,
    /// Chain index the swap executes on.
    pub chain_index: u32,
}

/// Payload for `create-dca`: a recurring swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaOrder {
    /// Amount of the source token swapped each interval.
    pub amount_per_interval: Decimal,
    /// Source token symbol.
    pub from_symbol: String,
    /// Destination token symbol.
    pub to_symbol: String,
    /// How often the swap executes.
    pub frequency: Frequency,
    /// Chain index the swaps execute on.
    pub chain_index: u32,
}

/// Payload for `create-bridge-intent` / `update-bridge-intent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeIntent {
    /// Amount sent on the source chain.
    pub amount_in: Decimal,
    /// Amount expected on the destination chain.
    pub amount_out: Decimal,
    /// Source chain id.
    pub from_chain_id: u64,
    /// Destination chain id.
    pub to_chain_id: u64,
    /// Source token symbol.
    pub from_token: String,
    /// Destination token symbol.
    pub to_token: String,
    /// Optional bridge provider name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Target intent for `update-bridge-intent`. Not part of the signed
    /// message; ownership of the target record binds the update instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<OrderId>,
}

/// Payload for the mutation actions (`cancel-order`, `pause-dca`, ...):
/// a reference to an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub order_id: OrderId,
}

/// Parsed, action-shaped order payload.
///
/// The wire carries the payload as untyped JSON (`SignedRequest::order`);
/// [`OrderPayload::from_value`] is the structural-validation step that
/// shapes it according to the action.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPayload {
    Limit(LimitOrder),
    Dca(DcaOrder),
    Bridge(BridgeIntent),
    Ref(OrderRef),
}

impl OrderPayload {
    /// Shape the untyped `order` JSON value according to the action.
    ///
    /// # Errors
    /// Returns [`SiggateError::MalformedField`] when the value does not
    /// deserialize into the action's payload shape.
    pub fn from_value(action: Action, value: &serde_json::Value) -> Result<Self> {
        let malformed = |e: serde_json::Error| SiggateError::MalformedField {
            field: "order".to_string(),
            reason: e.to_string(),
        };
        match action {
            Action::CreateOrder => serde_json::from_value(value.clone())
                .map(Self::Limit)
                .map_err(malformed),
            Action::CreateDca => serde_json::from_value(value.clone())
                .map(Self::Dca)
                .map_err(malformed),
            Action::CreateBridgeIntent | Action::UpdateBridgeIntent => {
                serde_json::from_value(value.clone())
                    .map(Self::Bridge)
                    .map_err(malformed)
            }
            Action::CancelOrder | Action::PauseDca | Action::ResumeDca | Action::CancelDca => {
                serde_json::from_value(value.clone())
                    .map(Self::Ref)
                    .map_err(malformed)
            }
        }
    }
}

/// The persisted body of an order record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OrderBody {
    Limit(LimitOrder),
    Dca(DcaOrder),
    Bridge(BridgeIntent),
}

impl OrderBody {
    #[must_use]
    pub fn is_dca(&self) -> bool {
        matches!(self, Self::Dca(_))
    }

    #[must_use]
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::Limit(_))
    }

    #[must_use]
    pub fn is_bridge(&self) -> bool {
        matches!(self, Self::Bridge(_))
    }
}

/// Lifecycle status of a persisted order.
///
/// Transitions are **monotonic**:
/// - `Active ↔ Paused` (DCA orders only)
/// - `Active | Paused → Cancelled` (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Paused,
    Cancelled,
}

impl OrderStatus {
    /// Can this status transition to the given target status?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Paused | Self::Cancelled)
                | (Self::Paused, Self::Active | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A persisted order, owned by a verified wallet address.
///
/// Created only after signature verification succeeds. `owner` is set from
/// the recovered address; mutations re-verify ownership against a freshly
/// recovered signer on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    /// Cryptographically recovered owner address.
    pub owner: String,
    /// Signature scheme family the order was authorized under.
    pub chain: ChainKind,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub body: OrderBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Create a new ACTIVE record owned by `owner`.
    #[must_use]
    pub fn new(owner: String, chain: ChainKind, body: OrderBody) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            owner,
            chain,
            status: OrderStatus::Active,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attempt a status transition, updating `updated_at` on success.
    ///
    /// # Errors
    /// Returns [`SiggateError::InvalidTransition`] when the transition is
    /// not allowed from the current status.
    pub fn transition(&mut self, target: OrderStatus) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(SiggateError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}
