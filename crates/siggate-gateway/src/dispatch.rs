//! The request pipeline.
//!
//! Every signed order request moves through the same fixed stages:
//!
//! 1. structural validation (cheap, no crypto)
//! 2. freshness window check
//! 3. canonical message reconstruction
//! 4. signature verification
//! 5. nonce consumption, under the **verified** signer
//! 6. commit against the order store
//!
//! The order is load-bearing. Validation and freshness run before any
//! crypto so garbage is cheap to reject; the nonce is consumed only after
//! the signature verifies so a forged request cannot burn a victim's
//! nonce; and the commit uses the recovered signer as owner, never the
//! client-asserted address.

use chrono::Utc;
use siggate_guard::{NonceStore, ReplayGuard};
use siggate_types::{
    Action, ApiResponse, ChainKind, GuardConfig, OrderBody, OrderPayload, OrderRecord,
    OrderStatus, RequestId, Result, SignedRequest, SiggateError,
};
use siggate_verify::{TonContext, canonical_message, verify_signature};
use tracing::{info, warn};

use crate::store::OrderStore;
use crate::validate::validate_request;

/// The gateway's single entry point: validates, verifies and commits
/// signed order requests.
pub struct Dispatcher<N, S> {
    guard: ReplayGuard<N>,
    orders: S,
}

impl<N: NonceStore, S: OrderStore> Dispatcher<N, S> {
    #[must_use]
    pub fn new(nonces: N, orders: S, config: GuardConfig) -> Self {
        Self {
            guard: ReplayGuard::new(nonces, config),
            orders,
        }
    }

    #[must_use]
    pub fn orders(&self) -> &S {
        &self.orders
    }

    #[must_use]
    pub fn guard(&self) -> &ReplayGuard<N> {
        &self.guard
    }

    /// Run a request through the full pipeline.
    ///
    /// # Errors
    /// Any stage may reject; the error's `http_status()` tells an API
    /// layer which status to serve.
    pub fn handle(&self, request: &SignedRequest) -> Result<ApiResponse> {
        let request_id = RequestId::new();
        match self.process(request) {
            Ok(response) => {
                info!(
                    %request_id,
                    action = %request.action,
                    chain = %request.chain_type,
                    "request committed"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(
                    %request_id,
                    action = %request.action,
                    chain = %request.chain_type,
                    code = err.code(),
                    status = err.http_status(),
                    "request rejected"
                );
                Err(err)
            }
        }
    }

    fn process(&self, request: &SignedRequest) -> Result<ApiResponse> {
        let payload = validate_request(request, self.guard.config())?;

        let now_ms = Utc::now().timestamp_millis();
        self.guard.check_fresh(request.timestamp, now_ms)?;

        let message =
            canonical_message(request.action, &payload, request.timestamp, &request.nonce)?;

        let signer = self.verify(request, &message, now_ms)?;

        // Consumed under the verified signer: the claimed address never
        // reaches the nonce store.
        self.guard.consume(&request.nonce, &signer, request.action)?;

        let record = self.commit(request, payload, &signer)?;
        Ok(ApiResponse::committed(record))
    }

    fn verify(&self, request: &SignedRequest, message: &str, now_ms: i64) -> Result<String> {
        let ton = match (&request.chain_type, &request.ton_proof) {
            (ChainKind::Ton, Some(proof)) => {
                // Clients echo the proof payload at the top level too;
                // when they do, the copies must agree.
                if let Some(echoed) = &request.payload {
                    if echoed != &proof.payload {
                        return Err(SiggateError::MalformedField {
                            field: "payload".to_string(),
                            reason: "does not match tonProof.payload".to_string(),
                        });
                    }
                }
                Some(TonContext {
                    proof,
                    max_age_secs: self.guard.config().ton_proof_max_age_secs,
                    now_secs: now_ms / 1000,
                })
            }
            _ => None,
        };

        let verification = verify_signature(
            request.chain_type,
            message,
            &request.signature,
            &request.wallet_address,
            ton,
        );
        match verification.recovered_address {
            Some(signer) if verification.valid => Ok(signer),
            _ => Err(SiggateError::SignatureInvalid),
        }
    }

    fn commit(
        &self,
        request: &SignedRequest,
        payload: OrderPayload,
        signer: &str,
    ) -> Result<OrderRecord> {
        match (request.action, payload) {
            (Action::CreateOrder, OrderPayload::Limit(order)) => self.orders.insert(
                OrderRecord::new(signer.to_string(), request.chain_type, OrderBody::Limit(order)),
            ),
            (Action::CreateDca, OrderPayload::Dca(order)) => self.orders.insert(
                OrderRecord::new(signer.to_string(), request.chain_type, OrderBody::Dca(order)),
            ),
            (Action::CreateBridgeIntent, OrderPayload::Bridge(mut intent)) => {
                intent.intent_id = None;
                self.orders.insert(OrderRecord::new(
                    signer.to_string(),
                    request.chain_type,
                    OrderBody::Bridge(intent),
                ))
            }
            (Action::UpdateBridgeIntent, OrderPayload::Bridge(mut intent)) => {
                let Some(id) = intent.intent_id.take() else {
                    return Err(SiggateError::MissingField {
                        field: "intentId".to_string(),
                    });
                };
                self.orders.update(id, signer, &move |record| {
                    if !record.body.is_bridge() {
                        return Err(SiggateError::InvalidOrder {
                            reason: "target order is not a bridge intent".to_string(),
                        });
                    }
                    if record.status != OrderStatus::Active {
                        return Err(SiggateError::InvalidOrder {
                            reason: "only active bridge intents can be updated".to_string(),
                        });
                    }
                    record.body = OrderBody::Bridge(intent.clone());
                    record.updated_at = Utc::now();
                    Ok(())
                })
            }
            (Action::CancelOrder, OrderPayload::Ref(target)) => {
                self.orders.update(target.order_id, signer, &|record| {
                    if record.body.is_dca() {
                        return Err(SiggateError::InvalidOrder {
                            reason: "DCA orders are cancelled via cancel-dca".to_string(),
                        });
                    }
                    record.transition(OrderStatus::Cancelled)
                })
            }
            (
                action @ (Action::PauseDca | Action::ResumeDca | Action::CancelDca),
                OrderPayload::Ref(target),
            ) => {
                let status = match action {
                    Action::PauseDca => OrderStatus::Paused,
                    Action::ResumeDca => OrderStatus::Active,
                    _ => OrderStatus::Cancelled,
                };
                self.orders.update(target.order_id, signer, &move |record| {
                    if !record.body.is_dca() {
                        return Err(SiggateError::InvalidOrder {
                            reason: "target order is not a DCA order".to_string(),
                        });
                    }
                    record.transition(status)
                })
            }
            (action, _) => Err(SiggateError::Internal(format!(
                "payload shape does not match action {action}"
            ))),
        }
    }
}
