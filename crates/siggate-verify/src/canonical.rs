//! Canonical message construction.
//!
//! The server never signs-what-it-received: it rebuilds the human-readable
//! message from the validated payload fields and verifies the wallet
//! signature against **that**. Any divergence between what the client
//! displayed and what it submitted therefore fails verification.
//!
//! The templates below are a wire contract. Changing a single byte
//! (spacing, arrow glyph, line order) invalidates every client signature.

use siggate_types::{Action, OrderPayload, Result, SiggateError};

/// Footer shared by every canonical message.
fn footer(timestamp: i64, nonce: &str) -> String {
    format!("\n\nTimestamp: {timestamp}\nNonce: {nonce}")
}

/// Rebuild the exact message the wallet was asked to sign.
///
/// # Errors
/// Returns [`SiggateError::Internal`] if the payload shape does not match
/// the action; the structural validator guarantees it does, so hitting
/// this indicates a gateway bug rather than bad client input.
pub fn canonical_message(
    action: Action,
    payload: &OrderPayload,
    timestamp: i64,
    nonce: &str,
) -> Result<String> {
    let body = match (action, payload) {
        (Action::CreateOrder, OrderPayload::Limit(o)) => format!(
            "Create limit order:\nSwap {} {} → {}\nTrigger: {} ${}\nChain: {}",
            o.amount, o.from_symbol, o.to_symbol, o.condition, o.target_price, o.chain_index
        ),
        (Action::CreateDca, OrderPayload::Dca(o)) => format!(
            "Create DCA order:\nSwap {} {} → {} per interval\nFrequency: {}\nChain: {}",
            o.amount_per_interval, o.from_symbol, o.to_symbol, o.frequency, o.chain_index
        ),
        (Action::CancelOrder, OrderPayload::Ref(r)) => {
            format!("Cancel limit order:\nOrder ID: {}", r.order_id)
        }
        (Action::PauseDca | Action::ResumeDca | Action::CancelDca, OrderPayload::Ref(r)) => {
            // dca_verb() is Some for exactly these three actions.
            let verb = action.dca_verb().ok_or_else(|| {
                SiggateError::Internal(format!("no DCA verb for action {action}"))
            })?;
            format!("{verb} DCA order:\nOrder ID: {}", r.order_id)
        }
        (Action::CreateBridgeIntent | Action::UpdateBridgeIntent, OrderPayload::Bridge(o)) => {
            let verb = if action == Action::CreateBridgeIntent {
                "Create"
            } else {
                "Update"
            };
            let mut body = format!(
                "{verb} bridge intent:\nSend {} {} (chain {})\nReceive {} {} (chain {})",
                o.amount_in, o.from_token, o.from_chain_id, o.amount_out, o.to_token, o.to_chain_id
            );
            if let Some(provider) = &o.provider {
                body.push_str(&format!("\nProvider: {provider}"));
            }
            body
        }
        (action, _) => {
            return Err(SiggateError::Internal(format!(
                "payload shape does not match action {action}"
            )));
        }
    };
    Ok(format!("{body}{}", footer(timestamp, nonce)))
}
