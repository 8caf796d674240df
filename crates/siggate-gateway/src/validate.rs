//! Structural and semantic request validation.
//!
//! Runs before any cryptography: cheap checks first, so malformed requests
//! never reach a verifier. Everything here maps to HTTP 400.

use rust_decimal::Decimal;
use siggate_types::{
    ChainKind, GuardConfig, OrderPayload, Result, SignedRequest, SiggateError,
    constants::{MAX_PROVIDER_LEN, MAX_SYMBOL_LEN},
};

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiggateError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(SiggateError::NonPositiveAmount {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<()> {
    require(field, value)?;
    if value.len() > max {
        return Err(SiggateError::MalformedField {
            field: field.to_string(),
            reason: format!("longer than {max} characters"),
        });
    }
    Ok(())
}

/// Validate the request envelope and shape the order payload.
///
/// # Errors
/// Any structural problem: missing or oversized fields, a nonce below the
/// configured minimum length, a payload that does not match the action, a
/// non-positive amount, or a TON request without a proof.
pub fn validate_request(request: &SignedRequest, config: &GuardConfig) -> Result<OrderPayload> {
    require("walletAddress", &request.wallet_address)?;
    require("nonce", &request.nonce)?;
    if request.nonce.len() < config.min_nonce_len {
        return Err(SiggateError::NonceTooShort {
            min: config.min_nonce_len,
        });
    }
    match request.chain_type {
        ChainKind::Ton => {
            if request.ton_proof.is_none() {
                return Err(SiggateError::MissingField {
                    field: "tonProof".to_string(),
                });
            }
        }
        _ => require("signature", &request.signature)?,
    }

    let payload = OrderPayload::from_value(request.action, &request.order)?;
    match &payload {
        OrderPayload::Limit(o) => {
            positive("amount", o.amount)?;
            positive("targetPrice", o.target_price)?;
            bounded("fromSymbol", &o.from_symbol, MAX_SYMBOL_LEN)?;
            bounded("toSymbol", &o.to_symbol, MAX_SYMBOL_LEN)?;
        }
        OrderPayload::Dca(o) => {
            positive("amountPerInterval", o.amount_per_interval)?;
            bounded("fromSymbol", &o.from_symbol, MAX_SYMBOL_LEN)?;
            bounded("toSymbol", &o.to_symbol, MAX_SYMBOL_LEN)?;
        }
        OrderPayload::Bridge(o) => {
            positive("amountIn", o.amount_in)?;
            positive("amountOut", o.amount_out)?;
            bounded("fromToken", &o.from_token, MAX_SYMBOL_LEN)?;
            bounded("toToken", &o.to_token, MAX_SYMBOL_LEN)?;
            if let Some(provider) = &o.provider {
                bounded("provider", provider, MAX_PROVIDER_LEN)?;
            }
            if o.from_chain_id == o.to_chain_id {
                return Err(SiggateError::InvalidOrder {
                    reason: "bridge source and destination chains must differ".to_string(),
                });
            }
        }
        OrderPayload::Ref(_) => {}
    }
    Ok(payload)
}
