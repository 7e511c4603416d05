//! Mollie payment webhook handler.
//!
//! Mollie POSTs a form-encoded `id=tr_...` whenever a payment changes state
//! and retries on any non-2xx response. The handler carries no payload state
//! beyond the id; everything else is re-fetched from the gateway, so a
//! spoofed or replayed delivery can at worst trigger a harmless extra
//! reconciliation pass.

use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;

use crate::common::ApiResult;
use crate::domains::payments::{reconcile_payment, Reconciliation};
use crate::server::app::AppState;

/// Payload Mollie sends: just the payment id
#[derive(Debug, Deserialize)]
pub struct PaymentWebhookPayload {
    pub id: Option<String>,
}

/// Handle a payment-state change pushed by the gateway
///
/// A missing id is a 400: there is nothing to reconcile and redelivering the
/// same body will never help. Gateway or store trouble is a 5xx so the
/// gateway's retry schedule brings the delivery back later.
pub async fn payment_webhook_handler(
    State(state): State<AppState>,
    Form(payload): Form<PaymentWebhookPayload>,
) -> ApiResult<Json<Reconciliation>> {
    let id = payload.id.unwrap_or_default();
    let outcome = reconcile_payment(&state.deps, &id).await?;
    Ok(Json(outcome))
}
