//! Payment endpoints: checkout creation and status polling.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use chrono::{DateTime, Utc};
use mollie::models::{Amount, CreatePayment};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::common::{ApiError, ApiResult};
use crate::domains::bookings::{Booking, Resource};
use crate::domains::payments::{reconcile_payment, Reconciliation};
use crate::domains::scheduling::{is_available, TimeWindow};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub resource_id: String,
    pub user_email: String,
    pub user_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPaymentData {
    pub id: String,
    pub status: String,
    /// Hosted checkout page to send the user to
    pub checkout_url: Option<String>,
    pub billed_hours: i64,
    pub total_cents: i64,
}

/// Start checkout for a booking request
///
/// Validates the window, runs an advisory availability check (the binding
/// check happens at reconciliation time, after payment), prices the window,
/// and creates a gateway payment carrying the booking details as metadata.
pub async fn create_payment_handler(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> ApiResult<Json<CreatedPaymentData>> {
    let deps = &state.deps;

    if request.user_email.trim().is_empty() {
        return Err(ApiError::Validation("user_email is required".to_string()));
    }

    let window = TimeWindow::new(request.start, request.end)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let resource = Resource::find_by_id(&request.resource_id, &deps.db_pool)
        .await
        .map_err(ApiError::store)?
        .ok_or(ApiError::NotFound("resource"))?;

    let held: Vec<TimeWindow> = Booking::find_for_resource(&resource.id, &deps.db_pool)
        .await
        .map_err(ApiError::store)?
        .iter()
        .filter_map(Booking::window)
        .collect();

    if !is_available(resource.category(), &held, &window, &deps.policy) {
        return Err(ApiError::Conflict(format!(
            "{} is not available for the requested window",
            resource.name
        )));
    }

    let billed_hours = window.billed_hours();
    let total_cents = billed_hours * resource.hourly_rate_cents;

    let metadata = json!({
        "userId": request.user_id,
        "userEmail": request.user_email,
        "resourceId": resource.id,
        "resourceName": resource.name,
        "type": resource.category,
        "location": resource.location,
        "startIso": window.start().to_rfc3339(),
        "endIso": window.end().to_rfc3339(),
    });

    let gateway_request = CreatePayment {
        amount: Amount::from_cents("EUR", total_cents),
        description: format!("Harborview booking: {}", resource.name),
        redirect_url: format!("{}/payments/complete", deps.public_base_url),
        webhook_url: Some(format!("{}/webhooks/payments", deps.public_base_url)),
        metadata,
    };

    let payment = deps.payments.create_payment(&gateway_request).await?;

    tracing::info!(
        payment_id = %payment.id,
        resource_id = %resource.id,
        billed_hours,
        total_cents,
        "checkout created"
    );

    Ok(Json(CreatedPaymentData {
        id: payment.id.clone(),
        status: payment.status.clone(),
        checkout_url: payment.checkout_url().map(str::to_string),
        billed_hours,
        total_cents,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub id: Option<String>,
}

/// Poll a payment's status from the app
///
/// Runs the same reconciliation as the webhook, so a booking records even if
/// every webhook delivery was lost: the app polling after checkout is the
/// fallback delivery path.
pub async fn payment_status_handler(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> ApiResult<Json<Reconciliation>> {
    let id = params.id.unwrap_or_default();
    let outcome = reconcile_payment(&state.deps, &id).await?;
    Ok(Json(outcome))
}

/// Landing page the gateway redirects the user back to after checkout
pub async fn payment_complete_handler() -> Html<&'static str> {
    Html(
        "<!doctype html><html><body style=\"font-family: sans-serif; text-align: center; padding-top: 4rem;\">\
         <h2>Payment received</h2>\
         <p>You can close this window and return to the app.</p>\
         </body></html>",
    )
}
