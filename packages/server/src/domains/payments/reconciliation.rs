use mollie::models::Payment;
use serde::Serialize;

use crate::common::{ApiError, ApiResult};
use crate::domains::bookings::{Booking, CreateOutcome};
use crate::domains::payments::booking_draft;
use crate::kernel::ServerDeps;

/// Where the booking ended up after reconciling one payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingState {
    /// A booking row exists for this payment (created now or earlier)
    Recorded,
    /// Paid, but the window was already taken; no row written
    Conflict,
    /// Payment not (yet) paid; nothing recorded
    None,
}

/// Result of one reconciliation pass, returned to webhook and poll callers
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    /// Gateway payment id
    pub id: String,
    /// Gateway payment status verbatim ("open", "paid", ...)
    pub status: String,
    pub booking: BookingState,
    /// Whether the confirmation email has been sent, by this pass or an
    /// earlier one
    pub notified: bool,
}

/// Reconcile one payment against the gateway and the booking store
///
/// Safe to call any number of times for the same id, from the webhook and
/// the status poll concurrently. The gateway's status is fetched fresh on
/// every call and treated as ground truth; nothing the client sent is
/// trusted beyond the id itself.
///
/// A mailer failure is deliberately non-fatal: the booking stays recorded,
/// the notified flag is released again, and the caller still gets a success
/// so the gateway does not re-deliver just to retry an email.
pub async fn reconcile_payment(deps: &ServerDeps, payment_id: &str) -> ApiResult<Reconciliation> {
    if payment_id.trim().is_empty() {
        return Err(ApiError::Validation("payment id is required".to_string()));
    }

    let payment = deps.payments.fetch_payment(payment_id).await?;

    if !payment.is_paid() {
        tracing::info!(
            payment_id = %payment.id,
            status = %payment.status,
            "payment not paid; nothing to reconcile"
        );
        return Ok(Reconciliation {
            id: payment.id.clone(),
            status: payment.status.clone(),
            booking: BookingState::None,
            notified: false,
        });
    }

    let draft = booking_draft(&payment);
    let outcome = Booking::create_if_absent(&draft, &deps.db_pool)
        .await
        .map_err(ApiError::store)?;

    let booking = match outcome {
        CreateOutcome::Created(booking) => {
            tracing::info!(
                payment_id = %booking.payment_id,
                resource_id = %booking.resource_id,
                total_cents = booking.total_cents,
                "booking recorded"
            );
            booking
        }
        CreateOutcome::Existing(booking) => {
            tracing::info!(
                payment_id = %booking.payment_id,
                "booking already recorded; duplicate delivery"
            );
            booking
        }
        CreateOutcome::Conflict => {
            tracing::warn!(
                payment_id = %payment.id,
                resource_id = %draft.resource_id,
                "paid payment lost its window to another booking; needs manual follow-up"
            );
            return Ok(Reconciliation {
                id: payment.id.clone(),
                status: payment.status.clone(),
                booking: BookingState::Conflict,
                notified: false,
            });
        }
    };

    let notified = notify_if_first(deps, &payment, &booking).await;

    Ok(Reconciliation {
        id: payment.id.clone(),
        status: payment.status.clone(),
        booking: BookingState::Recorded,
        notified,
    })
}

/// Send the confirmation email if this pass won the notified claim.
/// Returns whether the email has been sent (now or previously).
async fn notify_if_first(deps: &ServerDeps, payment: &Payment, booking: &Booking) -> bool {
    let claimed = match Booking::set_notified(&booking.payment_id, &deps.db_pool).await {
        Ok(claimed) => claimed,
        Err(error) => {
            tracing::error!(
                payment_id = %booking.payment_id,
                error = %error,
                "could not claim notified flag; skipping email this pass"
            );
            return false;
        }
    };

    if !claimed {
        tracing::debug!(
            payment_id = %booking.payment_id,
            "confirmation already sent or in flight"
        );
        return true;
    }

    let to = deps
        .mail_override_to
        .as_deref()
        .unwrap_or(&booking.user_email);
    let (subject, html) = confirmation_email(payment, booking);

    match deps.mailer.send_email(to, &subject, &html).await {
        Ok(()) => {
            tracing::info!(payment_id = %booking.payment_id, to, "confirmation email sent");
            true
        }
        Err(error) => {
            tracing::error!(
                payment_id = %booking.payment_id,
                to,
                error = %error,
                "confirmation email failed; releasing notified flag for retry"
            );
            if let Err(error) = Booking::clear_notified(&booking.payment_id, &deps.db_pool).await {
                tracing::error!(
                    payment_id = %booking.payment_id,
                    error = %error,
                    "could not release notified flag"
                );
            }
            false
        }
    }
}

fn confirmation_email(payment: &Payment, booking: &Booking) -> (String, String) {
    let subject = "Harborview booking payment paid".to_string();
    let description = payment
        .description
        .as_deref()
        .unwrap_or("Harborview booking");

    let html = format!(
        "<h2>Payment received</h2>\
         <p>Your payment for <strong>{}</strong> is confirmed.</p>\
         <p>Resource: <strong>{}</strong><br>\
         From: {}<br>\
         Until: {}</p>\
         <p>Amount: <strong>{} {}</strong></p>\
         <p>Booked for: {}</p>\
         <p>Payment reference: {}</p>",
        description,
        booking.resource_name,
        booking.starts_at.to_rfc3339(),
        booking.ends_at.to_rfc3339(),
        payment.amount.currency,
        payment.amount.value,
        booking.user_email,
        booking.payment_id,
    );

    (subject, html)
}
