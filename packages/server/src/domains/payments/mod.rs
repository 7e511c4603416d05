//! Payments domain - gateway reconciliation
//!
//! Turns "the gateway says this payment is paid" into a booking row and a
//! confirmation email, idempotently. Both the webhook and the status poll
//! funnel into [`reconcile_payment`]; neither path trusts anything the
//! client sent beyond the payment id.

pub mod metadata;
pub mod reconciliation;

pub use metadata::booking_draft;
pub use reconciliation::{reconcile_payment, BookingState, Reconciliation};
