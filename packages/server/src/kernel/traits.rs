// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "reconcile a payment") lives in domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BasePaymentGateway)

use anyhow::Result;
use async_trait::async_trait;
use mollie::models::{CreatePayment, Payment};
use mollie::MollieError;

// =============================================================================
// Payment Gateway Trait (Infrastructure - hosted checkout + status)
// =============================================================================

#[async_trait]
pub trait BasePaymentGateway: Send + Sync {
    /// Fetch the authoritative state of a payment by id.
    ///
    /// Errors keep their `MollieError` shape so callers can separate an
    /// unknown id (terminal) from a gateway outage (retryable).
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, MollieError>;

    /// Create a payment with the gateway and return it, including the
    /// hosted-checkout link the app redirects the user to.
    async fn create_payment(&self, request: &CreatePayment) -> Result<Payment, MollieError>;
}

// =============================================================================
// Mailer Trait (Infrastructure - transactional email)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send a single HTML email. The implementation owns the from-address.
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}
