//! Server dependencies for handlers (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! operations. External services (payment gateway, mailer) sit behind trait
//! abstractions so tests can inject mocks.

use async_trait::async_trait;
use mollie::models::{CreatePayment, Payment};
use mollie::{MollieError, MollieService};
use resend::models::SendEmail;
use resend::{ResendOptions, ResendService};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::scheduling::AvailabilityPolicy;
use crate::kernel::{BaseMailer, BasePaymentGateway};

// =============================================================================
// MollieService Adapter (implements BasePaymentGateway trait)
// =============================================================================

/// Wrapper around MollieService that implements BasePaymentGateway trait
pub struct MollieAdapter(pub Arc<MollieService>);

impl MollieAdapter {
    pub fn new(service: Arc<MollieService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BasePaymentGateway for MollieAdapter {
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, MollieError> {
        self.0.get_payment(payment_id).await
    }

    async fn create_payment(&self, request: &CreatePayment) -> Result<Payment, MollieError> {
        self.0.create_payment(request).await
    }
}

// =============================================================================
// ResendService Adapter (implements BaseMailer trait)
// =============================================================================

/// Wrapper around ResendService that implements BaseMailer trait
pub struct ResendAdapter {
    service: Arc<ResendService>,
    from: String,
}

impl ResendAdapter {
    pub fn new(service: Arc<ResendService>, from: String) -> Self {
        Self { service, from }
    }
}

#[async_trait]
impl BaseMailer for ResendAdapter {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        let email = SendEmail {
            from: self.from.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
        };
        let response = self.service.send_email(&email).await?;
        tracing::debug!(email_id = %response.id, "resend accepted email");
        Ok(())
    }
}

// =============================================================================
// No-op Mailer (when no email provider is configured)
// =============================================================================

/// Mailer that drops every email. Used when RESEND_API_KEY is absent so the
/// reconciliation path still completes in environments without email.
pub struct NoopMailer;

impl NoopMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for NoopMailer {
    async fn send_email(&self, to: &str, subject: &str, _html: &str) -> anyhow::Result<()> {
        tracing::debug!(to, subject, "email sending disabled; dropping message");
        Ok(())
    }
}

// =============================================================================
// Factory function
// =============================================================================

/// Create a mailer based on configuration
pub fn create_mailer(resend_api_key: Option<String>, from: String) -> Arc<dyn BaseMailer> {
    match resend_api_key {
        Some(api_key) => {
            let service = ResendService::new(ResendOptions {
                api_key,
                base_url: None,
            });
            Arc::new(ResendAdapter::new(Arc::new(service), from))
        }
        None => {
            tracing::info!("RESEND_API_KEY not set; confirmation emails disabled");
            Arc::new(NoopMailer::new())
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub payments: Arc<dyn BasePaymentGateway>,
    pub mailer: Arc<dyn BaseMailer>,
    /// Availability rules applied when checking a requested window
    pub policy: AvailabilityPolicy,
    /// When set, all confirmation emails go to this address instead of the
    /// booking's own (sandbox delivery restriction)
    pub mail_override_to: Option<String>,
    /// Base URL this server is reachable on; used for gateway webhook and
    /// redirect URLs on created payments
    pub public_base_url: String,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        payments: Arc<dyn BasePaymentGateway>,
        mailer: Arc<dyn BaseMailer>,
        policy: AvailabilityPolicy,
        mail_override_to: Option<String>,
        public_base_url: String,
    ) -> Self {
        Self {
            db_pool,
            payments,
            mailer,
            policy,
            mail_override_to,
            public_base_url,
        }
    }
}
