// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use mollie::models::{Amount, CreatePayment, Link, Payment, PaymentLinks};
use mollie::MollieError;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseMailer, BasePaymentGateway, ServerDeps};
use crate::domains::scheduling::AvailabilityPolicy;

// =============================================================================
// Mock Payment Gateway
// =============================================================================

pub struct MockPaymentGateway {
    payments: Arc<Mutex<HashMap<String, Payment>>>,
    fetch_failures: Arc<Mutex<u32>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
    create_calls: Arc<Mutex<Vec<CreatePayment>>>,
    next_created: Arc<Mutex<u64>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(Mutex::new(HashMap::new())),
            fetch_failures: Arc::new(Mutex::new(0)),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            create_calls: Arc::new(Mutex::new(Vec::new())),
            next_created: Arc::new(Mutex::new(0)),
        }
    }

    /// Register a payment the gateway will return from fetch_payment
    pub fn with_payment(self, payment: Payment) -> Self {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.id.clone(), payment);
        self
    }

    /// Register or replace a payment after construction
    pub fn set_payment(&self, payment: Payment) {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.id.clone(), payment);
    }

    /// Make the next `n` fetches fail with a gateway error
    pub fn fail_next_fetches(&self, n: u32) {
        *self.fetch_failures.lock().unwrap() = n;
    }

    /// Get all payment ids that were fetched
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Get all create requests that were made
    pub fn create_calls(&self) -> Vec<CreatePayment> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().unwrap().len()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePaymentGateway for MockPaymentGateway {
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, MollieError> {
        self.fetch_calls.lock().unwrap().push(payment_id.to_string());

        {
            let mut failures = self.fetch_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(MollieError::Api {
                    status: 503,
                    detail: "mock gateway unavailable".to_string(),
                });
            }
        }

        self.payments
            .lock()
            .unwrap()
            .get(payment_id)
            .cloned()
            .ok_or(MollieError::NotFound)
    }

    async fn create_payment(&self, request: &CreatePayment) -> Result<Payment, MollieError> {
        self.create_calls.lock().unwrap().push(request.clone());

        let n = {
            let mut counter = self.next_created.lock().unwrap();
            *counter += 1;
            *counter
        };
        let id = format!("tr_mock_{n:03}");

        let payment = Payment {
            id: id.clone(),
            status: "open".to_string(),
            amount: request.amount.clone(),
            description: Some(request.description.clone()),
            metadata: Some(request.metadata.clone()),
            links: Some(PaymentLinks {
                checkout: Some(Link {
                    href: format!("https://checkout.mollie.test/{id}"),
                    kind: Some("text/html".to_string()),
                }),
            }),
        };
        self.payments
            .lock()
            .unwrap()
            .insert(id.clone(), payment.clone());

        Ok(payment)
    }
}

/// Build a payment in the shape the gateway returns, for registering on the
/// mock. `amount` is in cents; metadata is any JSON object or Value::Null.
pub fn gateway_payment(
    id: &str,
    status: &str,
    amount_cents: i64,
    metadata: serde_json::Value,
) -> Payment {
    Payment {
        id: id.to_string(),
        status: status.to_string(),
        amount: Amount::from_cents("EUR", amount_cents),
        description: Some("Harborview booking".to_string()),
        metadata: if metadata.is_null() { None } else { Some(metadata) },
        links: None,
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

/// Arguments captured from a send_email call
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failures: Arc<Mutex<u32>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(0)),
        }
    }

    /// Make the next `n` sends fail
    pub fn fail_next_sends(&self, n: u32) {
        *self.failures.lock().unwrap() = n;
    }

    /// Get all emails that were sent
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Check if an email was sent to the given address
    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == to)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                anyhow::bail!("mock mailer failure");
            }
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub payments: Arc<MockPaymentGateway>,
    pub mailer: Arc<MockMailer>,
    pub policy: AvailabilityPolicy,
    pub mail_override_to: Option<String>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(MockPaymentGateway::new()),
            mailer: Arc::new(MockMailer::new()),
            policy: AvailabilityPolicy::default(),
            mail_override_to: None,
        }
    }

    /// Set a mock payment gateway
    pub fn mock_payments(mut self, gateway: MockPaymentGateway) -> Self {
        self.payments = Arc::new(gateway);
        self
    }

    /// Set the availability policy
    pub fn with_policy(mut self, policy: AvailabilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Route all mail to a fixed address
    pub fn with_mail_override(mut self, to: &str) -> Self {
        self.mail_override_to = Some(to.to_string());
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self, db_pool: PgPool) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            db_pool,
            self.payments.clone(),
            self.mailer.clone(),
            self.policy,
            self.mail_override_to,
            "http://localhost:8080".to_string(),
        ))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
