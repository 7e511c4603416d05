//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.
//! The shared database survives across tests, so callers pass unique
//! resource and payment ids per test.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use server_core::domains::bookings::{Booking, CreateOutcome, NewBooking, Resource};
use server_core::domains::scheduling::TimeWindow;
use server_core::kernel::{MockMailer, MockPaymentGateway, ServerDeps, TestDependencies};

/// Create a bookable test resource
pub async fn create_test_resource(
    pool: &PgPool,
    id: &str,
    category: &str,
    hourly_rate_cents: i64,
) -> Result<Resource> {
    let resource = Resource {
        id: id.to_string(),
        name: format!("Test resource {id}"),
        category: category.to_string(),
        location: Some("Test site".to_string()),
        description: None,
        hourly_rate_cents,
        capacity: Some(4),
        details: None,
        created_at: Utc::now(),
    };
    resource.upsert(pool).await
}

/// Build an insertable booking draft for a window given as ISO instants
pub fn booking_draft(payment_id: &str, resource_id: &str, start: &str, end: &str) -> NewBooking {
    let window = TimeWindow::from_iso(start, end).expect("fixture window must be valid");
    NewBooking {
        payment_id: payment_id.to_string(),
        user_id: None,
        user_email: format!("{payment_id}@example.org"),
        resource_id: resource_id.to_string(),
        resource_name: format!("Test resource {resource_id}"),
        category: "room".to_string(),
        location: None,
        starts_at: window.start(),
        ends_at: window.end(),
        total_cents: 2500,
    }
}

/// Insert a booking directly, asserting it did not already exist
pub async fn create_test_booking(pool: &PgPool, draft: &NewBooking) -> Result<Booking> {
    match Booking::create_if_absent(draft, pool).await? {
        CreateOutcome::Created(booking) => Ok(booking),
        other => anyhow::bail!("expected fresh booking, got {other:?}"),
    }
}

/// Payment metadata in the shape the mobile app writes at checkout
pub fn payment_metadata(
    email: &str,
    resource_id: &str,
    start: &str,
    end: &str,
) -> serde_json::Value {
    json!({
        "userEmail": email,
        "resourceId": resource_id,
        "resourceName": format!("Test resource {resource_id}"),
        "type": "room",
        "startIso": start,
        "endIso": end,
    })
}

/// Mocked ServerDeps plus handles to the mocks for assertions
pub fn test_deps(pool: &PgPool) -> (Arc<ServerDeps>, Arc<MockPaymentGateway>, Arc<MockMailer>) {
    let deps = TestDependencies::new();
    let gateway = deps.payments.clone();
    let mailer = deps.mailer.clone();
    (deps.into_deps(pool.clone()), gateway, mailer)
}
