use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::bookings::models::booking::Booking;
use crate::domains::bookings::models::resource::Resource;

/// Public API representation of a resource (for JSON responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceData {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub hourly_rate_cents: i64,
    pub capacity: Option<i32>,
    pub details: Option<serde_json::Value>,
}

impl From<Resource> for ResourceData {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            category: resource.category,
            location: resource.location,
            description: resource.description,
            hourly_rate_cents: resource.hourly_rate_cents,
            capacity: resource.capacity,
            details: resource.details,
        }
    }
}

/// Public API representation of a booking (for JSON responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingData {
    /// Payment id, which is also the booking's identifier
    pub payment_id: String,
    pub user_email: String,
    pub resource_id: String,
    pub resource_name: String,
    pub category: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_cents: i64,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingData {
    fn from(booking: Booking) -> Self {
        Self {
            payment_id: booking.payment_id,
            user_email: booking.user_email,
            resource_id: booking.resource_id,
            resource_name: booking.resource_name,
            category: booking.category,
            location: booking.location,
            starts_at: booking.starts_at,
            ends_at: booking.ends_at,
            total_cents: booking.total_cents,
            notified: booking.notified,
            created_at: booking.created_at,
        }
    }
}
