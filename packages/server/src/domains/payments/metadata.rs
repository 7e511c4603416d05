//! Extraction of booking fields from payment metadata
//!
//! The mobile app attaches booking details to the payment as metadata when
//! checkout starts. By the time the webhook fires the money has moved, so a
//! missing or mangled field must never abort reconciliation: every fallback
//! here produces a recordable draft and a warning in the logs.

use chrono::{DateTime, Utc};
use mollie::models::Payment;
use serde_json::Value;

use crate::common::ResourceCategory;
use crate::domains::bookings::NewBooking;
use crate::domains::scheduling::TimeWindow;

pub const UNKNOWN_EMAIL: &str = "unknown";
pub const UNKNOWN_RESOURCE_ID: &str = "unknown";
pub const UNKNOWN_RESOURCE_NAME: &str = "Unknown resource";

/// Build the booking draft for a paid payment from its metadata
///
/// Metadata keys written by the app: `userId`, `userEmail` (older builds sent
/// `email`), `resourceId`, `resourceName`, `type`, `location`, `startIso`,
/// `endIso`. An unparsable window degrades to a zero-length sentinel at the
/// epoch, which the conflict checks ignore by construction.
pub fn booking_draft(payment: &Payment) -> NewBooking {
    let payment_id = payment.id.as_str();
    let md = payment.metadata.as_ref().unwrap_or(&Value::Null);

    if !md.is_object() {
        tracing::warn!(payment_id, "payment has no usable metadata; recording with fallbacks");
    }

    let user_email = text(md, "userEmail")
        .or_else(|| text(md, "email"))
        .unwrap_or_else(|| {
            tracing::warn!(payment_id, "metadata missing user email");
            UNKNOWN_EMAIL.to_string()
        });

    let resource_id = text(md, "resourceId").unwrap_or_else(|| {
        tracing::warn!(payment_id, "metadata missing resource id");
        UNKNOWN_RESOURCE_ID.to_string()
    });

    let resource_name =
        text(md, "resourceName").unwrap_or_else(|| UNKNOWN_RESOURCE_NAME.to_string());

    let category = match text(md, "type") {
        Some(raw) => match ResourceCategory::parse(&raw) {
            Some(category) => category.as_str().to_string(),
            None => {
                tracing::warn!(payment_id, category = %raw, "unrecognized resource category");
                raw
            }
        },
        None => "unknown".to_string(),
    };

    let (starts_at, ends_at) = parse_window(md, payment_id);

    let total_cents = parse_amount_cents(&payment.amount.value).unwrap_or_else(|| {
        tracing::warn!(
            payment_id,
            amount = %payment.amount.value,
            "unparsable payment amount; recording zero"
        );
        0
    });

    NewBooking {
        payment_id: payment.id.clone(),
        user_id: text(md, "userId"),
        user_email,
        resource_id,
        resource_name,
        category,
        location: text(md, "location"),
        starts_at,
        ends_at,
        total_cents,
    }
}

/// Non-empty string field from a metadata object
fn text(md: &Value, key: &str) -> Option<String> {
    md.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

fn parse_window(md: &Value, payment_id: &str) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = text(md, "startIso");
    let end = text(md, "endIso");

    if let (Some(start), Some(end)) = (start, end) {
        match TimeWindow::from_iso(&start, &end) {
            Ok(window) => return (window.start(), window.end()),
            Err(error) => {
                tracing::warn!(payment_id, %error, "metadata window is invalid");
            }
        }
    } else {
        tracing::warn!(payment_id, "metadata missing booking window");
    }

    // Zero-length sentinel: records the booking without ever blocking a slot
    (DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH)
}

/// Parse a gateway decimal amount string ("25.00") into integer cents.
/// Rejects negative values and more than two fraction digits.
fn parse_amount_cents(value: &str) -> Option<i64> {
    if value.starts_with('-') {
        return None;
    }

    let (units, fraction) = match value.split_once('.') {
        Some((units, fraction)) => (units, fraction),
        None => (value, ""),
    };

    let units: i64 = units.parse().ok()?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        2 => fraction.parse().ok()?,
        _ => return None,
    };

    Some(units * 100 + cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mollie::models::Amount;
    use serde_json::json;

    fn payment_with(metadata: Value, amount: &str) -> Payment {
        Payment {
            id: "tr_meta".to_string(),
            status: "paid".to_string(),
            amount: Amount {
                currency: "EUR".to_string(),
                value: amount.to_string(),
            },
            description: Some("Harborview booking".to_string()),
            metadata: if metadata.is_null() { None } else { Some(metadata) },
            links: None,
        }
    }

    #[test]
    fn full_metadata_maps_onto_draft() {
        let payment = payment_with(
            json!({
                "userId": "u42",
                "userEmail": "guest@example.org",
                "resourceId": "r1",
                "resourceName": "Meeting Room A",
                "type": "room",
                "location": "2nd floor",
                "startIso": "2025-06-01T10:00:00Z",
                "endIso": "2025-06-01T12:00:00Z",
            }),
            "25.00",
        );

        let draft = booking_draft(&payment);
        assert_eq!(draft.payment_id, "tr_meta");
        assert_eq!(draft.user_id.as_deref(), Some("u42"));
        assert_eq!(draft.user_email, "guest@example.org");
        assert_eq!(draft.resource_id, "r1");
        assert_eq!(draft.resource_name, "Meeting Room A");
        assert_eq!(draft.category, "room");
        assert_eq!(draft.location.as_deref(), Some("2nd floor"));
        assert_eq!(draft.starts_at.to_rfc3339(), "2025-06-01T10:00:00+00:00");
        assert_eq!(draft.ends_at.to_rfc3339(), "2025-06-01T12:00:00+00:00");
        assert_eq!(draft.total_cents, 2500);
    }

    #[test]
    fn legacy_email_key_still_read() {
        let payment = payment_with(json!({ "email": "old-build@example.org" }), "10.00");
        assert_eq!(booking_draft(&payment).user_email, "old-build@example.org");
    }

    #[test]
    fn missing_metadata_degrades_to_fallbacks() {
        let payment = payment_with(Value::Null, "12.00");
        let draft = booking_draft(&payment);

        assert_eq!(draft.user_id, None);
        assert_eq!(draft.user_email, UNKNOWN_EMAIL);
        assert_eq!(draft.resource_id, UNKNOWN_RESOURCE_ID);
        assert_eq!(draft.resource_name, UNKNOWN_RESOURCE_NAME);
        assert_eq!(draft.category, "unknown");
        assert_eq!(draft.starts_at, DateTime::UNIX_EPOCH);
        assert_eq!(draft.ends_at, DateTime::UNIX_EPOCH);
        assert_eq!(draft.total_cents, 1200);
    }

    #[test]
    fn corrupt_window_degrades_to_sentinel() {
        let payment = payment_with(
            json!({
                "resourceId": "r1",
                "startIso": "not-a-date",
                "endIso": "2025-06-01T12:00:00Z",
            }),
            "25.00",
        );
        let draft = booking_draft(&payment);

        assert_eq!(draft.resource_id, "r1");
        assert_eq!(draft.starts_at, DateTime::UNIX_EPOCH);
        assert_eq!(draft.ends_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn reversed_window_degrades_to_sentinel() {
        let payment = payment_with(
            json!({
                "startIso": "2025-06-01T12:00:00Z",
                "endIso": "2025-06-01T10:00:00Z",
            }),
            "25.00",
        );
        let draft = booking_draft(&payment);
        assert_eq!(draft.starts_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn legacy_category_alias_normalized() {
        let payment = payment_with(json!({ "type": "car" }), "30.00");
        assert_eq!(booking_draft(&payment).category, "vehicle");
    }

    #[test]
    fn unknown_category_kept_verbatim() {
        let payment = payment_with(json!({ "type": "houseboat" }), "30.00");
        assert_eq!(booking_draft(&payment).category, "houseboat");
    }

    #[test]
    fn bad_amount_records_zero() {
        let payment = payment_with(json!({}), "twelve euros");
        assert_eq!(booking_draft(&payment).total_cents, 0);
    }

    #[test]
    fn amount_parsing_handles_gateway_shapes() {
        assert_eq!(parse_amount_cents("25.00"), Some(2500));
        assert_eq!(parse_amount_cents("9.05"), Some(905));
        assert_eq!(parse_amount_cents("0.40"), Some(40));
        assert_eq!(parse_amount_cents("25"), Some(2500));
        assert_eq!(parse_amount_cents("25.5"), Some(2550));
        assert_eq!(parse_amount_cents("-10.00"), None);
        assert_eq!(parse_amount_cents("25.005"), None);
        assert_eq!(parse_amount_cents(""), None);
    }
}
