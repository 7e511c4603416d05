use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Monetary amount as Mollie serializes it: a decimal string plus an ISO
/// currency code, e.g. `{ "currency": "EUR", "value": "25.00" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String,
    pub value: String,
}

impl Amount {
    /// Format nonnegative integer cents the way the API expects ("12.50").
    pub fn from_cents(currency: &str, cents: i64) -> Self {
        Self {
            currency: currency.to_string(),
            value: format!("{}.{:02}", cents / 100, cents % 100),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentLinks {
    #[serde(default)]
    pub checkout: Option<Link>,
}

/// A payment as returned by `GET /v2/payments/{id}`.
///
/// `status` is kept as the raw API string (`open`, `pending`, `authorized`,
/// `paid`, `canceled`, `expired`, `failed`); callers only branch on `paid`,
/// so an enum would just turn unknown future statuses into parse failures.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub status: String,
    pub amount: Amount,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(rename = "_links", default)]
    pub links: Option<PaymentLinks>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }

    pub fn checkout_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.checkout.as_ref())
            .map(|c| c.href.as_str())
    }
}

/// Body for `POST /v2/payments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub amount: Amount,
    pub description: String,
    pub redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    pub metadata: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_from_cents_pads_fraction() {
        assert_eq!(Amount::from_cents("EUR", 2500).value, "25.00");
        assert_eq!(Amount::from_cents("EUR", 905).value, "9.05");
        assert_eq!(Amount::from_cents("EUR", 40).value, "0.40");
    }

    #[test]
    fn payment_deserializes_with_checkout_link() {
        let json = r#"{
            "resource": "payment",
            "id": "tr_WDqYK6vllg",
            "status": "open",
            "amount": { "currency": "EUR", "value": "25.00" },
            "description": "Harborview booking",
            "metadata": { "resourceId": "r1" },
            "_links": {
                "checkout": { "href": "https://www.mollie.com/checkout/select-method/WDqYK6vllg", "type": "text/html" }
            }
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.id, "tr_WDqYK6vllg");
        assert!(!payment.is_paid());
        assert_eq!(
            payment.checkout_url(),
            Some("https://www.mollie.com/checkout/select-method/WDqYK6vllg")
        );
    }

    #[test]
    fn payment_deserializes_without_links_or_metadata() {
        let json = r#"{
            "id": "tr_missing",
            "status": "paid",
            "amount": { "currency": "EUR", "value": "0.00" }
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert!(payment.is_paid());
        assert!(payment.checkout_url().is_none());
        assert!(payment.metadata.is_none());
    }

    #[test]
    fn create_payment_serializes_camel_case() {
        let request = CreatePayment {
            amount: Amount::from_cents("EUR", 1200),
            description: "Harborview booking".to_string(),
            redirect_url: "https://example.org/done".to_string(),
            webhook_url: Some("https://example.org/webhooks/payments".to_string()),
            metadata: serde_json::json!({ "resourceId": "r1" }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["redirectUrl"], "https://example.org/done");
        assert_eq!(json["webhookUrl"], "https://example.org/webhooks/payments");
        assert_eq!(json["amount"]["value"], "12.00");
    }
}
