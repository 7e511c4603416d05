// Minimal Mollie Payments API client (v2). Covers exactly what the booking
// backend needs: creating a payment and fetching its authoritative status.
// https://docs.mollie.com/reference/v2/payments-api/overview

pub mod models;

use reqwest::{Client, StatusCode};

use crate::models::{CreatePayment, Payment};

const DEFAULT_BASE_URL: &str = "https://api.mollie.com";

#[derive(Debug, thiserror::Error)]
pub enum MollieError {
    #[error("payment not found")]
    NotFound,

    #[error("mollie returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("request to mollie failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct MollieOptions {
    pub api_key: String,
    /// Override for tests against a stub server; defaults to the live API.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MollieService {
    options: MollieOptions,
    client: Client,
}

impl MollieService {
    pub fn new(options: MollieOptions) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { options, client }
    }

    fn base_url(&self) -> &str {
        self.options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Fetch a payment by id. The returned status is authoritative; callers
    /// must not cache it across reconciliation attempts.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment, MollieError> {
        let url = format!("{}/v2/payments/{}", self.base_url(), payment_id);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.options.api_key)
            .send()
            .await?;

        Self::parse_payment(response).await
    }

    /// Create a payment and return it (including the hosted-checkout link).
    pub async fn create_payment(&self, request: &CreatePayment) -> Result<Payment, MollieError> {
        let url = format!("{}/v2/payments", self.base_url());

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.options.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_payment(response).await
    }

    async fn parse_payment(response: reqwest::Response) -> Result<Payment, MollieError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(MollieError::NotFound);
        }

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MollieError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json::<Payment>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_live_api() {
        let service = MollieService::new(MollieOptions {
            api_key: "test_key".to_string(),
            base_url: None,
        });
        assert_eq!(service.base_url(), "https://api.mollie.com");
    }

    #[test]
    fn base_url_override_wins() {
        let service = MollieService::new(MollieOptions {
            api_key: "test_key".to_string(),
            base_url: Some("http://localhost:9999".to_string()),
        });
        assert_eq!(service.base_url(), "http://localhost:9999");
    }
}
