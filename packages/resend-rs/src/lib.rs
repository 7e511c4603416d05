// Minimal Resend transactional-email client. One endpoint, one concern:
// POST /emails with a bearer key. https://resend.com/docs/api-reference

pub mod models;

use reqwest::Client;

use crate::models::{SendEmail, SendEmailResponse};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, thiserror::Error)]
pub enum ResendError {
    #[error("resend returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("request to resend failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ResendOptions {
    pub api_key: String,
    /// Override for tests against a stub server; defaults to the live API.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResendService {
    options: ResendOptions,
    client: Client,
}

impl ResendService {
    pub fn new(options: ResendOptions) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { options, client }
    }

    fn base_url(&self) -> &str {
        self.options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Send a single HTML email. No retries here; callers own retry policy.
    pub async fn send_email(&self, email: &SendEmail) -> Result<SendEmailResponse, ResendError> {
        let url = format!("{}/emails", self.base_url());

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.options.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ResendError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json::<SendEmailResponse>().await?)
    }
}
