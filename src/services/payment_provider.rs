use crate::models::payment::{CheckoutSession, CheckoutSessionParams};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use std::time::Duration;

const STRIPE_API_BASE: &str = "https://api.stripe.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Abstraction over the external checkout provider (Stripe in production).
///
/// `create_checkout_session` registers purchase intent and returns a redirect
/// target; `retrieve_session` reads back the authoritative payment state.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> AppResult<CheckoutSession>;

    async fn retrieve_session(&self, session_id: &str) -> AppResult<CheckoutSession>;
}

/// Stripe Checkout client over the form-encoded HTTP API.
pub struct StripeProvider {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeProvider {
    pub fn new(secret_key: String) -> AppResult<Self> {
        Self::with_api_base(secret_key, STRIPE_API_BASE.to_string())
    }

    pub fn with_api_base(secret_key: String, api_base: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::PaymentProvider(e.to_string()))?;

        Ok(StripeProvider {
            client,
            secret_key,
            api_base,
        })
    }

    async fn parse_session(response: reqwest::Response) -> AppResult<CheckoutSession> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentProvider(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| AppError::PaymentProvider(e.to_string()))
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> AppResult<CheckoutSession> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[]".to_string(), "card".to_string()),
            (
                "line_items[0][price_data][currency]".to_string(),
                params.currency,
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                params.product_name,
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                params.product_description,
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                params.unit_amount.to_string(),
            ),
            (
                "line_items[0][quantity]".to_string(),
                params.quantity.to_string(),
            ),
            ("success_url".to_string(), params.success_url),
            ("cancel_url".to_string(), params.cancel_url),
        ];
        for (key, value) in params.metadata {
            form.push((format!("metadata[{}]", key), value));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(e.to_string()))?;

        Self::parse_session(response).await
    }

    async fn retrieve_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let response = self
            .client
            .get(format!(
                "{}/v1/checkout/sessions/{}",
                self.api_base, session_id
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(e.to_string()))?;

        Self::parse_session(response).await
    }
}
