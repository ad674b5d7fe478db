use serde::Deserialize;
use std::collections::HashMap;

pub const PAYMENT_STATUS_PAID: &str = "paid";

pub const METADATA_USER_ID: &str = "userId";
pub const METADATA_SHOW_ID: &str = "showId";
pub const METADATA_SEATS: &str = "seats";

/// Checkout session state as reported by the payment provider.
///
/// This is the only trusted source at confirmation time: the seat list, the
/// purchasing user and the charged amount are all read back from here, never
/// from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub payment_status: String,
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PAYMENT_STATUS_PAID
    }
}

/// Parameters for creating a provider-side checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSessionParams {
    pub product_name: String,
    pub product_description: String,
    pub currency: String,
    /// Price per seat in the currency's minor unit.
    pub unit_amount: i64,
    pub quantity: u32,
    pub metadata: HashMap<String, String>,
    pub success_url: String,
    pub cancel_url: String,
}
