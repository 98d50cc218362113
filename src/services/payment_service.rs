//! Payment-gateway order creation through the Razorpay HTTP API.
//!
//! Only order creation is implemented; settlement verification (webhooks,
//! signatures) is out of scope.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::constants::ERR_PAYMENT_ORDER_FAILED;
use crate::errors::ApiError;

#[derive(Debug, Serialize)]
struct CreateOrderPayload<'a> {
    /// Amount in the smallest currency unit (e.g. paise)
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
}

/// A payment order created at the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default)]
    pub status: String,
}

/// Service for creating payment orders.
pub struct PaymentService {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl PaymentService {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: CONFIG.razorpay_key_id.clone(),
            key_secret: CONFIG.razorpay_key_secret.clone(),
            base_url: CONFIG.razorpay_base_url.clone(),
        }
    }

    /// Create an order at the gateway.
    ///
    /// `amount` is in the smallest currency unit; `receipt` is an opaque
    /// reference recorded on the order.
    pub async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentOrder, ApiError> {
        let payload = CreateOrderPayload {
            amount,
            currency,
            receipt,
        };

        let resp = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            warn!(
                "Payment order creation failed with status {} for receipt {}",
                resp.status(),
                receipt
            );
            return Err(ApiError::InternalServerError(
                ERR_PAYMENT_ORDER_FAILED.to_string(),
            ));
        }

        let order: PaymentOrder = resp.json().await?;
        info!("Created payment order {} for receipt {}", order.id, receipt);

        Ok(order)
    }
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a course price to the smallest currency unit for the gateway.
pub fn to_minor_units(price: f64) -> u64 {
    (price * 100.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(0.0), 0);
        assert_eq!(to_minor_units(499.0), 49900);
        assert_eq!(to_minor_units(449.1), 44910);
        assert_eq!(to_minor_units(-5.0), 0);
    }
}
