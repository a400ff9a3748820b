//! Best-effort payment alerts.
//!
//! Dispatch is fire-and-forget: the HTTP caller never waits on the webhook
//! and a failed delivery only leaves a warning in the logs. No webhook
//! configured means no dispatch at all.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    url: Option<String>,
}

#[derive(Serialize)]
struct PaymentAlert {
    date: NaiveDate,
    amount_minor: i64,
    recipient_name: String,
    description: Option<String>,
}

impl Notifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Notifier with dispatch turned off.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Queues a webhook call for a freshly recorded payment.
    pub fn payment_recorded(&self, payment: &engine::payments::Model) {
        let Some(url) = self.url.clone() else {
            return;
        };

        let client = self.client.clone();
        let alert = PaymentAlert {
            date: payment.date,
            amount_minor: payment.amount_minor,
            recipient_name: payment.recipient_name.clone(),
            description: payment.description.clone(),
        };

        tokio::spawn(async move {
            match client.post(&url).json(&alert).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    tracing::warn!("payment alert rejected: {}", response.status());
                }
                Err(err) => tracing::warn!("payment alert failed: {err}"),
            }
        });
    }
}
