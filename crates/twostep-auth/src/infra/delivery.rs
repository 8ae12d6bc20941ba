use twostep_domain::credential::ContactChannel;

use crate::domain::repository::CodeDelivery;
use crate::error::AuthError;

/// Delivery adapter that hands codes to an HTTP messaging gateway. The
/// gateway owns the provider specifics (and, for voice, renders the digits
/// into a spoken prompt); this adapter only posts the digit string, channel,
/// and destination number.
#[derive(Clone)]
pub struct HttpCodeDelivery {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCodeDelivery {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl CodeDelivery for HttpCodeDelivery {
    async fn deliver(
        &self,
        code: &str,
        channel: ContactChannel,
        phone: &str,
    ) -> Result<(), AuthError> {
        let body = serde_json::json!({
            "to": phone,
            "channel": channel.as_str(),
            "message": format!("Your verification code is {code}"),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Delivery {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::Delivery {
                reason: format!("delivery gateway returned {}", response.status()),
            });
        }
        Ok(())
    }
}
