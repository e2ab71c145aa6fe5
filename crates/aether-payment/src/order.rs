use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_AMOUNT: f64 = 0.01;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment service not configured")]
    NotConfigured,

    #[error("amount {0} below minimum 0.01")]
    InvalidAmount(f64),

    #[error("unknown PayPal mode: {0:?} (expected sandbox or live)")]
    UnknownMode(String),

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PayPal returned {status}: {body}")]
    Server { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPalMode {
    #[default]
    Sandbox,
    Live,
}

impl PayPalMode {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-m.sandbox.paypal.com",
            Self::Live => "https://api-m.paypal.com",
        }
    }
}

impl fmt::Display for PayPalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        })
    }
}

impl FromStr for PayPalMode {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            _ => Err(PaymentError::UnknownMode(s.to_string())),
        }
    }
}

/// PayPal REST credentials. Both halves must be present to take payments.
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub mode: PayPalMode,
}

impl PaymentConfig {
    pub fn credentials(&self) -> Result<(&str, &str), PaymentError> {
        match (present(&self.client_id), present(&self.client_secret)) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(PaymentError::NotConfigured),
        }
    }
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

/// Purchase of one generated formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub formula_id: String,
    pub formula_name: String,
    /// Price in `currency` units.
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.amount.is_nan() || self.amount < MIN_AMOUNT {
            return Err(PaymentError::InvalidAmount(self.amount));
        }
        Ok(())
    }

    /// Line description shown to the payer.
    pub fn description(&self) -> String {
        format!("Aether Custom Fragrance: {}", self.formula_name)
    }

    /// Amount as PayPal expects it: a decimal string with two places.
    pub fn amount_value(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(amount: f64) -> OrderRequest {
        OrderRequest {
            formula_id: "f-1".into(),
            formula_name: "Morning Dew".into(),
            amount,
            currency: default_currency(),
        }
    }

    #[test]
    fn mode_urls() {
        assert_eq!(PayPalMode::default().base_url(), "https://api-m.sandbox.paypal.com");
        assert_eq!("LIVE".parse::<PayPalMode>().unwrap().base_url(), "https://api-m.paypal.com");
        assert!("prod".parse::<PayPalMode>().is_err());
    }

    #[test]
    fn amount_must_reach_minimum() {
        assert!(order(0.01).validate().is_ok());
        assert!(matches!(order(0.0).validate(), Err(PaymentError::InvalidAmount(_))));
        assert!(order(f64::NAN).validate().is_err());
    }

    #[test]
    fn amount_formats_two_places() {
        assert_eq!(order(49.5).amount_value(), "49.50");
        assert_eq!(order(7.0).amount_value(), "7.00");
    }

    #[test]
    fn description_names_formula() {
        assert_eq!(order(1.0).description(), "Aether Custom Fragrance: Morning Dew");
    }

    #[test]
    fn currency_defaults_to_usd() {
        let parsed: OrderRequest = serde_json::from_str(
            r#"{"formula_id": "x", "formula_name": "Golden Hour", "amount": 30.0}"#,
        )
        .unwrap();
        assert_eq!(parsed.currency, "USD");
    }

    #[test]
    fn credentials_require_both_halves() {
        let partial = PaymentConfig {
            client_id: Some("id".into()),
            ..Default::default()
        };
        assert!(matches!(partial.credentials(), Err(PaymentError::NotConfigured)));

        let full = PaymentConfig {
            client_id: Some("id".into()),
            client_secret: Some("secret".into()),
            mode: PayPalMode::Live,
        };
        assert_eq!(full.credentials().unwrap(), ("id", "secret"));
    }
}
