//! Process configuration, read from flags or the environment.

use std::time::Duration;

use aether_ai::BackendConfig;
use aether_ai::backend::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use aether_payment::{PayPalMode, PaymentConfig};
use clap::Args;

#[derive(Clone, Args)]
pub struct Settings {
    /// API key for the generative backend. Without it only fallback formulas are produced.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub openai_model: String,

    /// Per-request HTTP timeout for the generative backend, in seconds.
    #[arg(long, env = "AETHER_HTTP_TIMEOUT_SECS", global = true)]
    pub http_timeout_secs: Option<u64>,

    #[arg(long, env = "PAYPAL_CLIENT_ID", hide_env_values = true, global = true)]
    pub paypal_client_id: Option<String>,

    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub paypal_client_secret: Option<String>,

    /// `sandbox` or `live`.
    #[arg(long, env = "PAYPAL_MODE", default_value = "sandbox", global = true)]
    pub paypal_mode: PayPalMode,
}

impl Settings {
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
            timeout: self.http_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn payment(&self) -> PaymentConfig {
        PaymentConfig {
            client_id: self.paypal_client_id.clone(),
            client_secret: self.paypal_client_secret.clone(),
            mode: self.paypal_mode,
        }
    }
}
