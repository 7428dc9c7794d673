//! Twilio WhatsApp notification adapter
//!
//! Sends plain-text messages through Twilio's Messages API using the
//! WhatsApp channel. Credentials and addresses are read from the
//! environment; a partially configured environment is an error at
//! construction time, not at send time.

use tracing::debug;

use vaultdrive_core::ports::notifier::INotifier;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Errors from the Twilio notification adapter
#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Twilio API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Twilio account credentials and WhatsApp addresses
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender address, e.g. `whatsapp:+14155238886`
    pub from: String,
    /// Recipient address, e.g. `whatsapp:+491701234567`
    pub to: String,
}

impl TwilioConfig {
    /// Reads the configuration from `TWILIO_ACCOUNT_SID`,
    /// `TWILIO_AUTH_TOKEN`, `TWILIO_WHATSAPP_FROM` and
    /// `TWILIO_WHATSAPP_TO`.
    pub fn from_env() -> Result<Self, TwilioError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Missing and empty values are both treated as absent.
    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, TwilioError> {
        let require = |name: &'static str| match get(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(TwilioError::MissingEnv(name)),
        };

        Ok(Self {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: require("TWILIO_AUTH_TOKEN")?,
            from: require("TWILIO_WHATSAPP_FROM")?,
            to: require("TWILIO_WHATSAPP_TO")?,
        })
    }
}

/// Notifier that delivers messages over Twilio's WhatsApp channel.
pub struct TwilioNotifier {
    client: reqwest::Client,
    config: TwilioConfig,
    base_url: String,
}

impl TwilioNotifier {
    #[must_use]
    pub fn new(config: TwilioConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_BASE.to_string())
    }

    /// Creates a notifier against a custom API base URL (for tests).
    #[must_use]
    pub fn with_base_url(config: TwilioConfig, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url,
        }
    }

    async fn send(&self, text: &str) -> Result<(), TwilioError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("From", self.config.from.as_str()),
                ("To", self.config.to.as_str()),
                ("Body", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api { status, body });
        }

        debug!(to = %self.config.to, "Notification delivered");
        Ok(())
    }
}

#[async_trait::async_trait]
impl INotifier for TwilioNotifier {
    async fn notify(&self, text: &str) -> anyhow::Result<()> {
        self.send(text).await.map_err(Into::into)
    }
}
