use serde_json::Value;
use uuid::Uuid;

use crate::error::{GatewayError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.hypixel.net";

const API_KEY_HEADER: &str = "API-Key";

/// HTTP client for the upstream Hypixel REST API. Cheap to clone; the inner
/// reqwest client pools connections.
#[derive(Debug, Clone)]
pub struct HypixelClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HypixelClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Hypixel tokens are UUIDs; anything else is a misconfiguration worth
    /// failing on at startup rather than on the first relay.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        if Uuid::parse_str(token).is_err() {
            return Err(GatewayError::Config(
                "Invalid Hypixel API token. Get a token from https://developer.hypixel.net/ \
                 and set it in the API_TOKEN environment variable."
                    .to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// GET an upstream endpoint and parse the body as JSON.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;
        Ok(response.json().await?)
    }
}
