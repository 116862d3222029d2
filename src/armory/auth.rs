//! Bearer token acquisition.
//!
//! Client secrets live only with whoever runs [`ClientCredentialsTokenProvider`]
//! (the trusted intermediary, or a local operator with their own credentials).
//! Front ends are expected to use [`BrokerTokenProvider`], which only ever sees
//! the short-lived bearer token.

use super::http::build_http_client;
use super::types::TokenResponse;
use crate::config::BattleNetConfig;
use crate::error::ArmoryError;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

pub const DEFAULT_TOKEN_URL: &str = "https://us.battle.net/oauth/token";

type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ArmoryError>> + Send + 'a>>;

pub trait TokenProvider: Send + Sync {
    /// Short label for diagnostics.
    fn name(&self) -> &str;

    /// Exchange for a bearer token, reporting why it failed.
    fn fetch_token(&self) -> TokenFuture<'_>;

    /// Token or `None`. Failures are logged here and never retried; callers
    /// treat `None` as "cannot proceed".
    fn get_access_token(&self) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
        Box::pin(async move {
            match self.fetch_token().await {
                Ok(token) => Some(token),
                Err(err) => {
                    tracing::error!(provider = self.name(), error = %err, "token exchange failed");
                    None
                }
            }
        })
    }
}

/// Token or [`ArmoryError::Authentication`], for call sites that propagate.
pub async fn require_token(provider: &dyn TokenProvider) -> Result<String, ArmoryError> {
    provider.get_access_token().await.ok_or_else(|| {
        ArmoryError::Authentication("could not obtain an access token".into())
    })
}

fn token_from_body(body: &str) -> Result<String, ArmoryError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| ArmoryError::Decode(e.to_string()))?;
    parsed
        .access_token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ArmoryError::Authentication("response carried no access_token".into()))
}

/// Performs the OAuth client-credentials grant directly.
pub struct ClientCredentialsTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsTokenProvider {
    pub fn new(token_url: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            client: build_http_client(),
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    async fn exchange(&self) -> Result<String, ArmoryError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ArmoryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ArmoryError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %body, "token endpoint rejected credentials");
            return Err(ArmoryError::Authentication(format!(
                "token endpoint returned {status}"
            )));
        }

        token_from_body(&body)
    }
}

impl TokenProvider for ClientCredentialsTokenProvider {
    fn name(&self) -> &str {
        "client-credentials"
    }

    fn fetch_token(&self) -> TokenFuture<'_> {
        Box::pin(self.exchange())
    }
}

/// Asks a trusted intermediary for a token; holds no secrets itself.
pub struct BrokerTokenProvider {
    client: Client,
    broker_url: String,
}

impl BrokerTokenProvider {
    pub fn new(broker_url: &str) -> Self {
        Self {
            client: build_http_client(),
            broker_url: broker_url.to_string(),
        }
    }

    async fn request(&self) -> Result<String, ArmoryError> {
        let response = self
            .client
            .get(&self.broker_url)
            .send()
            .await
            .map_err(|e| ArmoryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ArmoryError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %body, "token broker returned an error");
            return Err(ArmoryError::Authentication(format!(
                "token broker returned {status}"
            )));
        }

        token_from_body(&body)
    }
}

impl TokenProvider for BrokerTokenProvider {
    fn name(&self) -> &str {
        "broker"
    }

    fn fetch_token(&self) -> TokenFuture<'_> {
        Box::pin(self.request())
    }
}

/// Broker when one is configured, otherwise a local client-credentials grant.
pub fn create_token_provider(config: &BattleNetConfig) -> anyhow::Result<Box<dyn TokenProvider>> {
    if let Some(broker_url) = config.broker_url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(Box::new(BrokerTokenProvider::new(broker_url)));
    }

    let client_id = config.client_id.as_deref().unwrap_or_default();
    let client_secret = config.client_secret.as_deref().unwrap_or_default();
    if client_id.is_empty() || client_secret.is_empty() {
        anyhow::bail!(
            "No Battle.net credentials configured. Options:\n\
             1. Set battlenet.broker_url to a token endpoint you trust\n\
             2. Set BNET_CLIENT_ID and BNET_CLIENT_SECRET env vars"
        );
    }

    Ok(Box::new(ClientCredentialsTokenProvider::new(
        &config.token_url,
        client_id,
        client_secret,
    )))
}
