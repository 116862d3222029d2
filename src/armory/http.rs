use super::identity::{Locale, Region};
use crate::error::ArmoryError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_TEMPLATE: &str = "https://{region}.api.blizzard.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub fn build_http_client() -> Client {
    build_http_client_with_timeout(DEFAULT_TIMEOUT_SECS)
}

pub fn build_http_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Error body shape returned by the Game Data and Profile APIs.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated GET access to the regional Battle.net API hosts.
///
/// Every call is bounded by the configured deadline; exceeding it is reported
/// as [`ArmoryError::Timeout`], separate from transport and API failures.
#[derive(Debug, Clone)]
pub struct ArmoryClient {
    client: Client,
    api_base_template: String,
    locale: Locale,
    timeout: Duration,
}

impl ArmoryClient {
    pub fn new(api_base_template: &str, locale: Locale, timeout_secs: u64) -> Self {
        Self {
            // The outer deadline is enforced per call below; the client-level
            // timeout is a backstop slightly beyond it.
            client: build_http_client_with_timeout(timeout_secs.saturating_add(5)),
            api_base_template: api_base_template.trim_end_matches('/').to_string(),
            locale,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }

    pub fn base_url(&self, region: Region) -> String {
        self.api_base_template.replace("{region}", region.as_str())
    }

    fn endpoint(&self, region: Region, segments: &[&str]) -> Result<Url, ArmoryError> {
        let mut url = Url::parse(&self.base_url(region))
            .map_err(|e| ArmoryError::Transport(format!("invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ArmoryError::Transport("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `segments` under the regional host with `namespace` and the client
    /// locale attached. `subject` names the resource in not-found errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        region: Region,
        segments: &[&str],
        namespace: &str,
        extra_query: &[(&str, String)],
        token: &str,
        subject: &str,
    ) -> Result<T, ArmoryError> {
        self.get_json_in(self.locale, region, segments, namespace, extra_query, token, subject)
            .await
    }

    /// [`get_json`](Self::get_json) with names localized to `locale` instead
    /// of the client default.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_json_in<T: DeserializeOwned>(
        &self,
        locale: Locale,
        region: Region,
        segments: &[&str],
        namespace: &str,
        extra_query: &[(&str, String)],
        token: &str,
        subject: &str,
    ) -> Result<T, ArmoryError> {
        let url = self.endpoint(region, segments)?;
        let mut query: Vec<(&str, String)> = vec![
            ("namespace", namespace.to_string()),
            ("locale", locale.as_str().to_string()),
        ];
        query.extend(extra_query.iter().cloned());

        tracing::debug!(url = %url, namespace, locale = locale.as_str(), "battle.net GET");

        let request = async {
            let response = self
                .client
                .get(url.clone())
                .query(&query)
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| map_transport_error(e, self.timeout_secs()))?;
            read_json(response, subject, self.timeout_secs()).await
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ArmoryError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}

fn map_transport_error(err: reqwest::Error, timeout_secs: u64) -> ArmoryError {
    if err.is_timeout() {
        return ArmoryError::Timeout {
            seconds: timeout_secs,
        };
    }
    ArmoryError::Transport(err.to_string())
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    subject: &str,
    timeout_secs: u64,
) -> Result<T, ArmoryError> {
    let status = response.status();
    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, timeout_secs))?;
        return serde_json::from_str(&body).map_err(|e| ArmoryError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, subject, body = %body, "battle.net API error");

    if status == StatusCode::NOT_FOUND {
        return Err(ArmoryError::NotFound {
            what: subject.to_string(),
        });
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ArmoryError::Authentication(format!(
            "bearer token rejected ({status})"
        )));
    }

    let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let mut message = parsed
        .title
        .or(parsed.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
    if let Some(detail) = parsed.detail {
        message.push_str(" - ");
        message.push_str(&detail);
    }

    Err(ArmoryError::Api {
        status: status.as_u16(),
        message,
    })
}
