//! CRM HTTP client.
//!
//! # Responsibilities
//! - Build upstream URLs under the configured base URL
//! - Attach the API token as the `api_token` query parameter
//! - Map non-success statuses to `CrmError::Status`
//! - Decode the `{ "data": ... }` envelope
//!
//! No retries and no timeout beyond the HTTP stack's defaults: one failed
//! call fails the whole relay request.

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ApiToken, UpstreamConfig};
use crate::crm::types::{Activity, CrmError, CrmResult, Deal, Envelope, FieldDefinition};
use crate::observability::metrics;

/// Read-only client for the CRM API.
#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: Url,
    token: ApiToken,
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CrmClient {
    /// Create a new client for the configured base URL.
    pub fn new(config: &UpstreamConfig, token: ApiToken) -> CrmResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CrmError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CrmError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("deal-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CrmError::Transport(e.without_url()))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// `GET /dealFields/{id}`. `None` when upstream answers without a record.
    pub async fn deal_field(&self, id: &str) -> CrmResult<Option<FieldDefinition>> {
        let envelope: Envelope<FieldDefinition> = self
            .get_json("deal_field", &["dealFields", id], &[])
            .await?;
        Ok(envelope.data)
    }

    /// `GET /dealFields`.
    pub async fn deal_fields(&self) -> CrmResult<Vec<FieldDefinition>> {
        let envelope: Envelope<Vec<FieldDefinition>> =
            self.get_json("deal_fields", &["dealFields"], &[]).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /deals?filter_id=&limit=`.
    pub async fn deals_by_filter(&self, filter_id: u64, limit: u32) -> CrmResult<Vec<Deal>> {
        let envelope: Envelope<Vec<Deal>> = self
            .get_json(
                "deals",
                &["deals"],
                &[("filter_id", filter_id.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /deals/{id}/activities`.
    pub async fn deal_activities(&self, deal_id: &str) -> CrmResult<Vec<Activity>> {
        let envelope: Envelope<Vec<Activity>> = self
            .get_json("deal_activities", &["deals", deal_id, "activities"], &[])
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Upstream URL for `segments`, without the token.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&str, String)]) -> CrmResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CrmError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> CrmResult<T> {
        let url = self.endpoint_url(segments, query)?;
        let path = url.path().to_string();

        let mut authed = url;
        authed
            .query_pairs_mut()
            .append_pair("api_token", self.token.expose());

        let response = match self.http.get(authed).send().await {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                tracing::error!(endpoint, path = %path, error = %e, "CRM request failed");
                metrics::record_upstream(endpoint, "transport_error");
                return Err(CrmError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, path = %path, status = status.as_u16(), "CRM returned error status");
            metrics::record_upstream(endpoint, "error_status");
            return Err(CrmError::Status(status.as_u16()));
        }

        tracing::debug!(endpoint, path = %path, status = status.as_u16(), "CRM response received");

        match response.json::<T>().await {
            Ok(body) => {
                metrics::record_upstream(endpoint, "ok");
                Ok(body)
            }
            Err(e) => {
                metrics::record_upstream(endpoint, "decode_error");
                Err(CrmError::Decode(e.without_url().to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CrmClient {
        let config = UpstreamConfig {
            base_url: base.to_string(),
            ..UpstreamConfig::default()
        };
        CrmClient::new(&config, ApiToken::new("t0ken")).unwrap()
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let c = client("https://api.pipedrive.com/v1");
        let url = c.endpoint_url(&["dealFields", "69"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.pipedrive.com/v1/dealFields/69");

        let c = client("https://api.pipedrive.com/v1/");
        let url = c.endpoint_url(&["dealFields"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.pipedrive.com/v1/dealFields");
    }

    #[test]
    fn test_endpoint_url_query() {
        let c = client("http://127.0.0.1:9/v1");
        let url = c
            .endpoint_url(
                &["deals"],
                &[("filter_id", "10143".into()), ("limit", "500".into())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/v1/deals?filter_id=10143&limit=500");
    }

    #[test]
    fn test_debug_hides_token() {
        let c = client("https://api.pipedrive.com/v1");
        assert!(!format!("{:?}", c).contains("t0ken"));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let config = UpstreamConfig {
            base_url: "mailto:crm@example.com".to_string(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(
            CrmClient::new(&config, ApiToken::new("t")),
            Err(CrmError::InvalidUrl(_))
        ));
    }
}
