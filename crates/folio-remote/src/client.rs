//! HTTP client for the claims API

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{issuer_uri, normalize_uri, Claim, ClaimInput, ClaimPatch};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::backend::ClaimsBackend;
use crate::error::{RemoteError, Result};
use crate::types::{parse_list, CreateResponse, IssuerPage};

/// Namespace issuer URIs are built from (`{namespace}/{user_id}`).
pub const DEFAULT_ISSUER_NAMESPACE: &str = "https://live.linkedtrust.us/userids";

/// Remote client configuration
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root, e.g. `https://claims.example.org/api`
    pub base_url: String,
    /// Namespace template for issuer URIs
    pub issuer_namespace: String,
    /// Per-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            issuer_namespace: DEFAULT_ISSUER_NAMESPACE.to_string(),
            timeout: None,
        }
    }
}

/// HTTP implementation of [`ClaimsBackend`]
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    issuer_namespace: String,
    http: Client,
}

impl RemoteClient {
    /// Create a new client. Trailing slashes on the base URL are stripped.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(Self::with_client(config, http))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(config: RemoteConfig, http: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            issuer_namespace: config.issuer_namespace,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The issuer URI the API knows `user_id` by.
    pub fn issuer_uri(&self, user_id: &str) -> String {
        issuer_uri(&self.issuer_namespace, user_id)
    }

    async fn send(&self, request: RequestBuilder, token: &str) -> Result<Response> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Http { status, body });
        }

        Ok(response)
    }

    async fn body_text(response: Response) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))
    }
}

#[async_trait]
impl ClaimsBackend for RemoteClient {
    async fn create(&self, token: &str, input: &ClaimInput) -> Result<Claim> {
        let url = format!("{}/claims", self.base_url);
        let body = input.clone().normalized();

        debug!(url = %url, subject = %body.subject, "creating remote claim");
        let response = self.send(self.http.post(&url).json(&body), token).await?;
        let text = Self::body_text(response).await?;

        serde_json::from_str::<CreateResponse>(&text)
            .map(CreateResponse::into_claim)
            .map_err(|e| RemoteError::Decode(format!("create response: {}", e)))
    }

    async fn list_by_subject(&self, token: &str, subject: &str) -> Result<Vec<Claim>> {
        let url = format!(
            "{}/claims/subject/{}",
            self.base_url,
            urlencoding::encode(&normalize_uri(subject))
        );

        debug!(url = %url, "listing claims by subject");
        let response = self.send(self.http.get(&url), token).await?;
        let text = Self::body_text(response).await?;

        Ok(parse_list(&text)
            .map(|list| list.into_claims())
            .unwrap_or_default())
    }

    async fn list_by_issuer(
        &self,
        token: &str,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<IssuerPage> {
        let url = format!("{}/claim", self.base_url);
        let issuer = self.issuer_uri(user_id);

        debug!(url = %url, issuer = %issuer, page, limit, "listing claims by issuer");
        let request = self.http.get(&url).query(&[
            ("issuer_id", issuer.as_str()),
            ("limit", &limit.to_string()),
            ("page", &page.to_string()),
        ]);
        let response = self.send(request, token).await?;
        let text = Self::body_text(response).await?;

        let (claims, total) = match parse_list(&text) {
            Some(list) => {
                let total = list.total();
                (list.into_claims(), total)
            }
            None => (Vec::new(), None),
        };

        Ok(IssuerPage {
            claims,
            page,
            limit,
            total,
        })
    }

    async fn update(&self, token: &str, id: i64, patch: &ClaimPatch) -> Result<()> {
        let url = format!("{}/claims/{}", self.base_url, id);
        let body = patch.clone().normalized();

        debug!(url = %url, "updating remote claim");
        self.send(self.http.put(&url).json(&body), token).await?;
        Ok(())
    }

    async fn delete(&self, token: &str, id: i64) -> Result<()> {
        let url = format!("{}/claims/{}", self.base_url, id);

        debug!(url = %url, "deleting remote claim");
        self.send(self.http.delete(&url), token).await?;
        Ok(())
    }
}
