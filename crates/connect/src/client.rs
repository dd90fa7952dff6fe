//! REST client for the partner authority.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use tandem_core::partnerships::{PartnerRemoteApi, RemoteInvite, RemotePartnership};

use crate::error::{ConnectError, Result};
use crate::types::{AcceptInviteRequest, ApiErrorResponse, CancelInviteRequest, CreateInviteRequest};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the partner authority REST API.
#[derive(Debug, Clone)]
pub struct PartnerApiClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl PartnerApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the authority (e.g. "https://api.tandem.app")
    /// * `access_token` - Bearer token of the signed-in user
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|_| ConnectError::InvalidRequest("invalid access token format".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// Parse a JSON response body, mapping error statuses to `ConnectError::Api`.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("API response ({status}): {body}");

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(ConnectError::api(status.as_u16(), error.message));
            }
            return Err(ConnectError::api(
                status.as_u16(),
                format!("request failed: {body}"),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            ConnectError::api(status.as_u16(), format!("failed to parse response: {e}"))
        })
    }

    async fn empty_response(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return Err(ConnectError::api(status.as_u16(), error.message));
        }
        Err(ConnectError::api(status.as_u16(), body))
    }

    /// Create an invite code.
    ///
    /// POST /api/v1/invites
    pub async fn create_invite_impl(&self, creator_id: &str) -> Result<RemoteInvite> {
        let url = format!("{}/api/v1/invites", self.base_url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&CreateInviteRequest {
                creator_id: creator_id.to_string(),
            })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Accept an invite code.
    ///
    /// POST /api/v1/invites/accept
    pub async fn accept_invite_impl(
        &self,
        code: &str,
        acceptor_id: &str,
    ) -> Result<RemotePartnership> {
        let url = format!("{}/api/v1/invites/accept", self.base_url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&AcceptInviteRequest {
                code: code.to_string(),
                acceptor_id: acceptor_id.to_string(),
            })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Cancel a pending invite.
    ///
    /// POST /api/v1/invites/cancel
    pub async fn cancel_invite_impl(&self, code: &str, creator_id: &str) -> Result<()> {
        let url = format!("{}/api/v1/invites/cancel", self.base_url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&CancelInviteRequest {
                code: code.to_string(),
                creator_id: creator_id.to_string(),
            })
            .send()
            .await?;
        Self::empty_response(response).await
    }

    /// Dissolve the caller's partnership.
    ///
    /// DELETE /api/v1/partnerships/{userId}
    pub async fn dissolve_partnership_impl(&self, user_id: &str) -> Result<()> {
        let url = format!("{}/api/v1/partnerships/{user_id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .send()
            .await?;
        Self::empty_response(response).await
    }

    /// Look up the caller's partnership, if any.
    ///
    /// GET /api/v1/partners/{userId}
    pub async fn get_partner_impl(&self, user_id: &str) -> Result<Option<RemotePartnership>> {
        let url = format!("{}/api/v1/partners/{user_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::parse_response(response).await?))
    }
}

#[async_trait]
impl PartnerRemoteApi for PartnerApiClient {
    async fn create_invite(&self, creator_id: &str) -> tandem_core::Result<RemoteInvite> {
        Ok(self.create_invite_impl(creator_id).await?)
    }

    async fn accept_invite(
        &self,
        code: &str,
        acceptor_id: &str,
    ) -> tandem_core::Result<RemotePartnership> {
        Ok(self.accept_invite_impl(code, acceptor_id).await?)
    }

    async fn cancel_invite(&self, code: &str, creator_id: &str) -> tandem_core::Result<()> {
        Ok(self.cancel_invite_impl(code, creator_id).await?)
    }

    async fn dissolve_partnership(&self, user_id: &str) -> tandem_core::Result<()> {
        Ok(self.dissolve_partnership_impl(user_id).await?)
    }

    async fn get_partner(&self, user_id: &str) -> tandem_core::Result<Option<RemotePartnership>> {
        Ok(self.get_partner_impl(user_id).await?)
    }
}
