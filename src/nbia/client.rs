//! NBIA REST client using reqwest

use crate::error::{Error, Result};
use crate::nbia::{CartService, ServiceConfig};
use crate::types::{
    AuthOutcome, CartRequest, CartResponse, Credentials, SeriesQuery, SeriesRecord, SessionToken,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// OAuth client id expected by the NBIA token endpoint
pub const CLIENT_ID: &str = "NBIA";

/// Account NBIA issues anonymous tokens for
pub const GUEST_USERNAME: &str = "nbia_guest";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// NBIA service over HTTP
pub struct NbiaClient {
    client: Client,
    config: ServiceConfig,
}

impl NbiaClient {
    /// Create a new client for the given endpoints
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::NbiaApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.config
            .api_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid API endpoint '{path}': {e}")))
    }

    /// Request an anonymous token, or the status the token endpoint refused it with
    ///
    /// The API base only accepts bearer requests, so calls without a user
    /// session go out under the guest account.
    async fn guest_token(&self) -> Result<std::result::Result<SessionToken, u16>> {
        debug!("requesting NBIA guest token");
        let guest = Credentials {
            username: GUEST_USERNAME.to_string(),
            password: String::new(),
        };
        let outcome = self.authenticate(&guest).await?;
        Ok(outcome.token.ok_or(outcome.status))
    }
}

#[async_trait]
impl CartService for NbiaClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome> {
        debug!(username = %credentials.username, "requesting NBIA token");
        let response = self
            .client
            .post(self.config.token_url.clone())
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("client_id", CLIENT_ID),
                ("grant_type", "password"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(status, "token request rejected");
            return Ok(AuthOutcome {
                status,
                token: None,
            });
        }

        let token: TokenResponse = response.json().await?;
        debug!(status, expires_in = ?token.expires_in, "obtained NBIA token");
        Ok(AuthOutcome {
            status,
            token: Some(SessionToken {
                access_token: token.access_token,
                expires_in: token.expires_in,
            }),
        })
    }

    async fn create_shared_cart(
        &self,
        request: &CartRequest,
        session: Option<&SessionToken>,
    ) -> Result<CartResponse> {
        debug!(
            name = %request.name,
            count = request.identifiers.len(),
            authenticated = session.is_some(),
            "creating shared cart"
        );

        // One `list` field per series, in upload order
        let mut form: Vec<(&str, &str)> = vec![
            ("name", request.name.as_str()),
            ("description", request.description.as_deref().unwrap_or_default()),
            ("url", request.description_url.as_deref().unwrap_or_default()),
        ];
        form.extend(request.identifiers.iter().map(|id| ("list", id.as_str())));

        let guest;
        let token = if let Some(token) = session {
            token
        } else {
            match self.guest_token().await? {
                Ok(token) => {
                    guest = token;
                    &guest
                }
                Err(status) => {
                    debug!(status, "guest token refused");
                    return Ok(CartResponse {
                        status,
                        body: String::new(),
                    });
                }
            }
        };

        let response = self
            .client
            .post(self.endpoint("createSharedList")?)
            .bearer_auth(&token.access_token)
            .form(&form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, "create shared cart responded");
        Ok(CartResponse { status, body })
    }

    async fn get_series(
        &self,
        query: &SeriesQuery,
        session: Option<&SessionToken>,
    ) -> Result<Vec<SeriesRecord>> {
        debug!(collection = %query.collection, "fetching series metadata");

        let mut params = vec![("Collection", query.collection.as_str())];
        if let Some(ref modality) = query.modality {
            params.push(("Modality", modality.as_str()));
        }
        if let Some(ref body_part) = query.body_part {
            params.push(("BodyPartExamined", body_part.as_str()));
        }

        let guest;
        let token = if let Some(token) = session {
            token
        } else {
            guest = self.guest_token().await?.map_err(|status| {
                Error::NbiaApi(format!("guest token refused (status {status})"))
            })?;
            &guest
        };

        let body = self
            .client
            .get(self.endpoint("v1/getSeries")?)
            .bearer_auth(&token.access_token)
            .query(&params)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::NbiaApi(e.to_string()))?
            .text()
            .await?;

        // NBIA answers an empty body rather than `[]` when nothing matches
        if body.trim().is_empty() {
            debug!("no series found");
            return Ok(Vec::new());
        }

        let series: Vec<SeriesRecord> = serde_json::from_str(&body)
            .map_err(|e| Error::NbiaApi(format!("invalid series response: {e}")))?;
        debug!(count = series.len(), "fetched series metadata");
        Ok(series)
    }

    fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
