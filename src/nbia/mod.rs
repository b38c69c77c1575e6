//! NBIA cart service
//!
//! The orchestrator only talks to the [`CartService`] trait, so the HTTP
//! client can be swapped for an in-memory mock in tests.

mod client;

pub use client::{NbiaClient, CLIENT_ID};

use crate::error::Result;
use crate::types::{AuthOutcome, CartRequest, CartResponse, Credentials, SeriesQuery, SeriesRecord, SessionToken};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Endpoints and limits for one NBIA deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base of the REST services, ends with `/`
    pub api_url: Url,
    /// OAuth token endpoint
    pub token_url: Url,
    /// Search page that opens saved carts
    pub cart_search_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

/// Remote cataloging service operations
#[async_trait]
pub trait CartService: Send + Sync {
    /// Exchange credentials for a session token
    ///
    /// A rejected login is reported through [`AuthOutcome::status`]; `Err`
    /// means the request itself failed.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome>;

    /// Create a shared cart, returning the raw status and body
    ///
    /// Without a session the call is made under the guest account; a
    /// refused guest token is reported as the token endpoint's status.
    async fn create_shared_cart(
        &self,
        request: &CartRequest,
        session: Option<&SessionToken>,
    ) -> Result<CartResponse>;

    /// Look up series metadata for a collection
    async fn get_series(
        &self,
        query: &SeriesQuery,
        session: Option<&SessionToken>,
    ) -> Result<Vec<SeriesRecord>>;

    /// Get the service configuration
    fn config(&self) -> &ServiceConfig;
}
