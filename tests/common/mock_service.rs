//! In-memory cart service that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use nbia_cart::error::{Error, Result};
use nbia_cart::nbia::{CartService, ServiceConfig};
use nbia_cart::types::{
    AuthOutcome, CartRequest, CartResponse, Credentials, SeriesQuery, SeriesRecord, SessionToken,
};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Base of the cart search page used by the mock
pub const MOCK_SEARCH_URL: &str = "https://nbia.example.org/nbia-search/";

/// A recorded service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Login attempt with this username
    Authenticate(String),
    /// Cart creation
    CreateCart {
        /// Cart name
        name: String,
        /// Identifiers sent
        identifiers: Vec<String>,
        /// Bearer token attached, if any
        token: Option<String>,
    },
    /// Series lookup for a collection
    GetSeries(String),
}

/// Mock cart service with scripted responses
pub struct MockCartService {
    config: ServiceConfig,
    auth_status: u16,
    cart_status: u16,
    transport_failure: bool,
    series: Vec<SeriesRecord>,
    calls: Mutex<Vec<Call>>,
}

impl MockCartService {
    /// A service that accepts every login and creates every cart
    pub fn new() -> Self {
        Self {
            config: ServiceConfig {
                api_url: Url::parse("https://services.example.org/nbia-api/services/").unwrap(),
                token_url: Url::parse("https://services.example.org/nbia-api/oauth/token").unwrap(),
                cart_search_url: Url::parse(MOCK_SEARCH_URL).unwrap(),
                timeout: Duration::from_secs(5),
            },
            auth_status: 200,
            cart_status: 200,
            transport_failure: false,
            series: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Status returned by the token endpoint
    pub fn with_auth_status(mut self, status: u16) -> Self {
        self.auth_status = status;
        self
    }

    /// Status returned by create-cart
    pub fn with_cart_status(mut self, status: u16) -> Self {
        self.cart_status = status;
        self
    }

    /// Make every call fail before a response arrives
    pub fn with_transport_failure(mut self) -> Self {
        self.transport_failure = true;
        self
    }

    /// Series returned by the lookup
    pub fn with_series(mut self, series: Vec<SeriesRecord>) -> Self {
        self.series = series;
        self
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether create-cart was ever called
    pub fn created_cart(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::CreateCart { .. }))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_transport(&self) -> Result<()> {
        if self.transport_failure {
            Err(Error::NbiaApi("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockCartService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartService for MockCartService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome> {
        self.record(Call::Authenticate(credentials.username.clone()));
        self.check_transport()?;

        let token = (self.auth_status == 200).then(|| SessionToken {
            access_token: format!("token-for-{}", credentials.username),
            expires_in: Some(7200),
        });
        Ok(AuthOutcome {
            status: self.auth_status,
            token,
        })
    }

    async fn create_shared_cart(
        &self,
        request: &CartRequest,
        session: Option<&SessionToken>,
    ) -> Result<CartResponse> {
        self.record(Call::CreateCart {
            name: request.name.clone(),
            identifiers: request.identifiers.as_slice().to_vec(),
            token: session.map(|t| t.access_token.clone()),
        });
        self.check_transport()?;

        Ok(CartResponse {
            status: self.cart_status,
            body: String::new(),
        })
    }

    async fn get_series(
        &self,
        query: &SeriesQuery,
        _session: Option<&SessionToken>,
    ) -> Result<Vec<SeriesRecord>> {
        self.record(Call::GetSeries(query.collection.clone()));
        self.check_transport()?;
        Ok(self.series.clone())
    }

    fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
