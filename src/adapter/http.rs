//! HTTP adapters
//!
//! Outbound clients for the third-party authorization service and the
//! notification service. Both POST the presented transfer as JSON; the
//! authorizer answers `{"approved": <bool>}`, the notifier's body is
//! ignored. Transport failures map onto the port error types and are
//! handled by the engine (denial, or non-fatal delivery failure).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::entity::Transfer;
use crate::ports::{Authorizer, AuthorizerError, Notifier, NotifierError};
use crate::presenter::present_transfer;

/// Decision body returned by the authorization service.
#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    approved: bool,
}

/// Authorizer backed by a synchronous HTTP decision service.
#[derive(Debug, Clone)]
pub struct HttpAuthorizer {
    client: Client,
    url: String,
}

impl HttpAuthorizer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Authorizer for HttpAuthorizer {
    async fn authorize(&self, transfer: &Transfer) -> Result<bool, AuthorizerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&present_transfer(transfer))
            .send()
            .await
            .map_err(|e| AuthorizerError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthorizerError(e.to_string()))?;

        let decision: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| AuthorizerError(e.to_string()))?;

        Ok(decision.approved)
    }
}

/// Notifier backed by an HTTP webhook.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    url: String,
}

impl HttpNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, transfer: &Transfer) -> Result<(), NotifierError> {
        self.client
            .post(&self.url)
            .json(&present_transfer(transfer))
            .send()
            .await
            .map_err(|e| NotifierError(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifierError(e.to_string()))?;

        Ok(())
    }
}
