// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client-credential authentication for the control plane.

use crate::{Error, Result};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A tenant-scoped client id and secret.
#[derive(Clone)]
pub struct ClientSecretCredentials {
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

impl ClientSecretCredentials {
    pub fn new<T, C, S>(tenant_id: T, client_id: C, client_secret: S) -> Self
    where
        T: Into<String>,
        C: Into<String>,
        S: Into<String>,
    {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads the credentials from `MSGBUS_TENANT_ID`, `MSGBUS_CLIENT_ID`,
    /// and `MSGBUS_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| Error::Authentication(format!("missing environment variable {name}")))
        };
        Ok(Self {
            tenant_id: var("MSGBUS_TENANT_ID")?,
            client_id: var("MSGBUS_CLIENT_ID")?,
            client_secret: var("MSGBUS_CLIENT_SECRET")?,
        })
    }
}

impl std::fmt::Debug for ClientSecretCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret stays out of logs and error messages.
        f.debug_struct("ClientSecretCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: u64,
}

fn default_expiry() -> u64 {
    3600
}

struct CachedToken {
    value: String,
    expiry: Instant,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

/// Fetches bearer tokens from the authority and caches them until close to
/// expiry.
#[derive(Debug)]
pub(crate) struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    credentials: ClientSecretCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub(crate) fn new(
        http: reqwest::Client,
        authority: &str,
        credentials: ClientSecretCredentials,
    ) -> Self {
        let token_url = format!(
            "{}/{}/token",
            authority.trim_end_matches('/'),
            credentials.tenant_id
        );
        Self {
            http,
            token_url,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, fetching a fresh one if needed.
    pub(crate) async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expiry > Instant::now() + EXPIRY_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http
            .post(&self.token_url)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(self.form_body())
            .send()
            .await
            .map_err(Error::Transport)?;
        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "token endpoint returned HTTP {}",
                response.status().as_u16()
            )));
        }
        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(Error::Transport)?;

        let expiry = Instant::now() + Duration::from_secs(token.expires_in);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expiry,
        });
        Ok(token.access_token)
    }

    fn form_body(&self) -> String {
        let enc = |v: &str| utf8_percent_encode(v, NON_ALPHANUMERIC).to_string();
        format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            enc(&self.credentials.client_id),
            enc(&self.credentials.client_secret)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::json_encoded};
    use serde_json::json;

    #[test]
    fn debug_redacts_the_secret() {
        let credentials = ClientSecretCredentials::new("tenant", "client", "hunter2");
        let formatted = format!("{credentials:?}");
        assert!(formatted.contains("tenant"), "{formatted}");
        assert!(!formatted.contains("hunter2"), "{formatted}");
    }

    #[test]
    fn form_body_escapes_values() {
        let provider = TokenProvider::new(
            reqwest::Client::new(),
            "https://login.invalid",
            ClientSecretCredentials::new("t", "client id", "s&cret"),
        );
        let body = provider.form_body();
        assert!(body.contains("client%20id"), "{body}");
        assert!(body.contains("s%26cret"), "{body}");
        assert!(!body.contains("s&cret"), "{body}");
    }

    #[tokio::test]
    async fn tokens_are_cached_until_expiry() -> anyhow::Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/test-tenant/token"))
                .times(1)
                .respond_with(json_encoded(json!({
                    "access_token": "test-token",
                    "expires_in": 3600,
                }))),
        );

        let provider = TokenProvider::new(
            reqwest::Client::new(),
            &format!("http://{}", server.addr()),
            ClientSecretCredentials::new("test-tenant", "client", "secret"),
        );
        assert_eq!(provider.token().await?, "test-token");
        // Served from the cache, the server expectation allows one call only.
        assert_eq!(provider.token().await?, "test-token");
        Ok(())
    }

    #[tokio::test]
    async fn token_endpoint_errors_are_authentication_errors() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/test-tenant/token"))
                .respond_with(httptest::responders::status_code(401)),
        );

        let provider = TokenProvider::new(
            reqwest::Client::new(),
            &format!("http://{}", server.addr()),
            ClientSecretCredentials::new("test-tenant", "client", "bad-secret"),
        );
        let result = provider.token().await;
        assert!(
            matches!(result, Err(Error::Authentication(_))),
            "{result:?}"
        );
    }
}
