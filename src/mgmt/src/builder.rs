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

use crate::client::MessageBusAdmin;
use crate::credentials::ClientSecretCredentials;
use crate::transport::Transport;
use crate::{Error, Result};

/// Configures and builds a production [MessageBusAdmin].
///
/// Anything not set explicitly falls back to the environment: credentials
/// come from `MSGBUS_TENANT_ID` / `MSGBUS_CLIENT_ID` / `MSGBUS_CLIENT_SECRET`
/// and the subscription from `MSGBUS_SUBSCRIPTION_ID`. `MSGBUS_ENDPOINT` and
/// `MSGBUS_AUTHORITY` override the default service endpoints.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    authority: Option<String>,
    subscription: Option<String>,
    credentials: Option<ClientSecretCredentials>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Overrides the control plane endpoint.
    pub fn with_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Overrides the token authority.
    pub fn with_authority<T: Into<String>>(mut self, v: T) -> Self {
        self.authority = Some(v.into());
        self
    }

    /// Sets the subscription all requests are scoped to.
    pub fn with_subscription<T: Into<String>>(mut self, v: T) -> Self {
        self.subscription = Some(v.into());
        self
    }

    /// Uses the given credentials instead of reading them from the
    /// environment.
    pub fn with_credentials(mut self, v: ClientSecretCredentials) -> Self {
        self.credentials = Some(v);
        self
    }

    pub async fn build(self) -> Result<MessageBusAdmin> {
        let endpoint = self
            .endpoint
            .or_else(|| std::env::var("MSGBUS_ENDPOINT").ok())
            .unwrap_or_else(|| crate::DEFAULT_HOST.to_string());
        let authority = self
            .authority
            .or_else(|| std::env::var("MSGBUS_AUTHORITY").ok())
            .unwrap_or_else(|| crate::DEFAULT_AUTHORITY.to_string());
        let subscription = match self
            .subscription
            .or_else(|| std::env::var("MSGBUS_SUBSCRIPTION_ID").ok())
        {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Err(Error::Configuration(
                    "no subscription id, set MSGBUS_SUBSCRIPTION_ID or use with_subscription()"
                        .into(),
                ));
            }
        };
        let credentials = match self.credentials {
            Some(c) => c,
            None => ClientSecretCredentials::from_env()?,
        };

        let transport = Transport::new(endpoint, &authority, subscription, credentials)?;
        Ok(MessageBusAdmin::from_stub(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_configuration() -> anyhow::Result<()> {
        let client = ClientBuilder::new()
            .with_endpoint("https://management.invalid")
            .with_authority("https://login.invalid")
            .with_subscription("sub-test")
            .with_credentials(ClientSecretCredentials::new("tenant", "client", "secret"))
            .build()
            .await;
        assert!(client.is_ok(), "{client:?}");
        Ok(())
    }

    #[tokio::test]
    async fn missing_subscription_is_a_configuration_error() {
        // An empty subscription must be rejected even if the variable is set.
        let result = ClientBuilder::new()
            .with_subscription("")
            .with_credentials(ClientSecretCredentials::new("tenant", "client", "secret"))
            .build()
            .await;
        assert!(
            matches!(result, Err(Error::Configuration(_))),
            "{result:?}"
        );
    }
}
