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

//! The HTTP implementation of [MessageBusStub].

use crate::credentials::{ClientSecretCredentials, TokenProvider};
use crate::stub::MessageBusStub;
use crate::{Error, Result, model};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_VERSION: &str = "2025-05-01";

/// Characters escaped in path segments built from resource names.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// Initial delay between long-running operation polls. Doubles on each
/// attempt up to [MAX_POLL_DELAY].
const INITIAL_POLL_DELAY: Duration = Duration::from_millis(100);
const MAX_POLL_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
enum OperationState {
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationStatus {
    status: OperationState,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(default)]
    next_link: Option<String>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RegenerateKeysRequest {
    key_kind: model::KeyKind,
}

/// Sends authenticated requests to the control plane and waits for
/// long-running operations to finish.
#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    endpoint: String,
    subscription: String,
    tokens: TokenProvider,
}

impl Transport {
    pub(crate) fn new(
        endpoint: String,
        authority: &str,
        subscription: String,
        credentials: ClientSecretCredentials,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("msgbus-mgmt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)?;
        let tokens = TokenProvider::new(http.clone(), authority, credentials);
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription,
            tokens,
        })
    }

    /// Builds the URL for a path under the client's subscription.
    fn url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/subscriptions/{}/{}?api-version={}",
            self.endpoint, self.subscription, path, API_VERSION
        )
    }

    /// Builds the URL for a resource addressed by its full id.
    fn url_for_id(&self, id: &str) -> String {
        format!("{}{}?api-version={}", self.endpoint, id, API_VERSION)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let token = self.tokens.token().await?;
        let mut builder = self.http.request(method, &url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let response = builder.send().await.map_err(Error::Transport)?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::service_error(response).await)
    }

    async fn service_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let envelope = serde_json::from_str::<ErrorEnvelope>(&body).unwrap_or_default();
        let message = if envelope.error.message.is_empty() {
            body
        } else {
            envelope.error.message
        };
        Error::Service {
            status,
            code: envelope.error.code,
            message,
        }
    }

    async fn json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(Error::Transport)?;
        serde_json::from_slice(&bytes).map_err(Error::Serde)
    }

    /// Waits for the operation behind a `202 Accepted` response.
    ///
    /// The service reports progress at the URL in the `operation-location`
    /// header. Responses without that header are treated as already done.
    async fn await_operation(&self, response: &reqwest::Response) -> Result<()> {
        if response.status() != StatusCode::ACCEPTED {
            return Ok(());
        }
        let Some(target) = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
        else {
            return Ok(());
        };

        let mut delay = INITIAL_POLL_DELAY;
        loop {
            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2).min(MAX_POLL_DELAY);

            let poll = self.send(Method::GET, target.clone(), None).await?;
            let status = self.json::<OperationStatus>(poll).await?;
            tracing::debug!("polled {target}, status={:?}", status.status);
            match status.status {
                OperationState::InProgress => continue,
                OperationState::Succeeded => return Ok(()),
                OperationState::Failed | OperationState::Canceled => {
                    let error = status.error.unwrap_or_default();
                    return Err(Error::Operation {
                        code: error.code,
                        message: error.message,
                    });
                }
            }
        }
    }

    /// PUT or PATCH a resource and return its terminal state.
    async fn write_resource<B, R>(&self, method: Method, segments: &[&str], body: &B) -> Result<R>
    where
        B: serde::Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(segments);
        let body = serde_json::to_value(body).map_err(Error::Serde)?;
        let response = self.send(method, url.clone(), Some(body)).await?;
        if response.status() == StatusCode::ACCEPTED {
            self.await_operation(&response).await?;
            // The operation result is the resource itself, re-fetch it.
            let current = self.send(Method::GET, url, None).await?;
            return self.json(current).await;
        }
        self.json(response).await
    }

    async fn delete_resource(&self, url: String) -> Result<()> {
        let response = self.send(Method::DELETE, url, None).await?;
        self.await_operation(&response).await
    }

    /// GET a paginated collection, following `nextLink` continuations.
    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>> {
        let mut url = self.url(segments);
        let mut items = Vec::new();
        loop {
            let response = self.send(Method::GET, url, None).await?;
            let page = self.json::<ListPage<T>>(response).await?;
            items.extend(page.value);
            match page.next_link {
                Some(next) if !next.is_empty() => url = next,
                _ => return Ok(items),
            }
        }
    }
}

#[async_trait::async_trait]
impl MessageBusStub for Transport {
    async fn create_resource_group(
        &self,
        name: String,
        group: model::ResourceGroup,
    ) -> Result<model::ResourceGroup> {
        self.write_resource(Method::PUT, &["resourceGroups", &name], &group)
            .await
    }

    async fn delete_resource_group(&self, id: String) -> Result<()> {
        self.delete_resource(self.url_for_id(&id)).await
    }

    async fn create_namespace(
        &self,
        resource_group: String,
        name: String,
        namespace: model::Namespace,
    ) -> Result<model::Namespace> {
        self.write_resource(
            Method::PUT,
            &["resourceGroups", &resource_group, "namespaces", &name],
            &namespace,
        )
        .await
    }

    async fn update_namespace(
        &self,
        resource_group: String,
        name: String,
        patch: model::NamespacePatch,
    ) -> Result<model::Namespace> {
        self.write_resource(
            Method::PATCH,
            &["resourceGroups", &resource_group, "namespaces", &name],
            &patch,
        )
        .await
    }

    async fn delete_namespace(&self, resource_group: String, name: String) -> Result<()> {
        let url = self.url(&["resourceGroups", &resource_group, "namespaces", &name]);
        self.delete_resource(url).await
    }

    async fn list_namespaces(&self, resource_group: String) -> Result<Vec<model::Namespace>> {
        self.list(&["resourceGroups", &resource_group, "namespaces"])
            .await
    }

    async fn create_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
        queue: model::Queue,
    ) -> Result<model::Queue> {
        self.write_resource(
            Method::PUT,
            &[
                "resourceGroups",
                &resource_group,
                "namespaces",
                &namespace,
                "queues",
                &name,
            ],
            &queue,
        )
        .await
    }

    async fn update_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
        queue: model::Queue,
    ) -> Result<model::Queue> {
        self.write_resource(
            Method::PUT,
            &[
                "resourceGroups",
                &resource_group,
                "namespaces",
                &namespace,
                "queues",
                &name,
            ],
            &queue,
        )
        .await
    }

    async fn delete_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
    ) -> Result<()> {
        let url = self.url(&[
            "resourceGroups",
            &resource_group,
            "namespaces",
            &namespace,
            "queues",
            &name,
        ]);
        self.delete_resource(url).await
    }

    async fn list_queues(
        &self,
        resource_group: String,
        namespace: String,
    ) -> Result<Vec<model::Queue>> {
        self.list(&[
            "resourceGroups",
            &resource_group,
            "namespaces",
            &namespace,
            "queues",
        ])
        .await
    }

    async fn list_authorization_rules(
        &self,
        resource_group: String,
        namespace: String,
    ) -> Result<Vec<model::AuthorizationRule>> {
        self.list(&[
            "resourceGroups",
            &resource_group,
            "namespaces",
            &namespace,
            "authorizationRules",
        ])
        .await
    }

    async fn get_keys(
        &self,
        resource_group: String,
        namespace: String,
        rule: String,
    ) -> Result<model::AccessKeys> {
        let url = self.url(&[
            "resourceGroups",
            &resource_group,
            "namespaces",
            &namespace,
            "authorizationRules",
            &rule,
            "listKeys",
        ]);
        let response = self.send(Method::POST, url, None).await?;
        self.json(response).await
    }

    async fn regenerate_keys(
        &self,
        resource_group: String,
        namespace: String,
        rule: String,
        kind: model::KeyKind,
    ) -> Result<model::AccessKeys> {
        let url = self.url(&[
            "resourceGroups",
            &resource_group,
            "namespaces",
            &namespace,
            "authorizationRules",
            &rule,
            "regenerateKeys",
        ]);
        let body = serde_json::to_value(RegenerateKeysRequest { key_kind: kind })
            .map_err(Error::Serde)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        self.json(response).await
    }
}
