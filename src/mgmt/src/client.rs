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

use crate::Result;
use crate::model;
use crate::stub::MessageBusStub;
use std::sync::Arc;

/// A client for the Message Bus control plane.
///
/// ```no_run
/// # async fn sample() -> msgbus_mgmt::Result<()> {
/// use msgbus_mgmt::client::MessageBusAdmin;
/// let client = MessageBusAdmin::builder()
///     .with_subscription("my-subscription")
///     .build()
///     .await?;
/// let groups = client.list_namespaces("my-group").await?;
/// # Ok(()) }
/// ```
///
/// The client is a thin wrapper over an implementation of
/// [MessageBusStub][crate::stub::MessageBusStub]. Cloning it is cheap, the
/// underlying implementation is shared.
#[derive(Clone, Debug)]
pub struct MessageBusAdmin {
    inner: Arc<dyn MessageBusStub>,
}

impl MessageBusAdmin {
    /// Returns a builder for the production client.
    pub fn builder() -> crate::builder::ClientBuilder {
        crate::builder::ClientBuilder::new()
    }

    /// Creates a client backed by a custom stub implementation.
    ///
    /// This is mainly useful in tests, where the stub is a mock of the
    /// control plane.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: MessageBusStub + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    pub async fn create_resource_group(
        &self,
        name: &str,
        group: model::ResourceGroup,
    ) -> Result<model::ResourceGroup> {
        self.inner.create_resource_group(name.into(), group).await
    }

    /// Deletes a resource group by its full resource id.
    pub async fn delete_resource_group(&self, id: &str) -> Result<()> {
        self.inner.delete_resource_group(id.into()).await
    }

    pub async fn create_namespace(
        &self,
        resource_group: &str,
        name: &str,
        namespace: model::Namespace,
    ) -> Result<model::Namespace> {
        self.inner
            .create_namespace(resource_group.into(), name.into(), namespace)
            .await
    }

    pub async fn update_namespace(
        &self,
        resource_group: &str,
        name: &str,
        patch: model::NamespacePatch,
    ) -> Result<model::Namespace> {
        self.inner
            .update_namespace(resource_group.into(), name.into(), patch)
            .await
    }

    pub async fn delete_namespace(&self, resource_group: &str, name: &str) -> Result<()> {
        self.inner
            .delete_namespace(resource_group.into(), name.into())
            .await
    }

    pub async fn list_namespaces(&self, resource_group: &str) -> Result<Vec<model::Namespace>> {
        self.inner.list_namespaces(resource_group.into()).await
    }

    pub async fn create_queue(
        &self,
        resource_group: &str,
        namespace: &str,
        name: &str,
        queue: model::Queue,
    ) -> Result<model::Queue> {
        self.inner
            .create_queue(resource_group.into(), namespace.into(), name.into(), queue)
            .await
    }

    pub async fn update_queue(
        &self,
        resource_group: &str,
        namespace: &str,
        name: &str,
        queue: model::Queue,
    ) -> Result<model::Queue> {
        self.inner
            .update_queue(resource_group.into(), namespace.into(), name.into(), queue)
            .await
    }

    pub async fn delete_queue(
        &self,
        resource_group: &str,
        namespace: &str,
        name: &str,
    ) -> Result<()> {
        self.inner
            .delete_queue(resource_group.into(), namespace.into(), name.into())
            .await
    }

    pub async fn list_queues(
        &self,
        resource_group: &str,
        namespace: &str,
    ) -> Result<Vec<model::Queue>> {
        self.inner
            .list_queues(resource_group.into(), namespace.into())
            .await
    }

    pub async fn list_authorization_rules(
        &self,
        resource_group: &str,
        namespace: &str,
    ) -> Result<Vec<model::AuthorizationRule>> {
        self.inner
            .list_authorization_rules(resource_group.into(), namespace.into())
            .await
    }

    pub async fn get_keys(
        &self,
        resource_group: &str,
        namespace: &str,
        rule: &str,
    ) -> Result<model::AccessKeys> {
        self.inner
            .get_keys(resource_group.into(), namespace.into(), rule.into())
            .await
    }

    pub async fn regenerate_keys(
        &self,
        resource_group: &str,
        namespace: &str,
        rule: &str,
        kind: model::KeyKind,
    ) -> Result<model::AccessKeys> {
        self.inner
            .regenerate_keys(resource_group.into(), namespace.into(), rule.into(), kind)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceGroup;

    mockall::mock! {
        #[derive(Debug)]
        MessageBus {}
        #[async_trait::async_trait]
        impl MessageBusStub for MessageBus {
            async fn create_resource_group(&self, name: String, group: model::ResourceGroup) -> Result<model::ResourceGroup>;
            async fn delete_resource_group(&self, id: String) -> Result<()>;
            async fn create_namespace(&self, resource_group: String, name: String, namespace: model::Namespace) -> Result<model::Namespace>;
            async fn update_namespace(&self, resource_group: String, name: String, patch: model::NamespacePatch) -> Result<model::Namespace>;
            async fn delete_namespace(&self, resource_group: String, name: String) -> Result<()>;
            async fn list_namespaces(&self, resource_group: String) -> Result<Vec<model::Namespace>>;
            async fn create_queue(&self, resource_group: String, namespace: String, name: String, queue: model::Queue) -> Result<model::Queue>;
            async fn update_queue(&self, resource_group: String, namespace: String, name: String, queue: model::Queue) -> Result<model::Queue>;
            async fn delete_queue(&self, resource_group: String, namespace: String, name: String) -> Result<()>;
            async fn list_queues(&self, resource_group: String, namespace: String) -> Result<Vec<model::Queue>>;
            async fn list_authorization_rules(&self, resource_group: String, namespace: String) -> Result<Vec<model::AuthorizationRule>>;
            async fn get_keys(&self, resource_group: String, namespace: String, rule: String) -> Result<model::AccessKeys>;
            async fn regenerate_keys(&self, resource_group: String, namespace: String, rule: String, kind: model::KeyKind) -> Result<model::AccessKeys>;
        }
    }

    #[tokio::test]
    async fn client_forwards_to_stub() -> anyhow::Result<()> {
        let mut mock = MockMessageBus::new();
        mock.expect_create_resource_group()
            .withf(|name, group| name == "rg-test" && group.location == "us-central1")
            .return_once(|name, group| Ok(group.set_name(name)));

        let client = MessageBusAdmin::from_stub(mock);
        let group = client
            .create_resource_group("rg-test", ResourceGroup::new().set_location("us-central1"))
            .await?;
        assert_eq!(group.name, "rg-test");
        Ok(())
    }

    #[tokio::test]
    async fn client_is_cheaply_cloneable() {
        let mut mock = MockMessageBus::new();
        mock.expect_delete_resource_group()
            .times(2)
            .returning(|_| Ok(()));

        let client = MessageBusAdmin::from_stub(mock);
        let clone = client.clone();
        client.delete_resource_group("/id").await.unwrap();
        clone.delete_resource_group("/id").await.unwrap();
    }
}
