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

/// The interface between [MessageBusAdmin][crate::client::MessageBusAdmin]
/// and the control plane.
///
/// The production implementation sends authenticated HTTP requests to the
/// service. Tests mock this trait (e.g. with [mockall]) and build the client
/// with [from_stub][crate::client::MessageBusAdmin::from_stub].
///
/// Every method that mutates remote state returns only once the remote
/// operation has reached a terminal state.
///
/// [mockall]: https://docs.rs/mockall
#[async_trait::async_trait]
pub trait MessageBusStub: std::fmt::Debug + Send + Sync {
    /// Creates (or replaces) a resource group.
    async fn create_resource_group(
        &self,
        name: String,
        group: model::ResourceGroup,
    ) -> Result<model::ResourceGroup>;

    /// Deletes a resource group, addressed by its full resource id, along
    /// with everything provisioned inside it.
    async fn delete_resource_group(&self, id: String) -> Result<()>;

    /// Creates (or replaces) a namespace inside a resource group.
    async fn create_namespace(
        &self,
        resource_group: String,
        name: String,
        namespace: model::Namespace,
    ) -> Result<model::Namespace>;

    /// Applies a merge-patch to a namespace. Fields left unset in the patch
    /// keep their current value.
    async fn update_namespace(
        &self,
        resource_group: String,
        name: String,
        patch: model::NamespacePatch,
    ) -> Result<model::Namespace>;

    /// Deletes a namespace and any queues remaining in it.
    async fn delete_namespace(&self, resource_group: String, name: String) -> Result<()>;

    /// Lists all namespaces in a resource group.
    async fn list_namespaces(&self, resource_group: String) -> Result<Vec<model::Namespace>>;

    /// Creates (or replaces) a queue inside a namespace.
    async fn create_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
        queue: model::Queue,
    ) -> Result<model::Queue>;

    /// Replaces the configuration of an existing queue.
    async fn update_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
        queue: model::Queue,
    ) -> Result<model::Queue>;

    /// Deletes a queue.
    async fn delete_queue(
        &self,
        resource_group: String,
        namespace: String,
        name: String,
    ) -> Result<()>;

    /// Lists all queues in a namespace.
    async fn list_queues(
        &self,
        resource_group: String,
        namespace: String,
    ) -> Result<Vec<model::Queue>>;

    /// Lists the authorization rules scoped to a namespace.
    async fn list_authorization_rules(
        &self,
        resource_group: String,
        namespace: String,
    ) -> Result<Vec<model::AuthorizationRule>>;

    /// Fetches the access keys of an authorization rule.
    async fn get_keys(
        &self,
        resource_group: String,
        namespace: String,
        rule: String,
    ) -> Result<model::AccessKeys>;

    /// Regenerates one key of an authorization rule and returns the
    /// resulting key pair.
    async fn regenerate_keys(
        &self,
        resource_group: String,
        namespace: String,
        rule: String,
        kind: model::KeyKind,
    ) -> Result<model::AccessKeys>;
}
