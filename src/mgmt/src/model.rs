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

//! The messages and enums used by the Message Bus control plane.
//!
//! All resource types use the wire names of the service (camelCase). Fields
//! that the caller leaves unset are omitted from request bodies, which is
//! what gives the patch types their merge semantics: the service never sees
//! an explicit `null` for a field the caller did not intend to change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logical container for provisioned resources.
///
/// Deleting a resource group deletes everything created inside it, which is
/// why the provisioning sample uses one as its cleanup boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ResourceGroup {
    /// The full resource id, e.g.
    /// `/subscriptions/{subscription}/resourceGroups/{name}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The resource group name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The region hosting the group's metadata.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
}

impl ResourceGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }
}

/// The billing tier of a namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SkuTier {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl std::fmt::Display for SkuTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "Basic"),
            Self::Standard => write!(f, "Standard"),
            Self::Premium => write!(f, "Premium"),
        }
    }
}

/// The SKU of a namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Sku {
    pub tier: SkuTier,
}

impl Sku {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tier(mut self, v: SkuTier) -> Self {
        self.tier = v;
        self
    }
}

/// A messaging namespace: the container for queues and their shared
/// access/billing boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Namespace {
    /// The full resource id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The namespace name, unique within its resource group.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The region hosting the namespace.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,

    /// The state of the last provisioning operation. Output only.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provisioning_state: String,

    /// Creation time of the namespace. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time of the namespace. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    pub fn set_sku(mut self, v: Sku) -> Self {
        self.sku = Some(v);
        self
    }
}

/// A partial namespace, used to change a subset of its fields.
///
/// Unset fields are omitted from the request, so the service leaves the
/// corresponding namespace fields untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NamespacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
}

impl NamespacePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = Some(v.into());
        self
    }

    pub fn set_sku(mut self, v: Sku) -> Self {
        self.sku = Some(v);
        self
    }
}

/// A managed message queue within a namespace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Queue {
    /// The full resource id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The queue name, unique within its namespace.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The maximum total size of the queue, in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_in_megabytes: Option<i64>,

    /// How long a received message stays locked before it becomes visible to
    /// other receivers again, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_duration_seconds: Option<u32>,

    /// If true, expired messages move to the dead-letter subqueue instead of
    /// being dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_lettering_on_message_expiration: Option<bool>,

    /// The number of messages currently in the queue. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<i64>,

    /// The storage currently used by the queue, in bytes. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<i64>,

    /// Creation time of the queue. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time of the queue. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_max_size_in_megabytes(mut self, v: i64) -> Self {
        self.max_size_in_megabytes = Some(v);
        self
    }

    pub fn set_lock_duration_seconds(mut self, v: u32) -> Self {
        self.lock_duration_seconds = Some(v);
        self
    }

    pub fn set_dead_lettering_on_message_expiration(mut self, v: bool) -> Self {
        self.dead_lettering_on_message_expiration = Some(v);
        self
    }
}

/// A right granted by an authorization rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AccessRight {
    Listen,
    Send,
    Manage,
}

/// A named access policy scoped to a namespace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AuthorizationRule {
    /// The full resource id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The rule name, unique within its namespace.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The rights granted by this rule.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rights: Vec<AccessRight>,
}

impl AuthorizationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_rights<I: IntoIterator<Item = AccessRight>>(mut self, v: I) -> Self {
        self.rights = v.into_iter().collect();
        self
    }
}

/// The key pair backing an authorization rule.
///
/// Either key, combined with the namespace endpoint and the rule name, is
/// enough to build connection credentials for the data plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AccessKeys {
    /// The name of the authorization rule these keys belong to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_connection_string: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_connection_string: String,
}

impl AccessKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_name<T: Into<String>>(mut self, v: T) -> Self {
        self.key_name = v.into();
        self
    }

    pub fn set_primary_key<T: Into<String>>(mut self, v: T) -> Self {
        self.primary_key = v.into();
        self
    }

    pub fn set_secondary_key<T: Into<String>>(mut self, v: T) -> Self {
        self.secondary_key = v.into();
        self
    }
}

/// Selects which key of an authorization rule to regenerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyKind {
    Primary,
    Secondary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    type Result = anyhow::Result<()>;

    #[test]
    fn namespace_patch_skips_unset_fields() -> Result {
        // A patch carrying only a SKU must not mention any other field, or
        // the service would interpret the `null` as a request to clear it.
        let patch = NamespacePatch::new().set_sku(Sku::new().set_tier(SkuTier::Standard));
        let value = serde_json::to_value(&patch)?;
        assert_eq!(value, json!({"sku": {"tier": "Standard"}}));
        Ok(())
    }

    #[test]
    fn queue_wire_names() -> Result {
        let queue = Queue::new()
            .set_name("q")
            .set_max_size_in_megabytes(2048)
            .set_lock_duration_seconds(90)
            .set_dead_lettering_on_message_expiration(true);
        let value = serde_json::to_value(&queue)?;
        assert_eq!(
            value,
            json!({
                "name": "q",
                "maxSizeInMegabytes": 2048,
                "lockDurationSeconds": 90,
                "deadLetteringOnMessageExpiration": true,
            })
        );
        Ok(())
    }

    #[test]
    fn queue_roundtrip_with_output_fields() -> Result {
        let input = json!({
            "id": "/subscriptions/s/resourceGroups/g/namespaces/n/queues/q",
            "name": "q",
            "maxSizeInMegabytes": 1024,
            "messageCount": 7,
            "sizeInBytes": 4096,
            "createdAt": "2025-04-01T10:00:00Z",
        });
        let queue = serde_json::from_value::<Queue>(input)?;
        assert_eq!(queue.name, "q");
        assert_eq!(queue.message_count, Some(7));
        assert_eq!(queue.max_size_in_megabytes, Some(1024));
        assert!(queue.created_at.is_some());
        assert_eq!(queue.lock_duration_seconds, None);
        Ok(())
    }

    #[test]
    fn enums_use_service_spelling() -> Result {
        assert_eq!(serde_json::to_value(SkuTier::Basic)?, json!("Basic"));
        assert_eq!(serde_json::to_value(KeyKind::Secondary)?, json!("Secondary"));
        assert_eq!(serde_json::to_value(AccessRight::Manage)?, json!("Manage"));
        assert_eq!(SkuTier::Standard.to_string(), "Standard");
        Ok(())
    }

    #[test]
    fn authorization_rule_from_wire() -> Result {
        let rule = serde_json::from_value::<AuthorizationRule>(json!({
            "id": "/subscriptions/s/resourceGroups/g/namespaces/n/authorizationRules/RootManageSharedAccessKey",
            "name": "RootManageSharedAccessKey",
            "rights": ["Listen", "Send", "Manage"],
        }))?;
        assert_eq!(rule.name, "RootManageSharedAccessKey");
        assert_eq!(
            rule.rights,
            vec![AccessRight::Listen, AccessRight::Send, AccessRight::Manage]
        );
        Ok(())
    }
}
