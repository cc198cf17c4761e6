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

//! The provisioning workflow: a linear sequence of control-plane calls
//! wrapped in an always-run cleanup stage.

use crate::Result;
use msgbus_mgmt::client::MessageBusAdmin;
use msgbus_mgmt::model::{
    KeyKind, Namespace, NamespacePatch, Queue, ResourceGroup, Sku, SkuTier,
};

/// Region where every resource in a run is provisioned.
pub const LOCATION: &str = "us-central1";

const QUEUE_A_MAX_SIZE_MB: i64 = 1024;
const QUEUE_B_MAX_SIZE_MB: i64 = 2048;
const QUEUE_B_UPDATED_MAX_SIZE_MB: i64 = 4096;
const QUEUE_B_LOCK_DURATION_SECONDS: u32 = 90;

/// The names generated for one workflow run.
#[derive(Clone, Debug)]
pub struct RunNames {
    pub resource_group: String,
    pub namespace: String,
    pub queue_a: String,
    pub queue_b: String,
}

impl RunNames {
    pub fn generate() -> Self {
        Self {
            resource_group: crate::random_resource_group_id(),
            namespace: crate::random_namespace_id(),
            queue_a: crate::random_queue_id(),
            queue_b: crate::random_queue_id(),
        }
    }
}

/// Runs the provisioning sequence, then the cleanup stage.
///
/// The cleanup stage runs on every exit path. If the resource group was
/// created it is deleted by id, which also removes anything the main
/// sequence left behind. Cleanup failures are logged, never propagated; the
/// error returned here is always the main sequence's own outcome.
pub async fn run(client: &MessageBusAdmin) -> Result<()> {
    let names = RunNames::generate();
    let mut created_group: Option<String> = None;
    let outcome = provision(client, &names, &mut created_group).await;
    cleanup(client, created_group).await;
    outcome
}

/// Steps 2-14. `created_group` is set as soon as the resource group exists
/// so that cleanup can find it even if a later step fails.
async fn provision(
    client: &MessageBusAdmin,
    names: &RunNames,
    created_group: &mut Option<String>,
) -> Result<()> {
    let rg = names.resource_group.as_str();
    let ns = names.namespace.as_str();

    println!("Creating resource group {rg} in {LOCATION}");
    let group = client
        .create_resource_group(rg, ResourceGroup::new().set_location(LOCATION))
        .await?;
    *created_group = Some(group.id.clone());
    println!("Created resource group: {group:?}");

    println!("\nCreating namespace {ns} ({} tier)", SkuTier::Basic);
    let namespace = client
        .create_namespace(
            rg,
            ns,
            Namespace::new()
                .set_location(LOCATION)
                .set_sku(Sku::new().set_tier(SkuTier::Basic)),
        )
        .await?;
    println!("Created namespace: {namespace:?}");

    println!("\nCreating queue {} ({QUEUE_A_MAX_SIZE_MB} MB)", names.queue_a);
    let queue_a = client
        .create_queue(
            rg,
            ns,
            &names.queue_a,
            Queue::new().set_max_size_in_megabytes(QUEUE_A_MAX_SIZE_MB),
        )
        .await?;
    println!("Created queue: {queue_a:?}");

    println!(
        "\nCreating queue {} ({QUEUE_B_MAX_SIZE_MB} MB, {QUEUE_B_LOCK_DURATION_SECONDS}s lock, dead-lettering on expiration)",
        names.queue_b
    );
    let queue_b = client
        .create_queue(
            rg,
            ns,
            &names.queue_b,
            Queue::new()
                .set_max_size_in_megabytes(QUEUE_B_MAX_SIZE_MB)
                .set_lock_duration_seconds(QUEUE_B_LOCK_DURATION_SECONDS)
                .set_dead_lettering_on_message_expiration(true),
        )
        .await?;
    println!("Created queue: {queue_b:?}");

    // The create call above waited for the terminal state, so its response
    // is the current queue. Grow it, keeping every other setting.
    println!(
        "\nGrowing queue {} to {QUEUE_B_UPDATED_MAX_SIZE_MB} MB",
        names.queue_b
    );
    let queue_b = client
        .update_queue(
            rg,
            ns,
            &names.queue_b,
            queue_b.set_max_size_in_megabytes(QUEUE_B_UPDATED_MAX_SIZE_MB),
        )
        .await?;
    println!("Updated queue: {queue_b:?}");

    // Only the SKU goes into the patch; everything else keeps its value.
    println!("\nMoving namespace {ns} to the {} tier", SkuTier::Standard);
    let namespace = client
        .update_namespace(
            rg,
            ns,
            NamespacePatch::new().set_sku(Sku::new().set_tier(SkuTier::Standard)),
        )
        .await?;
    println!("Updated namespace: {namespace:?}");

    let namespaces = client.list_namespaces(rg).await?;
    println!("\nThe resource group contains {} namespace(s)", namespaces.len());

    let queues = client.list_queues(rg, ns).await?;
    println!("The namespace contains {} queue(s)", queues.len());

    let rules = client.list_authorization_rules(rg, ns).await?;
    println!("The namespace has {} authorization rule(s)", rules.len());

    let rule = rules
        .first()
        .ok_or_else(|| anyhow::anyhow!("expected at least one authorization rule on {ns}"))?;

    println!("\nFetching keys for authorization rule {}", rule.name);
    let keys = client.get_keys(rg, ns, &rule.name).await?;
    println!("KEYS = {keys:?}");

    println!("Regenerating the secondary key of {}", rule.name);
    let keys = client
        .regenerate_keys(rg, ns, &rule.name, KeyKind::Secondary)
        .await?;
    println!("KEYS = {keys:?}");

    println!("\nDeleting queue {}", names.queue_a);
    client.delete_queue(rg, ns, &names.queue_a).await?;
    println!("Deleted queue {}", names.queue_a);

    // Deleting the namespace also removes any queues still in it. A failure
    // here is absorbed: cleanup deletes the whole resource group, which is
    // a superset of this call.
    println!("Deleting namespace {ns}");
    match client.delete_namespace(rg, ns).await {
        Ok(()) => println!("Deleted namespace {ns}"),
        Err(e) => println!("Ignoring failed namespace delete for {ns}: {e}"),
    }

    Ok(())
}

/// The cleanup stage. Never returns an error.
async fn cleanup(client: &MessageBusAdmin, created_group: Option<String>) {
    let Some(id) = created_group else {
        println!("\nNo resource group was created, nothing to clean up");
        return;
    };
    println!("\nDeleting resource group {id}");
    match client.delete_resource_group(&id).await {
        Ok(()) => println!("Deleted resource group {id}"),
        Err(e) if e.is_not_found() => println!("Resource group {id} is already gone"),
        Err(e) => {
            eprintln!("ERROR failed to delete resource group {id}: {e}");
            tracing::error!("failed to delete resource group {id}: {e}");
        }
    }
}
