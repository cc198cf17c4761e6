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

//! Provision and tear down Message Bus resources.
//!
//! The sample walks through the management surface end to end: it creates a
//! resource group, a namespace, and two queues, updates queue and namespace
//! properties, lists resources, reads and regenerates authorization keys,
//! and then deletes everything it created. See [workflow::run] for the step
//! sequence and the cleanup guarantees.

use rand::{Rng, distr::Distribution};

pub type Result<T> = anyhow::Result<T>;

pub mod workflow;

pub const RESOURCE_GROUP_ID_LENGTH: usize = 24;

pub const NAMESPACE_ID_LENGTH: usize = 24;

pub const QUEUE_ID_LENGTH: usize = 24;

/// Returns the subscription id used by the sample.
pub fn subscription_id() -> Result<String> {
    let subscription_id = std::env::var("MSGBUS_SUBSCRIPTION_ID")?;
    Ok(subscription_id)
}

pub fn report_error(e: anyhow::Error) -> anyhow::Error {
    eprintln!("\n\nERROR {e:?}\n");
    tracing::error!("ERROR {e:?}");
    e
}

/// Returns a fresh resource group name, unique across runs.
pub fn random_resource_group_id() -> String {
    const PREFIX: &str = "rg-";
    random_id(PREFIX, RESOURCE_GROUP_ID_LENGTH)
}

/// Returns a fresh namespace name, unique across runs.
pub fn random_namespace_id() -> String {
    const PREFIX: &str = "ns-";
    random_id(PREFIX, NAMESPACE_ID_LENGTH)
}

/// Returns a fresh queue name, unique across runs.
pub fn random_queue_id() -> String {
    const PREFIX: &str = "queue-";
    random_id(PREFIX, QUEUE_ID_LENGTH)
}

fn random_id(prefix: &str, len: usize) -> String {
    // Resource names must start with a letter, the prefixes take care of
    // that. The charset keeps the names valid for all resource types.
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let distr = RandomChars { chars: CHARSET };
    let suffix: String = rand::rng()
        .sample_iter(distr)
        .take(len - prefix.len())
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}

struct RandomChars {
    chars: &'static [u8],
}

impl Distribution<u8> for RandomChars {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let index = rng.random_range(0..self.chars.len());
        self.chars[index]
    }
}
