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

use demo_msgbus_provisioning::{report_error, subscription_id, workflow};
use msgbus_mgmt::client::MessageBusAdmin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Enable a basic subscriber. Useful to troubleshoot problems and visually
    // verify tracing is doing something.
    let subscriber = tracing_subscriber::fmt().with_level(true).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let subscription = subscription_id().map_err(report_error)?;
    println!("Using subscription {subscription}");

    let client = MessageBusAdmin::builder()
        .with_subscription(&subscription)
        .build()
        .await
        .map_err(|e| report_error(e.into()))?;

    workflow::run(&client).await.map_err(report_error)
}
