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

//! A hand-written management client for the Message Bus control plane.
//!
//! This crate contains the types and functions used by the samples in this
//! repository to provision Message Bus resources: resource groups,
//! namespaces, queues, and namespace authorization rules. It only covers the
//! management (control-plane) surface. Sending or receiving messages is a
//! data-plane concern and is out of scope.
//!
//! The main entry point is [client::MessageBusAdmin]. Applications that want
//! to test code built on top of this client can mock the
//! [stub::MessageBusStub] trait and construct the client with
//! [client::MessageBusAdmin::from_stub].

pub mod builder;
pub mod client;
pub mod credentials;
mod error;
pub mod model;
pub mod stub;
pub(crate) mod transport;

pub use error::Error;

/// A `Result` alias where the `Err` case is [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// The default control plane endpoint.
pub(crate) const DEFAULT_HOST: &str = "https://management.msgbus.cloud";

/// The default token authority.
pub(crate) const DEFAULT_AUTHORITY: &str = "https://login.msgbus.cloud";
