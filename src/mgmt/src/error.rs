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

//! The error type returned by the Message Bus management client.

/// Represents an error performing a control-plane operation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a response from the control plane.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The control plane rejected the request.
    #[error("the service returned an error: [{status} {code}] {message}")]
    Service {
        /// The HTTP status code of the response.
        status: u16,
        /// The service-assigned error code, e.g. `ResourceNotFound`.
        code: String,
        /// A human-readable description of the problem.
        message: String,
    },

    /// A long-running operation reached a terminal state other than success.
    #[error("the operation finished with an error: [{code}] {message}")]
    Operation {
        /// The service-assigned error code for the failed operation.
        code: String,
        /// A human-readable description of the problem.
        message: String,
    },

    /// The response body (or a request body) could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[source] serde_json::Error),

    /// No access token could be acquired for the request.
    #[error("could not acquire an access token: {0}")]
    Authentication(String),

    /// The client was misconfigured, e.g. a missing subscription id.
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// The HTTP status code associated with service errors, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the service reported the target resource as missing.
    ///
    /// Deletion workflows use this to distinguish "nothing to delete" from
    /// genuine failures.
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }
}
