// Stratus Cloud SDK for Rust
// Copyright 2025 Stratus Cloud, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core HTTP client shared by every Stratus API surface.

mod http;
pub mod multimap_ext;
pub mod pagination;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Production endpoint for the Stratus Cloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.stratus.cloud";

const DEFAULT_USER_AGENT: &str = concat!("stratus-sdk/", env!("CARGO_PKG_VERSION"));

/// Request defaults shared across clones of a [`CoreClient`].
#[derive(Debug)]
pub(crate) struct SharedClientItems {
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
    pub(crate) user_agent: String,
}

/// Authenticated HTTP client for the Stratus Cloud API.
///
/// Cheap to clone; all clones share the same connection pool and
/// configuration. Product clients such as
/// [`VirtualMachineClient`](crate::compute::VirtualMachineClient) wrap a
/// `CoreClient` and add resource paths on top of it.
#[derive(Clone, Debug)]
pub struct CoreClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) shared: Arc<SharedClientItems>,
}

impl CoreClient {
    /// Returns a [`CoreClientBuilder`] to configure and create a client.
    pub fn builder() -> CoreClientBuilder {
        CoreClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.shared.user_agent
    }
}

/// Builder for [`CoreClient`].
///
/// `api_key` is the only required setting. `build` fails with
/// [`Error::Validation`] when it is missing or empty, and when a custom
/// `base_url` does not parse as an absolute URL.
#[derive(Debug, Default)]
pub struct CoreClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl CoreClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// API key sent as the `X-API-Key` header on every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Appended to the default `User-Agent` product token.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Total per-request timeout, connect through body. No timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the internally constructed [`reqwest::Client`]. When set, the
    /// `timeout` configured on this builder is ignored in favor of whatever
    /// the supplied client carries.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Result<CoreClient, Error> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(Error::validation("api_key", "cannot be empty")),
        };

        let raw_base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base)
            .map_err(|e| Error::validation("base_url", format!("{raw_base}: {e}")))?;

        let user_agent = match self.user_agent {
            Some(suffix) if !suffix.is_empty() => format!("{DEFAULT_USER_AGENT} {suffix}"),
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CoreClient {
            http_client,
            shared: Arc::new(SharedClientItems {
                base_url,
                api_key,
                user_agent,
            }),
        })
    }
}
