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

//! Request execution and HTTP error normalization for [`CoreClient`].

use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;

use super::CoreClient;
use crate::client::multimap_ext::{Multimap, MultimapExt};
use crate::error::Error;

impl CoreClient {
    /// Sends a request and decodes the JSON response body into `T`.
    ///
    /// A success status with an empty body is a [`Error::Decoding`] failure;
    /// operations that expect no body use [`execute_empty`](Self::execute_empty).
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Multimap,
        body: Option<Vec<u8>>,
    ) -> Result<T, Error> {
        let bytes = self.send_request(method, path, query, body).await?;
        if bytes.is_empty() {
            return Err(Error::decoding("empty response body"));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends a request and discards whatever body the server returns.
    pub(crate) async fn execute_empty(
        &self,
        method: Method,
        path: &str,
        query: &Multimap,
        body: Option<Vec<u8>>,
    ) -> Result<(), Error> {
        self.send_request(method, path, query, body).await?;
        Ok(())
    }

    async fn send_request(
        &self,
        method: Method,
        path: &str,
        query: &Multimap,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, Error> {
        let url = self.build_url(path, query);
        log::debug!("sending {method} request to {url}");

        let mut request = self
            .http_client
            .request(method.clone(), url.as_str())
            .header("X-API-Key", &self.shared.api_key)
            .header("User-Agent", &self.shared.user_agent);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(bytes);
        }

        let body_text = String::from_utf8_lossy(&bytes).into_owned();
        log::debug!("{method} {url} failed with status {status}");
        Err(error_from_status(status.as_u16(), body_text))
    }

    fn build_url(&self, path: &str, query: &Multimap) -> String {
        let mut url = format!(
            "{}{}",
            self.shared.base_url.as_str().trim_end_matches('/'),
            path
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        url
    }
}

/// Maps a non-success status to the matching [`Error`] variant.
pub(crate) fn error_from_status(status: u16, body: String) -> Error {
    match status {
        400 => Error::Validation {
            field: "request".to_string(),
            message: body,
        },
        404 => Error::NotFound { message: body },
        409 => Error::Conflict { message: body },
        _ => Error::Server { status, body },
    }
}
