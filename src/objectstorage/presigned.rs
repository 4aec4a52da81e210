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

//! Presigned URL generation.

use std::time::Duration;

use http::Method;
use url::Url;

use super::ObjectStorageClient;
use super::buckets::validate_bucket_name;
use super::objects::validate_object_key;
use crate::client::multimap_ext::Multimap;
use crate::error::Error;

/// Generates time-limited pre-authorized URLs for direct object access.
#[derive(Clone)]
pub struct PresignedService {
    client: ObjectStorageClient,
}

impl PresignedService {
    pub(crate) fn new(client: ObjectStorageClient) -> Self {
        Self { client }
    }

    /// Presigns `method` against `bucket`/`key` for `expiry`.
    ///
    /// Only GET, HEAD and PUT can be presigned; any other method fails with
    /// [`Error::InvalidHttpMethod`] before the backend is consulted.
    /// `req_params` become extra query parameters on GET and HEAD URLs and
    /// are ignored for PUT.
    pub async fn generate_url(
        &self,
        method: Method,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: &Multimap,
    ) -> Result<Url, Error> {
        if method != Method::GET && method != Method::HEAD && method != Method::PUT {
            return Err(Error::InvalidHttpMethod(method.to_string()));
        }
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;

        if method == Method::GET {
            self.client
                .storage
                .presigned_get_object(bucket, key, expiry, req_params)
                .await
        } else if method == Method::HEAD {
            self.client
                .storage
                .presigned_head_object(bucket, key, expiry, req_params)
                .await
        } else {
            self.client
                .storage
                .presigned_put_object(bucket, key, expiry)
                .await
        }
    }
}
