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

//! Typed clients for Stratus S3-compatible object storage.
//!
//! [`ObjectStorageClient`] validates credentials up front and hands out the
//! bucket, object and presigned-URL services, all of which operate through a
//! pluggable [`StorageApi`](storage::StorageApi) backend.

pub mod buckets;
pub mod memory;
pub mod objects;
pub mod presigned;
pub mod storage;

use std::fmt;
use std::sync::Arc;

use buckets::BucketService;
use objects::ObjectService;
use presigned::PresignedService;
use storage::StorageApi;

use crate::error::Error;

/// Object storage regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
    #[default]
    BrSe1,
    BrNe1,
}

impl Endpoint {
    pub fn url(&self) -> &'static str {
        match self {
            Endpoint::BrSe1 => "https://br-se1.stratusobjects.com",
            Endpoint::BrNe1 => "https://br-ne1.stratusobjects.com",
        }
    }

    /// The endpoint authority without the scheme.
    pub fn host(&self) -> &'static str {
        match self {
            Endpoint::BrSe1 => "br-se1.stratusobjects.com",
            Endpoint::BrNe1 => "br-ne1.stratusobjects.com",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

/// Entry point for object storage.
#[derive(Clone)]
pub struct ObjectStorageClient {
    pub(crate) storage: Arc<dyn StorageApi>,
    endpoint: Endpoint,
}

impl fmt::Debug for ObjectStorageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStorageClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ObjectStorageClient {
    /// Returns an [`ObjectStorageClientBuilder`] to configure and create a
    /// client.
    pub fn builder() -> ObjectStorageClientBuilder {
        ObjectStorageClientBuilder::new()
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn buckets(&self) -> BucketService {
        BucketService::new(self.clone())
    }

    pub fn objects(&self) -> ObjectService {
        ObjectService::new(self.clone())
    }

    pub fn presigner(&self) -> PresignedService {
        PresignedService::new(self.clone())
    }
}

/// Builder for [`ObjectStorageClient`].
///
/// Credentials and a storage backend are required; `build` fails with
/// [`Error::Validation`] when either is missing or empty.
#[derive(Default)]
pub struct ObjectStorageClientBuilder {
    endpoint: Option<Endpoint>,
    access_key: Option<String>,
    secret_key: Option<String>,
    storage: Option<Arc<dyn StorageApi>>,
}

impl ObjectStorageClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region to address. Defaults to [`Endpoint::BrSe1`].
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Storage backend the services will call into.
    pub fn storage<S: StorageApi + 'static>(mut self, storage: S) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    pub fn storage_arc(mut self, storage: Arc<dyn StorageApi>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Result<ObjectStorageClient, Error> {
        match &self.access_key {
            Some(key) if !key.is_empty() => {}
            _ => return Err(Error::validation("access_key", "cannot be empty")),
        }
        match &self.secret_key {
            Some(key) if !key.is_empty() => {}
            _ => return Err(Error::validation("secret_key", "cannot be empty")),
        }
        let storage = self
            .storage
            .ok_or_else(|| Error::validation("storage", "a storage backend is required"))?;

        Ok(ObjectStorageClient {
            storage,
            endpoint: self.endpoint.unwrap_or_default(),
        })
    }
}
