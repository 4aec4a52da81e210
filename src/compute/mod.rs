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

//! Typed clients for the Stratus compute API.
//!
//! [`VirtualMachineClient`] anchors every compute resource under the
//! `/compute` base path and hands out one service per resource family.

pub mod custom_images;
pub mod images;
pub mod instance_types;
pub mod instances;
pub mod snapshots;

use http::Method;
use serde::de::DeserializeOwned;

use crate::client::CoreClient;
use crate::client::multimap_ext::Multimap;
use crate::error::Error;

use custom_images::CustomImageService;
use images::ImageService;
use instance_types::InstanceTypeService;
use instances::InstanceService;
use snapshots::SnapshotService;

/// Path prefix for every compute endpoint.
pub const DEFAULT_BASE_PATH: &str = "/compute";

/// Entry point for compute resources.
#[derive(Clone, Debug)]
pub struct VirtualMachineClient {
    pub(crate) core: CoreClient,
}

impl VirtualMachineClient {
    pub fn new(core: CoreClient) -> Self {
        Self { core }
    }

    pub fn images(&self) -> ImageService {
        ImageService::new(self.clone())
    }

    pub fn custom_images(&self) -> CustomImageService {
        CustomImageService::new(self.clone())
    }

    pub fn instances(&self) -> InstanceService {
        InstanceService::new(self.clone())
    }

    pub fn instance_types(&self) -> InstanceTypeService {
        InstanceTypeService::new(self.clone())
    }

    pub fn snapshots(&self) -> SnapshotService {
        SnapshotService::new(self.clone())
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Multimap,
        body: Option<Vec<u8>>,
    ) -> Result<T, Error> {
        self.core
            .execute(method, &format!("{DEFAULT_BASE_PATH}{path}"), query, body)
            .await
    }

    pub(crate) async fn execute_empty(
        &self,
        method: Method,
        path: &str,
        query: &Multimap,
        body: Option<Vec<u8>>,
    ) -> Result<(), Error> {
        self.core
            .execute_empty(method, &format!("{DEFAULT_BASE_PATH}{path}"), query, body)
            .await
    }
}
