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

//! Custom images published by the account from externally hosted disk images.

use std::collections::HashMap;

use http::Method;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::VirtualMachineClient;
use super::images::{ImageStatus, MinimumRequirements};
use crate::client::multimap_ext::Multimap;
use crate::error::Error;

/// Operating system family of a custom image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
}

/// CPU architecture of a custom image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "x86/64")]
    X86_64,
}

/// Whether the image software carries its own license.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
    Licensed,
    Unlicensed,
}

/// A custom virtual machine image owned by the account.
#[derive(Clone, Debug, Deserialize)]
pub struct CustomImage {
    pub id: String,
    pub name: String,
    pub status: ImageStatus,
    pub platform: Platform,
    pub license: License,
    pub requirements: Option<MinimumRequirements>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Payload for [`CustomImageService::create`].
///
/// `url` must point at a disk image the platform can fetch.
#[derive(Clone, Debug, Serialize, TypedBuilder)]
pub struct CreateCustomImageRequest {
    #[builder(setter(into))]
    pub name: String,
    pub platform: Platform,
    pub architecture: Architecture,
    pub license: License,
    #[builder(setter(into))]
    pub url: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<MinimumRequirements>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uefi: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Operations on account-owned custom images.
#[derive(Clone, Debug)]
pub struct CustomImageService {
    client: VirtualMachineClient,
}

impl CustomImageService {
    pub(crate) fn new(client: VirtualMachineClient) -> Self {
        Self { client }
    }

    /// Registers a new custom image and returns its id.
    pub async fn create(&self, request: CreateCustomImageRequest) -> Result<String, Error> {
        let body = serde_json::to_vec(&request)?;
        let created: CreatedResource = self
            .client
            .execute(Method::POST, "/v1/images/custom", &Multimap::new(), Some(body))
            .await?;
        Ok(created.id)
    }

    /// Retrieves one custom image by id.
    pub async fn get(&self, id: &str) -> Result<CustomImage, Error> {
        self.client
            .execute(
                Method::GET,
                &format!("/v1/images/custom/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }

    /// Deletes a custom image. Succeeds with no payload.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client
            .execute_empty(
                Method::DELETE,
                &format!("/v1/images/custom/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }
}
