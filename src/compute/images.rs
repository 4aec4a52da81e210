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

//! Listing of the machine images offered by the platform.

use http::Method;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::VirtualMachineClient;
use crate::client::multimap_ext::{Multimap, MultimapExt};
use crate::client::pagination::{DEFAULT_PAGE_SIZE, Meta, list_all_pages};
use crate::error::Error;

/// One page of images with its pagination envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ImageList {
    pub meta: Meta,
    pub images: Vec<Image>,
}

/// A machine image usable as an instance template.
#[derive(Clone, Debug, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub status: ImageStatus,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub release_at: Option<String>,
    pub end_standard_support_at: Option<String>,
    pub end_life_at: Option<String>,
    #[serde(default)]
    pub minimum_requirements: MinimumRequirements,
    pub labels: Option<Vec<String>>,
    pub availability_zones: Option<Vec<String>>,
}

/// Smallest instance shape an image will boot on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumRequirements {
    pub vcpu: i64,
    pub ram: i64,
    pub disk: i64,
}

/// Lifecycle stage of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Active,
    Deprecated,
    Deleted,
    Pending,
    Creating,
    Importing,
    Error,
    DeletingError,
}

/// Pagination and filter parameters for [`ImageService::list`].
///
/// Absent fields are omitted from the request, leaving the server defaults in
/// charge.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct ImageListOpts {
    #[builder(default, setter(strip_option))]
    pub limit: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub offset: Option<i64>,
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub availability_zone: Option<String>,
}

/// Filters for [`ImageService::list_all`]; pagination is driven internally.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct ImageFilters {
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub availability_zone: Option<String>,
}

/// Operations on platform-provided images.
#[derive(Clone, Debug)]
pub struct ImageService {
    client: VirtualMachineClient,
}

impl ImageService {
    pub(crate) fn new(client: VirtualMachineClient) -> Self {
        Self { client }
    }

    /// Retrieves one page of images.
    pub async fn list(&self, opts: ImageListOpts) -> Result<ImageList, Error> {
        let query = list_query(&opts);
        self.client
            .execute(Method::GET, "/v1/images", &query, None)
            .await
    }

    /// Retrieves every image, walking all pages.
    pub async fn list_all(&self, filters: ImageFilters) -> Result<Vec<Image>, Error> {
        list_all_pages(DEFAULT_PAGE_SIZE, async |offset, limit| {
            let page = self
                .list(ImageListOpts {
                    limit: Some(limit),
                    offset: Some(offset),
                    sort: filters.sort.clone(),
                    availability_zone: filters.availability_zone.clone(),
                })
                .await?;
            Ok(page.images)
        })
        .await
    }
}

fn list_query(opts: &ImageListOpts) -> Multimap {
    let mut query = Multimap::new();
    if let Some(limit) = opts.limit {
        query.add("_limit", limit.to_string());
    }
    if let Some(offset) = opts.offset {
        query.add("_offset", offset.to_string());
    }
    if let Some(sort) = &opts.sort {
        query.add("_sort", sort.clone());
    }
    if let Some(zone) = &opts.availability_zone {
        query.add("availability-zone", zone.clone());
    }
    query
}
