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

//! Catalog of the instance shapes the platform offers.

use http::Method;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use super::VirtualMachineClient;
use crate::client::multimap_ext::{Multimap, MultimapExt};
use crate::client::pagination::{DEFAULT_PAGE_SIZE, Meta, list_all_pages};
use crate::error::Error;

/// A purchasable instance shape. `ram` is in MiB, `disk` in GiB.
#[derive(Clone, Debug, Deserialize)]
pub struct InstanceType {
    pub id: String,
    pub name: String,
    pub vcpus: i64,
    pub ram: i64,
    pub disk: i64,
    pub gpu: Option<i64>,
    pub status: Option<String>,
    pub availability_zones: Option<Vec<String>>,
}

/// One page of instance types with its pagination envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct InstanceTypeList {
    pub meta: Meta,
    pub instance_types: Vec<InstanceType>,
}

/// Pagination and filter parameters for [`InstanceTypeService::list`].
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct InstanceTypeListOpts {
    #[builder(default, setter(strip_option))]
    pub limit: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub offset: Option<i64>,
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub availability_zone: Option<String>,
}

/// Filters for [`InstanceTypeService::list_all`].
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct InstanceTypeFilters {
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub availability_zone: Option<String>,
}

/// Read-only access to the instance type catalog.
#[derive(Clone, Debug)]
pub struct InstanceTypeService {
    client: VirtualMachineClient,
}

impl InstanceTypeService {
    pub(crate) fn new(client: VirtualMachineClient) -> Self {
        Self { client }
    }

    /// Retrieves one page of instance types.
    pub async fn list(&self, opts: InstanceTypeListOpts) -> Result<InstanceTypeList, Error> {
        let query = list_query(&opts);
        self.client
            .execute(Method::GET, "/v1/instance-types", &query, None)
            .await
    }

    /// Retrieves the whole catalog, walking all pages.
    pub async fn list_all(&self, filters: InstanceTypeFilters) -> Result<Vec<InstanceType>, Error> {
        list_all_pages(DEFAULT_PAGE_SIZE, async |offset, limit| {
            let page = self
                .list(InstanceTypeListOpts {
                    limit: Some(limit),
                    offset: Some(offset),
                    sort: filters.sort.clone(),
                    availability_zone: filters.availability_zone.clone(),
                })
                .await?;
            Ok(page.instance_types)
        })
        .await
    }
}

fn list_query(opts: &InstanceTypeListOpts) -> Multimap {
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
