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

//! Point-in-time snapshots of instances.

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::VirtualMachineClient;
use super::instances::IdOrName;
use crate::client::multimap_ext::{Multimap, MultimapExt};
use crate::client::pagination::{DEFAULT_PAGE_SIZE, Meta, list_all_pages};
use crate::error::Error;

/// Lifecycle stage of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    Creating,
    Available,
    Restoring,
    Deleting,
    Error,
    #[serde(other)]
    Unknown,
}

/// A point-in-time capture of an instance. `size` is in GiB.
#[derive(Clone, Debug, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: Option<String>,
    pub status: SnapshotStatus,
    pub size: Option<i64>,
    pub instance: Option<IdOrName>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of snapshots with its pagination envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct SnapshotList {
    pub meta: Meta,
    pub snapshots: Vec<Snapshot>,
}

/// Payload for [`SnapshotService::create`].
#[derive(Clone, Debug, Serialize, TypedBuilder)]
pub struct CreateSnapshotRequest {
    #[builder(setter(into))]
    pub name: String,
    pub instance: IdOrName,
}

/// Pagination and filter parameters for [`SnapshotService::list`].
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct SnapshotListOpts {
    #[builder(default, setter(strip_option))]
    pub limit: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub offset: Option<i64>,
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
}

/// Filters for [`SnapshotService::list_all`].
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct SnapshotFilters {
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Operations on instance snapshots.
#[derive(Clone, Debug)]
pub struct SnapshotService {
    client: VirtualMachineClient,
}

impl SnapshotService {
    pub(crate) fn new(client: VirtualMachineClient) -> Self {
        Self { client }
    }

    /// Captures a snapshot of an instance and returns the snapshot id.
    pub async fn create(&self, request: CreateSnapshotRequest) -> Result<String, Error> {
        let body = serde_json::to_vec(&request)?;
        let created: CreatedResource = self
            .client
            .execute(Method::POST, "/v1/snapshots", &Multimap::new(), Some(body))
            .await?;
        Ok(created.id)
    }

    /// Retrieves one snapshot by id.
    pub async fn get(&self, id: &str) -> Result<Snapshot, Error> {
        self.client
            .execute(
                Method::GET,
                &format!("/v1/snapshots/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }

    /// Retrieves one page of snapshots.
    pub async fn list(&self, opts: SnapshotListOpts) -> Result<SnapshotList, Error> {
        let query = list_query(&opts);
        self.client
            .execute(Method::GET, "/v1/snapshots", &query, None)
            .await
    }

    /// Retrieves every snapshot, walking all pages.
    pub async fn list_all(&self, filters: SnapshotFilters) -> Result<Vec<Snapshot>, Error> {
        list_all_pages(DEFAULT_PAGE_SIZE, async |offset, limit| {
            let page = self
                .list(SnapshotListOpts {
                    limit: Some(limit),
                    offset: Some(offset),
                    sort: filters.sort.clone(),
                })
                .await?;
            Ok(page.snapshots)
        })
        .await
    }

    /// Deletes a snapshot.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client
            .execute_empty(
                Method::DELETE,
                &format!("/v1/snapshots/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }
}

fn list_query(opts: &SnapshotListOpts) -> Multimap {
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
    query
}
