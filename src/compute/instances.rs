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

//! Virtual machine instance lifecycle operations.

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::VirtualMachineClient;
use crate::client::multimap_ext::{Multimap, MultimapExt};
use crate::client::pagination::{DEFAULT_PAGE_SIZE, Meta, list_all_pages};
use crate::error::Error;

/// Reference to another resource by id or by name, exactly one of the two.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IdOrName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IdOrName {
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Provisioning status of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    New,
    Running,
    Stopped,
    Suspended,
    Deleted,
    Error,
    #[serde(other)]
    Unknown,
}

/// Transitional state reported while an instance changes status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    New,
    Starting,
    Running,
    Stopping,
    Stopped,
    Suspended,
    Deleting,
    #[serde(other)]
    Unknown,
}

/// A virtual machine instance.
#[derive(Clone, Debug, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: Option<String>,
    pub status: InstanceStatus,
    pub state: Option<InstanceState>,
    pub image: Option<IdOrName>,
    pub machine_type: Option<IdOrName>,
    pub ssh_key_name: Option<String>,
    pub availability_zone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of instances with its pagination envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct InstanceList {
    pub meta: Meta,
    pub instances: Vec<Instance>,
}

/// Payload for [`InstanceService::create`].
#[derive(Clone, Debug, Serialize, TypedBuilder)]
pub struct CreateInstanceRequest {
    #[builder(setter(into))]
    pub name: String,
    pub machine_type: IdOrName,
    pub image: IdOrName,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// Pagination and filter parameters for [`InstanceService::list`].
///
/// `expand` names related resources to inline instead of returning id
/// references.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct InstanceListOpts {
    #[builder(default, setter(strip_option))]
    pub limit: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub offset: Option<i64>,
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(strip_option))]
    pub expand: Option<Vec<String>>,
}

/// Filters for [`InstanceService::list_all`].
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct InstanceFilters {
    #[builder(default, setter(into, strip_option))]
    pub sort: Option<String>,
    #[builder(default, setter(strip_option))]
    pub expand: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Operations on virtual machine instances.
#[derive(Clone, Debug)]
pub struct InstanceService {
    client: VirtualMachineClient,
}

impl InstanceService {
    pub(crate) fn new(client: VirtualMachineClient) -> Self {
        Self { client }
    }

    /// Provisions a new instance and returns its id. Materialization happens
    /// out of band; call [`get`](Self::get) to observe progress.
    pub async fn create(&self, request: CreateInstanceRequest) -> Result<String, Error> {
        let body = serde_json::to_vec(&request)?;
        let created: CreatedResource = self
            .client
            .execute(Method::POST, "/v1/instances", &Multimap::new(), Some(body))
            .await?;
        Ok(created.id)
    }

    /// Retrieves one instance by id.
    pub async fn get(&self, id: &str) -> Result<Instance, Error> {
        self.client
            .execute(
                Method::GET,
                &format!("/v1/instances/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }

    /// Retrieves one page of instances.
    pub async fn list(&self, opts: InstanceListOpts) -> Result<InstanceList, Error> {
        let query = list_query(&opts);
        self.client
            .execute(Method::GET, "/v1/instances", &query, None)
            .await
    }

    /// Retrieves every instance, walking all pages.
    pub async fn list_all(&self, filters: InstanceFilters) -> Result<Vec<Instance>, Error> {
        list_all_pages(DEFAULT_PAGE_SIZE, async |offset, limit| {
            let page = self
                .list(InstanceListOpts {
                    limit: Some(limit),
                    offset: Some(offset),
                    sort: filters.sort.clone(),
                    expand: filters.expand.clone(),
                })
                .await?;
            Ok(page.instances)
        })
        .await
    }

    /// Deletes an instance.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client
            .execute_empty(
                Method::DELETE,
                &format!("/v1/instances/{id}"),
                &Multimap::new(),
                None,
            )
            .await
    }

    /// Requests an instance start. The transition completes out of band.
    pub async fn start(&self, id: &str) -> Result<(), Error> {
        self.client
            .execute_empty(
                Method::POST,
                &format!("/v1/instances/{id}/start"),
                &Multimap::new(),
                None,
            )
            .await
    }

    /// Requests an instance stop. The transition completes out of band.
    pub async fn stop(&self, id: &str) -> Result<(), Error> {
        self.client
            .execute_empty(
                Method::POST,
                &format!("/v1/instances/{id}/stop"),
                &Multimap::new(),
                None,
            )
            .await
    }
}

fn list_query(opts: &InstanceListOpts) -> Multimap {
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
    if let Some(expand) = &opts.expand {
        if !expand.is_empty() {
            query.add("expand", expand.join(","));
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts_produce_no_query_params() {
        let query = list_query(&InstanceListOpts::default());
        assert!(query.is_empty());
    }

    #[test]
    fn expand_values_are_joined_with_commas() {
        let opts = InstanceListOpts::builder()
            .expand(vec!["image".to_string(), "machine-type".to_string()])
            .build();
        let query = list_query(&opts);
        assert_eq!(
            query.get("expand").map(String::as_str),
            Some("image,machine-type")
        );
    }

    #[test]
    fn empty_expand_list_is_omitted() {
        let opts = InstanceListOpts::builder().expand(Vec::new()).build();
        assert!(list_query(&opts).is_empty());
    }

    #[test]
    fn create_request_serializes_references() {
        let request = CreateInstanceRequest::builder()
            .name("web-1")
            .machine_type(IdOrName::name("cloud-bs1.small"))
            .image(IdOrName::id("img-123"))
            .ssh_key_name("deploy")
            .build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "web-1");
        assert_eq!(json["machine_type"]["name"], "cloud-bs1.small");
        assert!(json["machine_type"].get("id").is_none());
        assert_eq!(json["image"]["id"], "img-123");
        assert_eq!(json["ssh_key_name"], "deploy");
        assert!(json.get("user_data").is_none());
    }

    #[test]
    fn unknown_status_values_do_not_fail_deserialization() {
        let instance: Instance = serde_json::from_str(
            r#"{"id":"i-1","status":"migrating"}"#,
        )
        .unwrap();
        assert_eq!(instance.status, InstanceStatus::Unknown);
    }
}
