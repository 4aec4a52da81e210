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

//! The storage-protocol seam behind the object storage services.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use typed_builder::TypedBuilder;
use url::Url;

use crate::client::multimap_ext::Multimap;
use crate::error::Error;

/// A bucket as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
    pub creation_date: DateTime<Utc>,
}

/// Metadata of a stored object, or of a collapsed common prefix when listing
/// non-recursively (`is_prefix` set, zero size, empty etag).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub etag: String,
    pub last_modified: DateTime<Utc>,
    pub content_type: Option<String>,
    pub is_prefix: bool,
}

/// Result of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadInfo {
    pub bucket: String,
    pub key: String,
    pub etag: String,
    pub size: u64,
}

/// Write-protection mode applied by retention and object lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetentionMode {
    Governance,
    Compliance,
}

/// Retention applied to one object version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectRetention {
    pub mode: RetentionMode,
    pub retain_until: DateTime<Utc>,
}

/// Unit for the object lock validity period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidityUnit {
    Days,
    Years,
}

/// Default retention rule applied to new objects in a locked bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectLockConfig {
    pub mode: RetentionMode,
    pub validity: u32,
    pub unit: ValidityUnit,
}

/// Versioning state of a bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VersioningStatus {
    #[default]
    Unversioned,
    Enabled,
    Suspended,
}

/// Options for bucket creation.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeBucketOptions {
    /// Object locking must be requested at creation time; it cannot be
    /// enabled on an existing bucket.
    pub object_locking: bool,
}

/// Options for object listing.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct ListObjectsOptions {
    #[builder(default, setter(strip_option, into))]
    pub prefix: Option<String>,
    /// When false, keys below a `/` delimiter collapse into prefix entries.
    #[builder(default)]
    pub recursive: bool,
}

/// Operations the object storage services require from a backend.
///
/// Implemented by [`MemoryStorage`](crate::objectstorage::memory::MemoryStorage)
/// for hermetic use; an implementation backed by a real S3 wire client slots
/// in the same way. Backends report failures with the shared [`Error`]
/// taxonomy and the services pass typed errors through unchanged.
#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn make_bucket(&self, bucket: &str, opts: MakeBucketOptions) -> Result<(), Error>;

    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, Error>;

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error>;

    /// Fails when the bucket still holds objects.
    async fn remove_bucket(&self, bucket: &str) -> Result<(), Error>;

    /// Returns an empty string when the bucket carries no policy.
    async fn get_bucket_policy(&self, bucket: &str) -> Result<String, Error>;

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), Error>;

    async fn get_object_lock_config(&self, bucket: &str)
    -> Result<Option<ObjectLockConfig>, Error>;

    /// `None` clears the default retention rule.
    async fn set_object_lock_config(
        &self,
        bucket: &str,
        config: Option<ObjectLockConfig>,
    ) -> Result<(), Error>;

    async fn get_bucket_versioning(&self, bucket: &str) -> Result<VersioningStatus, Error>;

    async fn enable_versioning(&self, bucket: &str) -> Result<(), Error>;

    async fn suspend_versioning(&self, bucket: &str) -> Result<(), Error>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadInfo, Error>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, Error>;

    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectInfo, Error>;

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), Error>;

    async fn list_objects(
        &self,
        bucket: &str,
        opts: ListObjectsOptions,
    ) -> Result<Vec<ObjectInfo>, Error>;

    async fn put_object_retention(
        &self,
        bucket: &str,
        key: &str,
        retention: ObjectRetention,
    ) -> Result<(), Error>;

    async fn get_object_retention(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectRetention>, Error>;

    async fn presigned_get_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: &Multimap,
    ) -> Result<Url, Error>;

    async fn presigned_head_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: &Multimap,
    ) -> Result<Url, Error>;

    async fn presigned_put_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
    ) -> Result<Url, Error>;
}
