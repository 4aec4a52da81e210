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

//! Deterministic in-memory [`StorageApi`] backend.
//!
//! Holds buckets and objects in process memory with MD5 etags and
//! AWS4-style presigned URLs, which keeps object storage usable in tests
//! and local tooling without a live endpoint.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;
use uuid::Uuid;

use super::storage::{
    BucketInfo, ListObjectsOptions, MakeBucketOptions, ObjectInfo, ObjectLockConfig,
    ObjectRetention, StorageApi, UploadInfo, VersioningStatus,
};
use crate::client::multimap_ext::Multimap;
use crate::error::Error;

const DEFAULT_HOST: &str = "br-se1.stratusobjects.com";

#[derive(Clone, Debug)]
struct StoredObject {
    data: Bytes,
    etag: String,
    content_type: Option<String>,
    last_modified: DateTime<Utc>,
    retention: Option<ObjectRetention>,
}

#[derive(Clone, Debug)]
struct StoredBucket {
    creation_date: DateTime<Utc>,
    object_locking: bool,
    lock_config: Option<ObjectLockConfig>,
    policy: Option<String>,
    versioning: VersioningStatus,
    objects: HashMap<String, StoredObject>,
}

impl StoredBucket {
    fn new(object_locking: bool) -> Self {
        Self {
            creation_date: Utc::now(),
            object_locking,
            lock_config: None,
            policy: None,
            versioning: VersioningStatus::Unversioned,
            objects: HashMap::new(),
        }
    }
}

/// In-memory storage backend.
#[derive(Debug)]
pub struct MemoryStorage {
    host: String,
    buckets: RwLock<HashMap<String, StoredBucket>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_HOST)
    }

    /// Uses `host` as the authority of generated presigned URLs.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            buckets: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, StoredBucket>> {
        self.buckets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, StoredBucket>> {
        self.buckets.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn presign(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: Option<&Multimap>,
    ) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("https://{}/{}/{}", self.host, bucket, key))
            .map_err(|e| Error::object("presign", bucket, key, e.to_string()))?;

        let now = Utc::now();
        let region = self.host.split('.').next().unwrap_or("unknown");
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(params) = req_params {
                for (name, values) in params.iter_all() {
                    for value in values {
                        pairs.append_pair(name, value);
                    }
                }
            }
            pairs.append_pair("X-Amz-Algorithm", "AWS4-HMAC-SHA256");
            pairs.append_pair(
                "X-Amz-Credential",
                &format!(
                    "{}/{}/{}/s3/aws4_request",
                    Uuid::new_v4(),
                    now.format("%Y%m%d"),
                    region
                ),
            );
            pairs.append_pair("X-Amz-Date", &now.format("%Y%m%dT%H%M%SZ").to_string());
            pairs.append_pair("X-Amz-Expires", &expiry.as_secs().to_string());
            pairs.append_pair("X-Amz-SignedHeaders", "host");
        }

        let signature = sign_url(url.as_str())
            .map_err(|message| Error::object("presign", bucket, key, message))?;
        url.query_pairs_mut()
            .append_pair("X-Amz-Signature", &signature);
        Ok(url)
    }
}

fn missing_bucket(bucket: &str) -> Error {
    Error::NotFound {
        message: format!("bucket {bucket} not found"),
    }
}

fn missing_object(bucket: &str, key: &str) -> Error {
    Error::NotFound {
        message: format!("object {bucket}/{key} not found"),
    }
}

/// HMAC-SHA256 over the URL with a random per-URL key, hex encoded.
fn sign_url(url: &str) -> Result<String, String> {
    let key = Uuid::new_v4();
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key.as_bytes()).map_err(|e| e.to_string())?;
    mac.update(url.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[async_trait]
impl StorageApi for MemoryStorage {
    async fn make_bucket(&self, bucket: &str, opts: MakeBucketOptions) -> Result<(), Error> {
        let mut buckets = self.write();
        if buckets.contains_key(bucket) {
            return Err(Error::Conflict {
                message: format!("bucket {bucket} already exists"),
            });
        }
        buckets.insert(bucket.to_string(), StoredBucket::new(opts.object_locking));
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, Error> {
        let buckets = self.read();
        let mut infos: Vec<BucketInfo> = buckets
            .iter()
            .map(|(name, bucket)| BucketInfo {
                name: name.clone(),
                creation_date: bucket.creation_date,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        Ok(self.read().contains_key(bucket))
    }

    async fn remove_bucket(&self, bucket: &str) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        if !stored.objects.is_empty() {
            return Err(Error::Conflict {
                message: format!("bucket {bucket} is not empty"),
            });
        }
        buckets.remove(bucket);
        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<String, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        Ok(stored.policy.clone().unwrap_or_default())
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        stored.policy = if policy.is_empty() {
            None
        } else {
            Some(policy.to_string())
        };
        Ok(())
    }

    async fn get_object_lock_config(
        &self,
        bucket: &str,
    ) -> Result<Option<ObjectLockConfig>, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        Ok(stored.lock_config)
    }

    async fn set_object_lock_config(
        &self,
        bucket: &str,
        config: Option<ObjectLockConfig>,
    ) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        if !stored.object_locking {
            return Err(Error::Conflict {
                message: format!("bucket {bucket} was created without object locking"),
            });
        }
        stored.lock_config = config;
        Ok(())
    }

    async fn get_bucket_versioning(&self, bucket: &str) -> Result<VersioningStatus, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        Ok(stored.versioning)
    }

    async fn enable_versioning(&self, bucket: &str) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        stored.versioning = VersioningStatus::Enabled;
        Ok(())
    }

    async fn suspend_versioning(&self, bucket: &str) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        stored.versioning = VersioningStatus::Suspended;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadInfo, Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        let etag = format!("{:x}", md5::compute(&data));
        let size = data.len() as u64;
        stored.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                etag: etag.clone(),
                content_type: content_type.map(str::to_string),
                last_modified: Utc::now(),
                retention: None,
            },
        );
        Ok(UploadInfo {
            bucket: bucket.to_string(),
            key: key.to_string(),
            etag,
            size,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        let object = stored
            .objects
            .get(key)
            .ok_or_else(|| missing_object(bucket, key))?;
        Ok(object.data.clone())
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectInfo, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        let object = stored
            .objects
            .get(key)
            .ok_or_else(|| missing_object(bucket, key))?;
        Ok(ObjectInfo {
            key: key.to_string(),
            size: object.data.len() as u64,
            etag: object.etag.clone(),
            last_modified: object.last_modified,
            content_type: object.content_type.clone(),
            is_prefix: false,
        })
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        if let Some(object) = stored.objects.get(key)
            && let Some(retention) = &object.retention
            && retention.retain_until > Utc::now()
            && retention.mode == super::storage::RetentionMode::Compliance
        {
            return Err(Error::Conflict {
                message: format!("object {bucket}/{key} is under compliance retention"),
            });
        }
        stored
            .objects
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| missing_object(bucket, key))
    }

    async fn list_objects(
        &self,
        bucket: &str,
        opts: ListObjectsOptions,
    ) -> Result<Vec<ObjectInfo>, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        let prefix = opts.prefix.as_deref().unwrap_or("");

        // BTreeMap gives lexicographic key order, matching S3 listing order.
        let ordered: BTreeMap<&String, &StoredObject> = stored
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect();

        let mut infos = Vec::new();
        for (key, object) in ordered {
            let rest = &key[prefix.len()..];
            match rest.find('/') {
                Some(pos) if !opts.recursive => {
                    let dir = format!("{}{}", prefix, &rest[..=pos]);
                    if infos
                        .last()
                        .is_none_or(|last: &ObjectInfo| last.key != dir)
                    {
                        infos.push(ObjectInfo {
                            key: dir,
                            size: 0,
                            etag: String::new(),
                            last_modified: object.last_modified,
                            content_type: None,
                            is_prefix: true,
                        });
                    }
                }
                _ => infos.push(ObjectInfo {
                    key: key.clone(),
                    size: object.data.len() as u64,
                    etag: object.etag.clone(),
                    last_modified: object.last_modified,
                    content_type: object.content_type.clone(),
                    is_prefix: false,
                }),
            }
        }
        Ok(infos)
    }

    async fn put_object_retention(
        &self,
        bucket: &str,
        key: &str,
        retention: ObjectRetention,
    ) -> Result<(), Error> {
        let mut buckets = self.write();
        let stored = buckets
            .get_mut(bucket)
            .ok_or_else(|| missing_bucket(bucket))?;
        let object = stored
            .objects
            .get_mut(key)
            .ok_or_else(|| missing_object(bucket, key))?;
        object.retention = Some(retention);
        Ok(())
    }

    async fn get_object_retention(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectRetention>, Error> {
        let buckets = self.read();
        let stored = buckets.get(bucket).ok_or_else(|| missing_bucket(bucket))?;
        let object = stored
            .objects
            .get(key)
            .ok_or_else(|| missing_object(bucket, key))?;
        Ok(object.retention)
    }

    async fn presigned_get_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: &Multimap,
    ) -> Result<Url, Error> {
        self.presign(bucket, key, expiry, Some(req_params))
    }

    async fn presigned_head_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
        req_params: &Multimap,
    ) -> Result<Url, Error> {
        self.presign(bucket, key, expiry, Some(req_params))
    }

    async fn presigned_put_object(
        &self,
        bucket: &str,
        key: &str,
        expiry: Duration,
    ) -> Result<Url, Error> {
        self.presign(bucket, key, expiry, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::multimap_ext::MultimapExt;
    use crate::objectstorage::storage::{RetentionMode, ValidityUnit};

    #[tokio::test]
    async fn bucket_lifecycle() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("photos", MakeBucketOptions::default())
            .await
            .unwrap();
        assert!(storage.bucket_exists("photos").await.unwrap());

        let listed = storage.list_buckets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "photos");

        storage.remove_bucket("photos").await.unwrap();
        assert!(!storage.bucket_exists("photos").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_bucket_is_a_conflict() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("photos", MakeBucketOptions::default())
            .await
            .unwrap();
        let err = storage
            .make_bucket("photos", MakeBucketOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn removing_a_non_empty_bucket_fails() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("photos", MakeBucketOptions::default())
            .await
            .unwrap();
        storage
            .put_object("photos", "cat.png", Bytes::from_static(b"img"), None)
            .await
            .unwrap();
        let err = storage.remove_bucket("photos").await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn object_roundtrip_with_md5_etag() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("docs", MakeBucketOptions::default())
            .await
            .unwrap();
        let upload = storage
            .put_object(
                "docs",
                "readme.txt",
                Bytes::from_static(b"hello"),
                Some("text/plain"),
            )
            .await
            .unwrap();
        assert_eq!(upload.etag, format!("{:x}", md5::compute(b"hello")));
        assert_eq!(upload.size, 5);

        let data = storage.get_object("docs", "readme.txt").await.unwrap();
        assert_eq!(&data[..], b"hello");

        let stat = storage.stat_object("docs", "readme.txt").await.unwrap();
        assert_eq!(stat.content_type.as_deref(), Some("text/plain"));
        assert!(!stat.is_prefix);
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("docs", MakeBucketOptions::default())
            .await
            .unwrap();
        let err = storage.get_object("docs", "absent").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_recursive_listing_collapses_prefixes() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("docs", MakeBucketOptions::default())
            .await
            .unwrap();
        for key in ["a.txt", "logs/1.txt", "logs/2.txt", "z.txt"] {
            storage
                .put_object("docs", key, Bytes::from_static(b"x"), None)
                .await
                .unwrap();
        }
        let listed = storage
            .list_objects("docs", ListObjectsOptions::default())
            .await
            .unwrap();
        let keys: Vec<&str> = listed.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["a.txt", "logs/", "z.txt"]);
        assert!(listed[1].is_prefix);

        let recursive = storage
            .list_objects("docs", ListObjectsOptions::builder().recursive(true).build())
            .await
            .unwrap();
        assert_eq!(recursive.len(), 4);
    }

    #[tokio::test]
    async fn prefix_filter_narrows_listing() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("docs", MakeBucketOptions::default())
            .await
            .unwrap();
        for key in ["logs/1.txt", "logs/2.txt", "other.txt"] {
            storage
                .put_object("docs", key, Bytes::from_static(b"x"), None)
                .await
                .unwrap();
        }
        let listed = storage
            .list_objects(
                "docs",
                ListObjectsOptions::builder()
                    .prefix("logs/")
                    .recursive(true)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn object_lock_requires_locking_enabled_at_creation() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("plain", MakeBucketOptions::default())
            .await
            .unwrap();
        let config = ObjectLockConfig {
            mode: RetentionMode::Governance,
            validity: 30,
            unit: ValidityUnit::Days,
        };
        let err = storage
            .set_object_lock_config("plain", Some(config))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        storage
            .make_bucket("locked", MakeBucketOptions { object_locking: true })
            .await
            .unwrap();
        storage
            .set_object_lock_config("locked", Some(config))
            .await
            .unwrap();
        assert_eq!(
            storage.get_object_lock_config("locked").await.unwrap(),
            Some(config)
        );
    }

    #[tokio::test]
    async fn versioning_transitions() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("docs", MakeBucketOptions::default())
            .await
            .unwrap();
        assert_eq!(
            storage.get_bucket_versioning("docs").await.unwrap(),
            VersioningStatus::Unversioned
        );
        storage.enable_versioning("docs").await.unwrap();
        assert_eq!(
            storage.get_bucket_versioning("docs").await.unwrap(),
            VersioningStatus::Enabled
        );
        storage.suspend_versioning("docs").await.unwrap();
        assert_eq!(
            storage.get_bucket_versioning("docs").await.unwrap(),
            VersioningStatus::Suspended
        );
    }

    #[tokio::test]
    async fn compliance_retention_blocks_removal() {
        let storage = MemoryStorage::new();
        storage
            .make_bucket("vault", MakeBucketOptions { object_locking: true })
            .await
            .unwrap();
        storage
            .put_object("vault", "ledger.bin", Bytes::from_static(b"x"), None)
            .await
            .unwrap();
        storage
            .put_object_retention(
                "vault",
                "ledger.bin",
                ObjectRetention {
                    mode: RetentionMode::Compliance,
                    retain_until: Utc::now() + chrono::Duration::days(1),
                },
            )
            .await
            .unwrap();
        let err = storage.remove_object("vault", "ledger.bin").await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn presigned_url_carries_amz_params() {
        let storage = MemoryStorage::new();
        let mut params = Multimap::new();
        params.add("response-content-type", "text/plain");
        let url = storage
            .presigned_get_object("docs", "readme.txt", Duration::from_secs(60), &params)
            .await
            .unwrap();

        assert_eq!(url.path(), "/docs/readme.txt");
        let query: std::collections::HashMap<String, String> =
            url.query_pairs().into_owned().collect();
        assert_eq!(
            query.get("X-Amz-Algorithm").map(String::as_str),
            Some("AWS4-HMAC-SHA256")
        );
        assert_eq!(query.get("X-Amz-Expires").map(String::as_str), Some("60"));
        assert_eq!(
            query.get("response-content-type").map(String::as_str),
            Some("text/plain")
        );
        assert!(query.contains_key("X-Amz-Signature"));
        assert!(query.contains_key("X-Amz-Credential"));
    }
}
