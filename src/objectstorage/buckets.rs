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

//! Bucket operations.

use super::ObjectStorageClient;
use super::storage::{BucketInfo, MakeBucketOptions, ObjectLockConfig, VersioningStatus};
use crate::error::Error;

/// Operations on buckets.
///
/// Every operation validates the bucket name before touching the backend.
/// Backend failures that already carry a typed meaning (not-found, conflict,
/// validation) pass through; anything else is wrapped into [`Error::Bucket`]
/// naming the operation.
#[derive(Clone)]
pub struct BucketService {
    client: ObjectStorageClient,
}

impl BucketService {
    pub(crate) fn new(client: ObjectStorageClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, bucket: &str, opts: MakeBucketOptions) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .make_bucket(bucket, opts)
            .await
            .map_err(|e| wrap("create", bucket, e))
    }

    pub async fn list(&self) -> Result<Vec<BucketInfo>, Error> {
        self.client
            .storage
            .list_buckets()
            .await
            .map_err(|e| wrap("list", "*", e))
    }

    pub async fn exists(&self, bucket: &str) -> Result<bool, Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .bucket_exists(bucket)
            .await
            .map_err(|e| wrap("exists", bucket, e))
    }

    pub async fn delete(&self, bucket: &str) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .remove_bucket(bucket)
            .await
            .map_err(|e| wrap("delete", bucket, e))
    }

    pub async fn get_policy(&self, bucket: &str) -> Result<String, Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .get_bucket_policy(bucket)
            .await
            .map_err(|e| wrap("get_policy", bucket, e))
    }

    /// Applies a bucket policy. The policy must be a non-empty JSON document.
    pub async fn set_policy(&self, bucket: &str, policy: &str) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        validate_policy(policy)?;
        self.client
            .storage
            .set_bucket_policy(bucket, policy)
            .await
            .map_err(|e| wrap("set_policy", bucket, e))
    }

    pub async fn get_object_lock(&self, bucket: &str) -> Result<Option<ObjectLockConfig>, Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .get_object_lock_config(bucket)
            .await
            .map_err(|e| wrap("get_object_lock", bucket, e))
    }

    /// Sets or, with `None`, clears the default retention rule of a bucket
    /// created with object locking.
    pub async fn set_object_lock(
        &self,
        bucket: &str,
        config: Option<ObjectLockConfig>,
    ) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .set_object_lock_config(bucket, config)
            .await
            .map_err(|e| wrap("set_object_lock", bucket, e))
    }

    pub async fn get_versioning(&self, bucket: &str) -> Result<VersioningStatus, Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .get_bucket_versioning(bucket)
            .await
            .map_err(|e| wrap("get_versioning", bucket, e))
    }

    pub async fn enable_versioning(&self, bucket: &str) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .enable_versioning(bucket)
            .await
            .map_err(|e| wrap("enable_versioning", bucket, e))
    }

    pub async fn suspend_versioning(&self, bucket: &str) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .suspend_versioning(bucket)
            .await
            .map_err(|e| wrap("suspend_versioning", bucket, e))
    }
}

fn wrap(operation: &str, bucket: &str, err: Error) -> Error {
    match err {
        e @ (Error::NotFound { .. } | Error::Conflict { .. } | Error::Validation { .. }) => e,
        e => Error::bucket(operation, bucket, e.to_string()),
    }
}

/// S3 bucket naming rules: 3 to 63 characters, lowercase letters, digits,
/// hyphens and dots, starting and ending with a letter or digit.
pub(crate) fn validate_bucket_name(bucket: &str) -> Result<(), Error> {
    if bucket.is_empty() {
        return Err(Error::InvalidBucketName(
            "bucket name cannot be empty".to_string(),
        ));
    }
    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(Error::InvalidBucketName(format!(
            "{bucket}: length must be between 3 and 63 characters"
        )));
    }
    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.';
    if !bucket.chars().all(valid_char) {
        return Err(Error::InvalidBucketName(format!(
            "{bucket}: only lowercase letters, digits, hyphens and dots are allowed"
        )));
    }
    let edges_ok = bucket
        .chars()
        .next()
        .zip(bucket.chars().next_back())
        .is_some_and(|(first, last)| {
            first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
        });
    if !edges_ok {
        return Err(Error::InvalidBucketName(format!(
            "{bucket}: must start and end with a letter or digit"
        )));
    }
    Ok(())
}

fn validate_policy(policy: &str) -> Result<(), Error> {
    if policy.is_empty() {
        return Err(Error::InvalidPolicy("policy cannot be empty".to_string()));
    }
    serde_json::from_str::<serde_json::Value>(policy)
        .map(|_| ())
        .map_err(|e| Error::InvalidPolicy(e.to_string()))
}
