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

//! Object operations.

use bytes::Bytes;

use super::ObjectStorageClient;
use super::buckets::validate_bucket_name;
use super::storage::{ListObjectsOptions, ObjectInfo, ObjectRetention, UploadInfo};
use crate::error::Error;

/// Operations on objects.
///
/// Bucket name and object key are validated before the backend is called.
/// Typed backend failures pass through; anything else is wrapped into
/// [`Error::Object`] naming the operation and the object path.
#[derive(Clone)]
pub struct ObjectService {
    client: ObjectStorageClient,
}

impl ObjectService {
    pub(crate) fn new(client: ObjectStorageClient) -> Self {
        Self { client }
    }

    /// Uploads `data` under `key`. Empty payloads are rejected up front.
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadInfo, Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        if data.is_empty() {
            return Err(Error::InvalidObjectData(
                "object data cannot be empty".to_string(),
            ));
        }
        self.client
            .storage
            .put_object(bucket, key, data, content_type)
            .await
            .map_err(|e| wrap("upload", bucket, key, e))
    }

    pub async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        self.client
            .storage
            .get_object(bucket, key)
            .await
            .map_err(|e| wrap("download", bucket, key, e))
    }

    pub async fn stat(&self, bucket: &str, key: &str) -> Result<ObjectInfo, Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        self.client
            .storage
            .stat_object(bucket, key)
            .await
            .map_err(|e| wrap("stat", bucket, key, e))
    }

    pub async fn delete(&self, bucket: &str, key: &str) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        self.client
            .storage
            .remove_object(bucket, key)
            .await
            .map_err(|e| wrap("delete", bucket, key, e))
    }

    pub async fn list(
        &self,
        bucket: &str,
        opts: ListObjectsOptions,
    ) -> Result<Vec<ObjectInfo>, Error> {
        validate_bucket_name(bucket)?;
        self.client
            .storage
            .list_objects(bucket, opts)
            .await
            .map_err(|e| wrap("list", bucket, "*", e))
    }

    pub async fn set_retention(
        &self,
        bucket: &str,
        key: &str,
        retention: ObjectRetention,
    ) -> Result<(), Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        self.client
            .storage
            .put_object_retention(bucket, key, retention)
            .await
            .map_err(|e| wrap("set_retention", bucket, key, e))
    }

    pub async fn get_retention(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectRetention>, Error> {
        validate_bucket_name(bucket)?;
        validate_object_key(key)?;
        self.client
            .storage
            .get_object_retention(bucket, key)
            .await
            .map_err(|e| wrap("get_retention", bucket, key, e))
    }
}

fn wrap(operation: &str, bucket: &str, key: &str, err: Error) -> Error {
    match err {
        e @ (Error::NotFound { .. } | Error::Conflict { .. } | Error::Validation { .. }) => e,
        e => Error::object(operation, bucket, key, e.to_string()),
    }
}

pub(crate) fn validate_object_key(key: &str) -> Result<(), Error> {
    if key.is_empty() {
        return Err(Error::InvalidObjectKey(
            "object key cannot be empty".to_string(),
        ));
    }
    // 1024 bytes is the S3 key length ceiling.
    if key.len() > 1024 {
        let head: String = key.chars().take(32).collect();
        return Err(Error::InvalidObjectKey(format!(
            "{head}...: key exceeds 1024 bytes"
        )));
    }
    Ok(())
}
