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

mod common;

use bytes::Bytes;
use chrono::{Duration, Utc};

use common::storage_client;
use stratus::error::Error;
use stratus::objectstorage::storage::{
    ListObjectsOptions, MakeBucketOptions, ObjectRetention, RetentionMode,
};

#[tokio::test]
async fn upload_download_stat_delete_roundtrip() {
    let client = storage_client();
    client
        .buckets()
        .create("docs", MakeBucketOptions::default())
        .await
        .unwrap();
    let objects = client.objects();

    let upload = objects
        .upload(
            "docs",
            "notes/readme.md",
            Bytes::from_static(b"# hello"),
            Some("text/markdown"),
        )
        .await
        .unwrap();
    assert_eq!(upload.bucket, "docs");
    assert_eq!(upload.key, "notes/readme.md");
    assert_eq!(upload.size, 7);
    assert!(!upload.etag.is_empty());

    let data = objects.download("docs", "notes/readme.md").await.unwrap();
    assert_eq!(&data[..], b"# hello");

    let stat = objects.stat("docs", "notes/readme.md").await.unwrap();
    assert_eq!(stat.size, 7);
    assert_eq!(stat.etag, upload.etag);
    assert_eq!(stat.content_type.as_deref(), Some("text/markdown"));

    objects.delete("docs", "notes/readme.md").await.unwrap();
    let err = objects
        .download("docs", "notes/readme.md")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn upload_rejects_empty_payload() {
    let client = storage_client();
    client
        .buckets()
        .create("docs", MakeBucketOptions::default())
        .await
        .unwrap();

    let err = client
        .objects()
        .upload("docs", "empty.bin", Bytes::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidObjectData(_)));
}

#[tokio::test]
async fn upload_rejects_empty_key() {
    let client = storage_client();
    let err = client
        .objects()
        .upload("docs", "", Bytes::from_static(b"x"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidObjectKey(_)));
}

#[tokio::test]
async fn upload_into_missing_bucket_is_not_found() {
    let client = storage_client();
    let err = client
        .objects()
        .upload("missing", "key.txt", Bytes::from_static(b"x"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn listing_supports_prefix_and_recursion() {
    let client = storage_client();
    client
        .buckets()
        .create("docs", MakeBucketOptions::default())
        .await
        .unwrap();
    let objects = client.objects();
    for key in ["index.html", "posts/a.html", "posts/b.html", "style.css"] {
        objects
            .upload("docs", key, Bytes::from_static(b"content"), None)
            .await
            .unwrap();
    }

    let top = objects
        .list("docs", ListObjectsOptions::default())
        .await
        .unwrap();
    let keys: Vec<&str> = top.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["index.html", "posts/", "style.css"]);
    assert!(top[1].is_prefix);

    let posts = objects
        .list(
            "docs",
            ListObjectsOptions::builder()
                .prefix("posts/")
                .recursive(true)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|o| !o.is_prefix));
}

#[tokio::test]
async fn retention_roundtrip_and_enforcement() {
    let client = storage_client();
    client
        .buckets()
        .create("vault", MakeBucketOptions { object_locking: true })
        .await
        .unwrap();
    let objects = client.objects();
    objects
        .upload("vault", "ledger.bin", Bytes::from_static(b"x"), None)
        .await
        .unwrap();

    assert_eq!(objects.get_retention("vault", "ledger.bin").await.unwrap(), None);

    let retention = ObjectRetention {
        mode: RetentionMode::Compliance,
        retain_until: Utc::now() + Duration::days(1),
    };
    objects
        .set_retention("vault", "ledger.bin", retention)
        .await
        .unwrap();
    assert_eq!(
        objects.get_retention("vault", "ledger.bin").await.unwrap(),
        Some(retention)
    );

    let err = objects.delete("vault", "ledger.bin").await.unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}
