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

//! Error taxonomy shared by every SDK operation.

use thiserror::Error;

/// All failures an SDK operation can produce.
///
/// HTTP status codes are normalized into the first four variants; everything
/// the server rejects with a status the SDK has no dedicated variant for ends
/// up in [`Error::Server`] with the raw body preserved.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Request rejected before or by the server because an input is invalid.
    #[error("validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// The addressed resource does not exist (HTTP 404).
    #[error("resource not found: {message}")]
    NotFound { message: String },

    /// The request conflicts with current server state (HTTP 409).
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Any other non-success HTTP status, body kept verbatim.
    #[error("server returned HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// Response body was absent, empty or not the JSON shape the operation
    /// expects, regardless of the HTTP status that carried it.
    #[error("decoding failed: {message}")]
    Decoding {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Connection, TLS, timeout or any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Presigned URL generation only supports GET, HEAD and PUT.
    #[error("invalid HTTP method: {0}")]
    InvalidHttpMethod(String),

    #[error("invalid bucket name: {0}")]
    InvalidBucketName(String),

    #[error("invalid object key: {0}")]
    InvalidObjectKey(String),

    #[error("invalid object data: {0}")]
    InvalidObjectData(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// A bucket operation failed inside the storage backend.
    #[error("bucket operation {operation} failed for bucket {bucket}: {message}")]
    Bucket {
        operation: String,
        bucket: String,
        message: String,
    },

    /// An object operation failed inside the storage backend.
    #[error("object operation {operation} failed for {bucket}/{key}: {message}")]
    Object {
        operation: String,
        bucket: String,
        key: String,
        message: String,
    },
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn decoding(message: impl Into<String>) -> Self {
        Error::Decoding {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn bucket(
        operation: impl Into<String>,
        bucket: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Bucket {
            operation: operation.into(),
            bucket: bucket.into(),
            message: message.into(),
        }
    }

    pub(crate) fn object(
        operation: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Object {
            operation: operation.into(),
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decoding {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_names_the_field() {
        let err = Error::validation("api_key", "cannot be empty");
        assert_eq!(
            err.to_string(),
            "validation failed on api_key: cannot be empty"
        );
    }

    #[test]
    fn server_display_keeps_status_and_body() {
        let err = Error::Server {
            status: 503,
            body: "try again".to_string(),
        };
        assert_eq!(err.to_string(), "server returned HTTP 503: try again");
    }

    #[test]
    fn serde_errors_become_decoding_with_source() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::from(parse);
        match err {
            Error::Decoding { source, .. } => assert!(source.is_some()),
            other => panic!("expected Decoding, got {other:?}"),
        }
    }

    #[test]
    fn object_error_display_includes_full_path() {
        let err = Error::object("upload", "photos", "cat.png", "backend offline");
        assert_eq!(
            err.to_string(),
            "object operation upload failed for photos/cat.png: backend offline"
        );
    }
}
