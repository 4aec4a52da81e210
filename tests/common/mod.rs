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

//! Shared fixtures: an in-process mock API server and preconfigured clients.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use tokio::net::TcpListener;

use stratus::client::CoreClient;
use stratus::compute::VirtualMachineClient;
use stratus::objectstorage::ObjectStorageClient;
use stratus::objectstorage::memory::MemoryStorage;

/// One request as seen by the mock server.
#[derive(Clone, Debug, Default)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

pub type Recordings = Arc<Mutex<Vec<RecordedRequest>>>;

pub fn recordings() -> Recordings {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(recordings: &Recordings) -> Vec<RecordedRequest> {
    recordings.lock().unwrap().clone()
}

/// Binds the router on an ephemeral port and returns its base URL.
pub async fn serve(router: Router) -> String {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn vm_client(base_url: &str) -> VirtualMachineClient {
    let core = CoreClient::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap();
    VirtualMachineClient::new(core)
}

pub fn storage_client() -> ObjectStorageClient {
    ObjectStorageClient::builder()
        .credentials("test-access", "test-secret")
        .storage(MemoryStorage::new())
        .build()
        .unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
