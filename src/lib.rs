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

//! # Stratus Cloud SDK (`stratus-sdk`)
//!
//! This crate provides a strongly-typed, async-first interface to the Stratus
//! Cloud compute API and to Stratus S3-compatible object storage.
//!
//! The compute surface is reached through [`compute::VirtualMachineClient`],
//! which exposes one service per resource family ([`compute::images`],
//! [`compute::custom_images`], [`compute::instances`],
//! [`compute::instance_types`], [`compute::snapshots`]). Object storage is
//! reached through [`objectstorage::ObjectStorageClient`], which exposes
//! bucket, object and presigned-URL services over a pluggable
//! [`objectstorage::storage::StorageApi`] backend.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use stratus::client::CoreClient;
//! use stratus::compute::VirtualMachineClient;
//! use stratus::compute::images::ImageFilters;
//!
//! #[tokio::main]
//! async fn main() {
//!     let core = CoreClient::builder()
//!         .api_key("my-api-key")
//!         .build()
//!         .expect("client config");
//!
//!     let vm = VirtualMachineClient::new(core);
//!     let images = vm
//!         .images()
//!         .list_all(ImageFilters::default())
//!         .await
//!         .expect("request failed");
//!
//!     println!("{} images available", images.len());
//! }
//! ```
//!
//! ## Features
//! - Typed request and response structs for every operation
//! - Full async/await support via [`tokio`]
//! - Transparent pagination with `list_all` on every listable resource
//! - HTTP failures normalized into one [`error::Error`] taxonomy

#![allow(clippy::result_large_err)]

pub mod client;
pub mod compute;
pub mod error;
pub mod objectstorage;
