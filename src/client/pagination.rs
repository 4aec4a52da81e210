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

//! Pagination envelope types and the exhaustive page lister.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Page size used by `list_all` operations.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Window position of one page within a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub offset: i64,
    pub limit: i64,
    pub count: i64,
    pub total: i64,
}

/// Listing metadata returned alongside every page of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub page: PageMeta,
}

/// Fetches pages sequentially until the server returns a short page.
///
/// Starts at offset 0 and advances by `page_size` after every full page.
/// Termination relies only on the returned item count, never on the
/// server-reported total. Any page error discards the partial results.
pub(crate) async fn list_all_pages<T, F>(page_size: i64, mut fetch_page: F) -> Result<Vec<T>, Error>
where
    F: AsyncFnMut(i64, i64) -> Result<Vec<T>, Error>,
{
    let mut all = Vec::new();
    let mut offset = 0i64;
    loop {
        let page = fetch_page(offset, page_size).await?;
        let returned = page.len() as i64;
        all.extend(page);
        if returned < page_size {
            return Ok(all);
        }
        offset += page_size;
    }
}
