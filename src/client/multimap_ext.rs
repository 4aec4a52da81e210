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

//! Map for query parameters, headers and presigned request parameters.

use multimap::MultiMap;

/// Multimap for string key/value pairs.
pub type Multimap = MultiMap<String, String>;

pub trait MultimapExt {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Percent-encodes keys and values and joins the pairs with `&`. Returns
    /// an empty string for an empty map. Pair order is unspecified.
    fn to_query_string(&self) -> String;
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, values) in self.iter_all() {
            for value in values {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&urlencoding::encode(key));
                query.push('=');
                query.push_str(&urlencoding::encode(value));
            }
        }
        query
    }
}
