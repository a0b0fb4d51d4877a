// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Canonical request construction.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! \n
//! SignedHeaders\n
//! HexEncode(Hash(Payload))
//! ```
//!
//! The segment count is fixed: an empty query map yields an empty line and an
//! empty header map yields only the terminating blank line.

use crate::constants::{AWS_PATH_ENCODE_SET, AWS_QUERY_ENCODE_SET};
use crate::SigningContext;
use iotsign_core::hash::hex_sha256;
use percent_encoding::utf8_percent_encode;
use std::collections::BTreeMap;

/// Build the canonical request string for `ctx`.
pub fn canonical_request(ctx: &SigningContext) -> String {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut s = String::with_capacity(256);

    s.push_str(ctx.method().as_str());
    s.push('\n');
    s.push_str(ctx.canonical_uri());
    s.push('\n');
    s.push_str(&canonical_query_string(ctx.query()));
    s.push('\n');
    s.push_str(&canonical_headers(ctx.headers()));
    s.push('\n');
    s.push_str(&signed_headers(ctx.headers()));
    s.push('\n');
    s.push_str(&hex_sha256(ctx.payload().as_bytes()));

    s
}

/// UriEncode every segment of `path`, leaving `/` as is.
///
/// AWS services other than S3 sign the path encoded once more than it is
/// sent: a request for `/things/thing%3A1/shadow` is signed with
/// `/things/thing%253A1/shadow`.
pub fn encode_uri_path(path: &str) -> String {
    utf8_percent_encode(path, &AWS_PATH_ENCODE_SET).to_string()
}

/// `a=1&b=x%20y`, keys in ascending order, values percent encoded.
pub fn canonical_query_string(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `host:example.com\nx-amz-date:20230101T000000Z\n`, every entry newline terminated.
pub fn canonical_headers(headers: &BTreeMap<String, String>) -> String {
    let mut s = String::with_capacity(128);
    for (k, v) in headers {
        s.push_str(k);
        s.push(':');
        s.push_str(v);
        s.push('\n');
    }
    s
}

/// `host;x-amz-date`
pub fn signed_headers(headers: &BTreeMap<String, String>) -> String {
    headers
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";")
}
