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

use crate::constants::{HOST, X_AMZ_DATE};
use crate::Credential;
use http::Method;
use iotsign_core::time::{format_date, format_iso8601, DateTime};
use iotsign_core::utils::Redact;
use iotsign_core::{Error, Result};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// The request parts that take part in signing.
///
/// `query` and `headers` are ordered maps, so the canonical form never depends
/// on the order callers inserted entries in.
#[derive(Debug, Clone)]
pub struct SigningParams {
    /// HTTP method of the request.
    pub method: Method,
    /// Absolute path of the target URI. `None` or blank means `/`.
    pub canonical_uri: Option<String>,
    /// Query parameters, values not yet encoded.
    pub query: BTreeMap<String, String>,
    /// Headers to sign. Must contain `host`.
    pub headers: BTreeMap<String, String>,
    /// Request body. `None` is signed as the empty body.
    pub payload: Option<String>,
}

impl Default for SigningParams {
    fn default() -> Self {
        Self {
            method: Method::POST,
            canonical_uri: None,
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            payload: None,
        }
    }
}

/// Everything one signing run needs, captured at a single instant.
///
/// A `SigningContext` is built per request and never mutated: the timestamp
/// binds it to one moment, so reusing it for a later request would produce a
/// stale signature.
#[derive(Clone)]
pub struct SigningContext {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    service: String,
    method: Method,
    canonical_uri: String,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    payload: String,
    timestamp: String,
    date: String,
}

impl SigningContext {
    /// Build a signing context from a credential, scope and request parts.
    ///
    /// Normalization happens here and only here:
    ///
    /// - blank `canonical_uri` becomes `/`
    /// - missing `payload` becomes the empty string
    /// - header names are trimmed and lowercased, values trimmed with inner
    ///   runs of whitespace collapsed to one space
    /// - `x-amz-date` is inserted with the full timestamp of `now`
    pub fn new(
        cred: &Credential,
        region: &str,
        service: &str,
        params: SigningParams,
        now: DateTime,
    ) -> Result<Self> {
        if region.is_empty() {
            return Err(Error::config_invalid("region is required for signing"));
        }
        if service.is_empty() {
            return Err(Error::config_invalid("service is required for signing"));
        }

        let canonical_uri = match params.canonical_uri {
            Some(uri) if !uri.trim().is_empty() => uri,
            _ => "/".to_string(),
        };

        let timestamp = format_iso8601(now);
        let date = format_date(now);

        let mut headers: BTreeMap<String, String> = params
            .headers
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), collapse_whitespace(&v)))
            .collect();
        if !headers.contains_key(HOST) {
            return Err(Error::request_invalid("host header is required for signing"));
        }
        headers.insert(X_AMZ_DATE.to_string(), timestamp.clone());

        Ok(Self {
            access_key_id: cred.access_key_id.clone(),
            secret_access_key: cred.secret_access_key.clone(),
            region: region.to_string(),
            service: service.to_string(),
            method: params.method,
            canonical_uri,
            query: params.query,
            headers,
            payload: params.payload.unwrap_or_default(),
            timestamp,
            date,
        })
    }

    /// Access key id placed in the credential scope.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Region of the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service of the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Canonical URI, never blank.
    pub fn canonical_uri(&self) -> &str {
        &self.canonical_uri
    }

    /// Query parameters in ascending key order.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Signed headers in ascending key order, `x-amz-date` included.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Request body, empty when none was given.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Full timestamp: `20220313T072004Z`
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Date of the timestamp: `20220313`
    pub fn date(&self) -> &str {
        &self.date
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Debug for SigningContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("service", &self.service)
            .field("method", &self.method)
            .field("canonical_uri", &self.canonical_uri)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("payload_len", &self.payload.len())
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
