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

use crate::canonical::signed_headers;
use crate::constants::{ALGORITHM, AUTHORIZATION, X_AMZ_DATE};
use crate::signer::credential_scope;
use crate::SigningContext;
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue};
use iotsign_core::utils::Redact;
use iotsign_core::Result;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// The headers a signed request must carry.
///
/// Only a completed signing run produces this value, so both headers are
/// always present together.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    x_amz_date: String,
    authorization: String,
}

impl SignedHeaders {
    /// Value of the `x-amz-date` header.
    pub fn x_amz_date(&self) -> &str {
        &self.x_amz_date
    }

    /// Value of the `authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Convert into a map of `x-amz-date` and `authorization`.
    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            (X_AMZ_DATE.to_string(), self.x_amz_date.clone()),
            (AUTHORIZATION.to_string(), self.authorization.clone()),
        ])
    }

    /// Convert into an http header map, marking authorization sensitive.
    pub fn into_header_map(self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(2);

        headers.insert(
            HeaderName::from_static(X_AMZ_DATE),
            HeaderValue::try_from(self.x_amz_date)?,
        );
        let mut authorization = HeaderValue::try_from(self.authorization)?;
        authorization.set_sensitive(true);
        headers.insert(http::header::AUTHORIZATION, authorization);

        Ok(headers)
    }
}

impl Debug for SignedHeaders {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("x_amz_date", &self.x_amz_date)
            .field("authorization", &Redact::from(&self.authorization))
            .finish()
    }
}

/// Assemble the outgoing headers from the context and its signature.
///
/// `AWS4-HMAC-SHA256 Credential={ak}/{scope},SignedHeaders={list},Signature={hex}`
pub fn assemble(ctx: &SigningContext, signature: &str) -> SignedHeaders {
    let authorization = format!(
        "{ALGORITHM} Credential={}/{},SignedHeaders={},Signature={signature}",
        ctx.access_key_id(),
        credential_scope(ctx.date(), ctx.region(), ctx.service()),
        signed_headers(ctx.headers()),
    );

    SignedHeaders {
        x_amz_date: ctx.timestamp().to_string(),
        authorization,
    }
}
