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

//! String to sign, signing key derivation and the final signature.

use crate::constants::{ALGORITHM, AWS4_REQUEST};
use crate::SigningContext;
use iotsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use iotsign_core::Result;

/// Scope: `20220313/<region>/<service>/aws4_request`
pub fn credential_scope(date: &str, region: &str, service: &str) -> String {
    format!("{date}/{region}/{service}/{AWS4_REQUEST}")
}

/// StringToSign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(ctx: &SigningContext, canonical_request: &str) -> String {
    format!(
        "{ALGORITHM}\n{}\n{}\n{}",
        ctx.timestamp(),
        credential_scope(ctx.date(), ctx.region(), ctx.service()),
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key for one day, region and service.
///
/// `date` must be the date-only value (`20220313`), never the full timestamp.
pub fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
    // Sign region
    let sign_region = hmac_sha256(&sign_date, region.as_bytes())?;
    // Sign service
    let sign_service = hmac_sha256(&sign_region, service.as_bytes())?;
    // Sign request
    hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())
}

/// Compute the lowercase hex signature of `canonical_request`.
pub fn sign(canonical_request: &str, ctx: &SigningContext) -> Result<String> {
    let string_to_sign = string_to_sign(ctx, canonical_request);
    let key = signing_key(
        ctx.secret_access_key(),
        ctx.date(),
        ctx.region(),
        ctx.service(),
    )?;

    hex_hmac_sha256(&key, string_to_sign.as_bytes())
}
