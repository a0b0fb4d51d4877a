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

use crate::authorization::{assemble, SignedHeaders};
use crate::canonical::canonical_request;
use crate::signer::{sign, string_to_sign};
use crate::{Credential, SigningContext, SigningParams};
use iotsign_core::time::{now, DateTime};
use iotsign_core::{Error, Result, SigningCredential};
use log::{debug, warn};

/// RequestSigner that implement AWS SigV4 for iot data requests.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer keeps no state between calls and can be shared freely across
/// threads; every call builds its own [`SigningContext`].
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign `params` with `cred`, returning the `x-amz-date` and
    /// `authorization` headers to attach.
    ///
    /// An error means nothing was signed: callers must not send the request.
    pub fn sign(&self, cred: &Credential, params: SigningParams) -> Result<SignedHeaders> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access key id and secret access key must not be empty",
            ));
        }

        let now = self.time.unwrap_or_else(now);
        let ctx = SigningContext::new(cred, &self.region, &self.service, params, now)?;

        let creq = canonical_request(&ctx);
        debug!("calculated canonical request: {creq}");
        debug!("calculated string to sign: {}", string_to_sign(&ctx, &creq));

        let signature = sign(&creq, &ctx).inspect_err(|err| {
            warn!("signing request failed: {err}");
        })?;

        Ok(assemble(&ctx, &signature))
    }
}
