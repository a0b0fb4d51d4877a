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

//! AWS SigV4 signing for AWS IoT device shadow requests.
//!
//! This crate signs requests to the AWS IoT data plane with the
//! [Signature Version 4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
//! scheme and can publish device shadow updates with the result.
//!
//! Signing runs in four stages, each a pure function of its input and one
//! captured timestamp:
//!
//! 1. [`SigningContext`]: normalized, immutable request and scope data
//! 2. [`canonical::canonical_request`]: the canonical request string
//! 3. [`signer::sign`]: signing key derivation and HMAC signature
//! 4. [`authorization::assemble`]: the `x-amz-date` and `authorization` headers
//!
//! [`RequestSigner`] runs them in order.
//!
//! ## Example
//!
//! ```
//! use iotsign_aws_iot::{Credential, RequestSigner, SigningParams};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> iotsign_core::Result<()> {
//! let signer = RequestSigner::new("iotdata", "us-east-1");
//! let cred = Credential::new("access_key_id", "secret_access_key");
//!
//! let headers = signer.sign(
//!     &cred,
//!     SigningParams {
//!         canonical_uri: Some("/things/dev1/shadow".to_string()),
//!         query: BTreeMap::from([("name".to_string(), "shadowName".to_string())]),
//!         headers: BTreeMap::from([("host".to_string(), "example.com".to_string())]),
//!         payload: Some(r#"{"state":{"desired":{"x":1}}}"#.to_string()),
//!         ..Default::default()
//!     },
//! )?;
//!
//! assert!(headers.authorization().starts_with("AWS4-HMAC-SHA256 Credential=access_key_id/"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::IOT_DATA_SERVICE;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod signing_context;
pub use signing_context::{SigningContext, SigningParams};

pub mod canonical;
pub mod signer;

pub mod authorization;
pub use authorization::SignedHeaders;

mod sign_request;
pub use sign_request::RequestSigner;

pub mod shadow;
pub use shadow::ShadowPublisher;
