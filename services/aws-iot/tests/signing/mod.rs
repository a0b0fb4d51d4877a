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

mod live;
mod properties;
mod reference;

use iotsign_aws_iot::{Credential, RequestSigner, SigningParams, IOT_DATA_SERVICE};
use iotsign_core::time::{parse_iso8601, DateTime};
use std::collections::BTreeMap;

pub const ACCESS_KEY_ID: &str = "AKIDEXAMPLE";
pub const SECRET_ACCESS_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
pub const PAYLOAD: &str = r#"{"state":{"desired":{"x":1}}}"#;

pub fn fixed_time() -> DateTime {
    parse_iso8601("20230101T000000Z").expect("fixed time must be valid")
}

pub fn credential() -> Credential {
    Credential::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY)
}

pub fn signer() -> RequestSigner {
    let _ = env_logger::builder().is_test(true).try_init();

    RequestSigner::new(IOT_DATA_SERVICE, "us-east-1").with_time(fixed_time())
}

/// The shadow update of `dev1` used across the signing tests.
pub fn shadow_params() -> SigningParams {
    SigningParams {
        canonical_uri: Some("/things/dev1/shadow".to_string()),
        query: BTreeMap::from([("name".to_string(), "shadowName".to_string())]),
        headers: BTreeMap::from([("host".to_string(), "example.com".to_string())]),
        payload: Some(PAYLOAD.to_string()),
        ..Default::default()
    }
}

/// Extract the hex signature from an authorization value.
pub fn signature_of(authorization: &str) -> &str {
    authorization
        .rsplit_once("Signature=")
        .map(|(_, sig)| sig)
        .expect("authorization must carry a signature")
}
