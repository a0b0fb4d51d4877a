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

use super::{credential, shadow_params, signature_of, signer};
use anyhow::Result;
use iotsign_aws_iot::canonical::canonical_request;
use iotsign_aws_iot::{SigningContext, SigningParams, IOT_DATA_SERVICE};
use pretty_assertions::{assert_eq, assert_ne};
use std::collections::BTreeMap;
use test_case::test_case;

fn signature(params: SigningParams) -> Result<String> {
    let headers = signer().sign(&credential(), params)?;
    Ok(signature_of(headers.authorization()).to_string())
}

#[test]
fn test_signing_is_deterministic() -> Result<()> {
    let first = signer().sign(&credential(), shadow_params())?;
    let second = signer().sign(&credential(), shadow_params())?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_insertion_order_does_not_matter() -> Result<()> {
    let pairs = [
        ("host", "example.com"),
        ("content-type", "application/json"),
        ("x-custom", "1"),
    ];

    let mut forward = BTreeMap::new();
    for (k, v) in pairs {
        forward.insert(k.to_string(), v.to_string());
    }
    let mut backward = BTreeMap::new();
    for (k, v) in pairs.into_iter().rev() {
        backward.insert(k.to_string(), v.to_string());
    }

    let mut query_forward = BTreeMap::new();
    query_forward.insert("name".to_string(), "shadowName".to_string());
    query_forward.insert("version".to_string(), "3".to_string());
    let mut query_backward = BTreeMap::new();
    query_backward.insert("version".to_string(), "3".to_string());
    query_backward.insert("name".to_string(), "shadowName".to_string());

    let ctx = |headers, query| {
        SigningContext::new(
            &credential(),
            "us-east-1",
            IOT_DATA_SERVICE,
            SigningParams {
                headers,
                query,
                ..shadow_params()
            },
            super::fixed_time(),
        )
    };

    assert_eq!(
        canonical_request(&ctx(forward, query_forward)?),
        canonical_request(&ctx(backward, query_backward)?)
    );
    Ok(())
}

#[test]
fn test_empty_payload_equals_missing_payload() -> Result<()> {
    let empty = signature(SigningParams {
        payload: Some(String::new()),
        ..shadow_params()
    })?;
    let missing = signature(SigningParams {
        payload: None,
        ..shadow_params()
    })?;

    assert_eq!(empty, missing);
    assert_eq!(
        empty,
        "164ce8f3a036f71f7806d31a8c80e0f6a0140964bd3dd626089b176713f040d1"
    );
    Ok(())
}

#[test_case(None; "missing uri")]
#[test_case(Some(""); "empty uri")]
#[test_case(Some(" "); "blank uri")]
fn test_blank_uri_signs_as_root(uri: Option<&str>) -> Result<()> {
    let root = signature(SigningParams {
        canonical_uri: Some("/".to_string()),
        ..shadow_params()
    })?;
    let blank = signature(SigningParams {
        canonical_uri: uri.map(str::to_string),
        ..shadow_params()
    })?;

    assert_eq!(root, blank);
    Ok(())
}

#[test]
fn test_single_byte_changes_signature() -> Result<()> {
    let base = signature(shadow_params())?;

    let payload = signature(SigningParams {
        payload: Some(r#"{"state":{"desired":{"x":2}}}"#.to_string()),
        ..shadow_params()
    })?;
    let header = signature(SigningParams {
        headers: BTreeMap::from([("host".to_string(), "example.con".to_string())]),
        ..shadow_params()
    })?;
    let query = signature(SigningParams {
        query: BTreeMap::from([("name".to_string(), "shadowNamf".to_string())]),
        ..shadow_params()
    })?;

    assert_ne!(base, payload);
    assert_ne!(base, header);
    assert_ne!(base, query);
    assert_ne!(payload, header);
    assert_ne!(header, query);
    Ok(())
}

#[test]
fn test_concurrent_signing() -> Result<()> {
    let signer = signer();
    let expected = signer.sign(&credential(), shadow_params())?;

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| signer.sign(&credential(), shadow_params())))
            .collect();
        for handle in handles {
            let headers = handle.join().expect("signing thread must not panic");
            assert_eq!(headers.expect("signing must succeed"), expected);
        }
    });
    Ok(())
}
