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

use super::{credential, fixed_time, shadow_params, signature_of, signer, PAYLOAD};
use super::{ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use iotsign_aws_iot::{Config, ShadowPublisher, SigningParams, StaticCredentialProvider};
use iotsign_core::Context;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::time::SystemTime;
use test_case::test_case;

/// Sign the same request with the aws-sigv4 crate and return its signature.
fn aws_sigv4_signature(uri: &str, headers: &[(&str, &str)], payload: &str) -> Result<String> {
    let identity = Credentials::new(
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        None,
        None,
        "hardcoded-credentials",
    )
    .into();
    let params = v4::SigningParams::builder()
        .identity(&identity)
        .region("us-east-1")
        .name("iotdata")
        .time(SystemTime::from(fixed_time()))
        .settings(SigningSettings::default())
        .build()?
        .into();

    let signable = SignableRequest::new(
        "POST",
        uri,
        [("host", "example.com")]
            .into_iter()
            .chain(headers.iter().copied()),
        SignableBody::Bytes(payload.as_bytes()),
    )?;
    let (_, signature) = sign(signable, &params)?.into_parts();

    Ok(signature)
}

#[test]
fn test_known_vector() -> Result<()> {
    let headers = signer().sign(&credential(), shadow_params())?;

    assert_eq!(headers.x_amz_date(), "20230101T000000Z");
    assert_eq!(
        headers.authorization(),
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20230101/us-east-1/iotdata/aws4_request,\
         SignedHeaders=host;x-amz-date,\
         Signature=923e2dc79e8be3750ec921c09c94ee28736be4e58eb6614f7b0fd0b886a53451"
    );
    Ok(())
}

#[test_case(PAYLOAD; "desired state")]
#[test_case(""; "empty payload")]
#[test_case(r#"{"state":{"desired":{"color":"red","power":true}}}"#; "nested document")]
fn test_matches_aws_sigv4(payload: &str) -> Result<()> {
    let expected = aws_sigv4_signature(
        "https://example.com/things/dev1/shadow?name=shadowName",
        &[],
        payload,
    )?;

    let params = SigningParams {
        payload: Some(payload.to_string()),
        ..shadow_params()
    };
    let headers = signer().sign(&credential(), params)?;

    assert_eq!(signature_of(headers.authorization()), expected);
    Ok(())
}

#[test_case(&[("name", "a b")], "name=a%20b"; "space")]
#[test_case(&[("name", "a*b/c~d")], "name=a%2Ab%2Fc~d"; "reserved characters")]
#[test_case(&[("name", "caf\u{e9}")], "name=caf%C3%A9"; "non ascii")]
#[test_case(&[("version", "2"), ("name", "shadowName")], "version=2&name=shadowName"; "several parameters")]
#[test_case(&[], ""; "no parameters")]
fn test_query_matches_aws_sigv4(query: &[(&str, &str)], encoded: &str) -> Result<()> {
    let uri = if encoded.is_empty() {
        "https://example.com/things/dev1/shadow".to_string()
    } else {
        format!("https://example.com/things/dev1/shadow?{encoded}")
    };
    let expected = aws_sigv4_signature(&uri, &[], PAYLOAD)?;

    let params = SigningParams {
        query: query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..shadow_params()
    };
    let headers = signer().sign(&credential(), params)?;

    assert_eq!(signature_of(headers.authorization()), expected);
    Ok(())
}

#[test_case("dev1"; "alphanumeric")]
#[test_case("Thing_2"; "underscore")]
#[test_case("thing-3"; "hyphen")]
#[test_case("thing:1"; "colon")]
#[test_case("arn:a_b-C9"; "mixed")]
fn test_shadow_request_matches_aws_sigv4(device_ref: &str) -> Result<()> {
    let config = Config {
        endpoint: Some("example.com".to_string()),
        region: Some("us-east-1".to_string()),
        shadow_name: Some("shadowName".to_string()),
        ..Default::default()
    };
    let publisher = ShadowPublisher::new(
        Context::new(),
        &config,
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
    )?
    .with_signer(signer());

    let req = publisher.build_request(&credential(), device_ref, PAYLOAD)?;
    let expected = aws_sigv4_signature(&req.uri().to_string(), &[], PAYLOAD)?;

    let authorization = req.headers()["authorization"].to_str()?;
    assert_eq!(signature_of(authorization), expected);
    Ok(())
}

#[test]
fn test_header_whitespace_matches_aws_sigv4() -> Result<()> {
    let expected = aws_sigv4_signature(
        "https://example.com/things/dev1/shadow?name=shadowName",
        &[("x-custom", "  a   b  ")],
        PAYLOAD,
    )?;

    let mut params = shadow_params();
    params.headers.insert("x-custom".to_string(), "  a   b  ".to_string());
    let headers = signer().sign(&credential(), params)?;

    assert_eq!(signature_of(headers.authorization()), expected);
    Ok(())
}
