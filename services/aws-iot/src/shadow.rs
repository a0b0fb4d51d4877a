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

//! Device shadow update publishing.
//!
//! Updates go to `POST https://{endpoint}/things/{deviceRef}/shadow?name={shadowName}`
//! with a SigV4 signature scoped to the `iotdata` service.

use crate::canonical::{canonical_query_string, encode_uri_path};
use crate::constants::{AWS_PATH_ENCODE_SET, HOST, IOT_DATA_SERVICE, SHADOW_NAME_QUERY};
use crate::{Config, Credential, RequestSigner, SigningParams};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST as HOST_HEADER};
use http::{HeaderValue, Method, Request, Response};
use iotsign_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use log::{debug, info};
use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A shadow document carrying only the desired state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowDocument<T> {
    /// Shadow state section.
    pub state: ShadowState<T>,
}

/// The `state` section of a shadow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowState<T> {
    /// Desired device state.
    pub desired: T,
}

/// Wrap `value` as `{"state":{"desired":value}}`.
pub fn desired_state<T>(value: T) -> ShadowDocument<T> {
    ShadowDocument {
        state: ShadowState { desired: value },
    }
}

/// Path of the shadow resource of `device_ref`: `/things/{deviceRef}/shadow`
///
/// `device_ref` is UriEncoded, so `thing:1` becomes `thing%3A1`.
pub fn shadow_path(device_ref: &str) -> String {
    format!("/things/{}/shadow", utf8_percent_encode(device_ref, &AWS_PATH_ENCODE_SET))
}

// Thing names are limited to alphanumerics, `:`, `_` and `-`.
fn check_device_ref(device_ref: &str) -> Result<()> {
    let valid = !device_ref.is_empty()
        && device_ref
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-'));
    if valid {
        Ok(())
    } else {
        Err(Error::request_invalid(format!(
            "device ref {device_ref:?} is not a valid thing name"
        )))
    }
}

/// ShadowPublisher signs and sends device shadow updates.
///
/// Credentials are loaded through the given provider and cached until they
/// stop being valid.
#[derive(Debug)]
pub struct ShadowPublisher {
    ctx: Context,
    endpoint: String,
    shadow_name: Option<String>,
    signer: RequestSigner,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    credential: Arc<Mutex<Option<Credential>>>,
}

impl ShadowPublisher {
    /// Create a publisher from `config`.
    ///
    /// `endpoint` and `region` are required.
    pub fn new(
        ctx: Context,
        config: &Config,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("iot endpoint is required"))?;
        let region = config
            .region
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("region is required"))?;

        Ok(Self {
            ctx,
            endpoint,
            shadow_name: config.shadow_name.clone(),
            signer: RequestSigner::new(IOT_DATA_SERVICE, region),
            provider: Arc::new(provider),
            credential: Arc::new(Mutex::new(None)),
        })
    }

    /// Replace the request signer, mostly useful to pin the signing time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    async fn load_credential(&self) -> Result<Credential> {
        let cached = self
            .credential
            .lock()
            .map_err(|_| Error::unexpected("credential cache lock poisoned"))?
            .clone();
        if let Some(cred) = cached.filter(|c| c.is_valid()) {
            return Ok(cred);
        }

        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found"))?;
        *self
            .credential
            .lock()
            .map_err(|_| Error::unexpected("credential cache lock poisoned"))? =
            Some(cred.clone());

        Ok(cred)
    }

    /// Build the signed shadow update request for `device_ref`.
    pub fn build_request(
        &self,
        cred: &Credential,
        device_ref: &str,
        payload: &str,
    ) -> Result<Request<Bytes>> {
        check_device_ref(device_ref)?;

        let path = shadow_path(device_ref);
        let mut query = BTreeMap::new();
        if let Some(name) = &self.shadow_name {
            query.insert(SHADOW_NAME_QUERY.to_string(), name.clone());
        }

        let params = SigningParams {
            method: Method::POST,
            canonical_uri: Some(encode_uri_path(&path)),
            query: query.clone(),
            headers: BTreeMap::from([(HOST.to_string(), self.endpoint.clone())]),
            payload: Some(payload.to_string()),
        };
        let signed = self.signer.sign(cred, params)?;

        let query_string = canonical_query_string(&query);
        let uri = if query_string.is_empty() {
            format!("https://{}{path}", self.endpoint)
        } else {
            format!("https://{}{path}?{query_string}", self.endpoint)
        };

        let mut req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(HOST_HEADER, HeaderValue::try_from(self.endpoint.as_str())?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Bytes::from(payload.to_string()))?;
        req.headers_mut().extend(signed.into_header_map()?);

        Ok(req)
    }

    /// Publish `payload` as a shadow update of `device_ref`.
    ///
    /// Nothing is sent if the credential cannot be loaded or signing fails.
    pub async fn publish(&self, device_ref: &str, payload: &str) -> Result<Response<Bytes>> {
        let cred = self.load_credential().await?;
        let req = self.build_request(&cred, device_ref, payload)?;
        debug!("sending shadow update: {req:?}");

        let resp = self.ctx.http_send(req).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::unexpected(format!(
                "shadow update of {device_ref} failed with status {status}: {}",
                String::from_utf8_lossy(resp.body())
            )));
        }

        info!("published shadow update of {device_ref}");
        Ok(resp)
    }

    /// Publish `value` as the desired state of `device_ref`.
    pub async fn publish_desired<T: Serialize>(
        &self,
        device_ref: &str,
        value: &T,
    ) -> Result<Response<Bytes>> {
        let payload = serde_json::to_string(&desired_state(value))?;
        self.publish(device_ref, &payload).await
    }
}
