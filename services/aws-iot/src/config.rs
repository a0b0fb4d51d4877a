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

use crate::constants::*;
use iotsign_core::utils::Redact;
use iotsign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for aws iot device shadow publishing.
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` is the account specific iot data host, without scheme,
    /// e.g. `xxxxxxxx-ats.iot.us-east-1.amazonaws.com`. It will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_IOT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    pub region: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `device_ref` is the thing name whose shadow gets updated. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_IOT_DEVICE_REF`]
    pub device_ref: Option<String>,
    /// `shadow_name` selects a named shadow. If unset, the classic shadow is used.
    /// It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_IOT_SHADOW_NAME`]
    pub shadow_name: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("device_ref", &self.device_ref)
            .field("shadow_name", &self.shadow_name)
            .finish()
    }
}

impl Config {
    /// Load config from env, fields already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        let load = |field: &mut Option<String>, key: &str| {
            if field.is_none() {
                *field = envs.get(key).filter(|v| !v.is_empty()).cloned();
            }
        };

        load(&mut self.endpoint, AWS_IOT_ENDPOINT);
        load(&mut self.region, AWS_REGION);
        load(&mut self.access_key_id, AWS_ACCESS_KEY_ID);
        load(&mut self.secret_access_key, AWS_SECRET_ACCESS_KEY);
        load(&mut self.device_ref, AWS_IOT_DEVICE_REF);
        load(&mut self.shadow_name, AWS_IOT_SHADOW_NAME);

        self
    }
}
