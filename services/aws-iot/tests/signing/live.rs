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

use anyhow::Result;
use iotsign_aws_iot::{Config, DefaultCredentialProvider, ShadowPublisher};
use iotsign_core::{Context, OsEnv};
use iotsign_http_send_reqwest::ReqwestHttpSend;
use log::{debug, warn};
use serde_json::json;
use std::env;
use std::sync::Arc;

fn init_publisher() -> Option<(ShadowPublisher, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("IOTSIGN_AWS_IOT_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default());
    let config = Config::default().from_env(&ctx);
    let device_ref = config
        .device_ref
        .clone()
        .expect("env AWS_IOT_DEVICE_REF must set");

    let provider = DefaultCredentialProvider::new(Arc::new(config.clone()));
    let publisher =
        ShadowPublisher::new(ctx, &config, provider).expect("publisher config must be valid");

    Some((publisher, device_ref))
}

#[tokio::test]
async fn test_publish_desired_state() -> Result<()> {
    let Some((publisher, device_ref)) = init_publisher() else {
        warn!("IOTSIGN_AWS_IOT_TEST is not set, skipped");
        return Ok(());
    };

    let resp = publisher
        .publish_desired(&device_ref, &json!({"attributeRef": 1}))
        .await?;

    debug!("got response: {:?}", String::from_utf8_lossy(resp.body()));
    assert!(resp.status().is_success());
    Ok(())
}
